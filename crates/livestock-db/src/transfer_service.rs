//! Composite atomic operations: inter-farm transfer, within-farm category
//! change, and rule-driven weaning.
//!
//! Every method here opens exactly one transaction and drives all of its
//! legs through `movement_service`'s `*_in_tx` functions — never a fresh
//! `pool.begin()` per leg. A failure on any leg rolls back every leg already
//! applied in the same call.

use chrono::{DateTime, Utc};
use livestock_domain::validators::{
    require_category_change_params, require_transfer_params, require_weaning_params,
};
use livestock_domain::weaning;
use livestock_domain::DomainError;
use livestock_types::{
    AnimalCategoryId, AnimalMovement, FarmId, Metadata, OperationType, UserId,
    META_COUNTERPART_CATEGORY, META_COUNTERPART_FARM, META_TRANSFER_KIND,
};
use sqlx::PgPool;

use crate::error::{DbError, ServiceError};
use crate::movement_service::{execute_entry_in_tx, execute_exit_in_tx, EntryInput, ExitInput};

/// Composes `MovementService` calls into multi-balance atomic operations.
#[derive(Clone)]
pub struct TransferService {
    pool: PgPool,
}

/// Inputs common to every composite operation leg.
struct CompositeCommon {
    actor: UserId,
    timestamp: Option<DateTime<Utc>>,
    metadata: Metadata,
    source_ip: Option<String>,
}

impl TransferService {
    /// Builds a service bound to `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Moves `quantity` head of `category_id` from `source_farm_id` to
    /// `target_farm_id`, as one `TRANSFER_OUT`/`TRANSFER_IN` pair sharing a
    /// timestamp, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the farms are equal, quantity is
    /// non-positive, or either leg rejects (insufficient stock, balance not
    /// found, concurrency conflict); [`ServiceError::Db`] on a connection
    /// failure. On any error neither leg is observable.
    #[allow(clippy::too_many_arguments)]
    pub async fn execute_transfer(
        &self,
        source_farm_id: FarmId,
        target_farm_id: FarmId,
        category_id: AnimalCategoryId,
        quantity: i32,
        actor: UserId,
        timestamp: Option<DateTime<Utc>>,
        metadata: Metadata,
        source_ip: Option<String>,
    ) -> Result<(AnimalMovement, AnimalMovement), ServiceError> {
        require_transfer_params(source_farm_id, target_farm_id)?;

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let ts = timestamp.unwrap_or_else(Utc::now);

        let mut out_metadata = metadata.clone();
        out_metadata.insert(
            META_COUNTERPART_FARM.to_string(),
            serde_json::Value::String(target_farm_id.to_string()),
        );
        out_metadata.insert(
            META_TRANSFER_KIND.to_string(),
            serde_json::Value::String("transfer".to_string()),
        );
        let mut in_metadata = metadata;
        in_metadata.insert(
            META_COUNTERPART_FARM.to_string(),
            serde_json::Value::String(source_farm_id.to_string()),
        );
        in_metadata.insert(
            META_TRANSFER_KIND.to_string(),
            serde_json::Value::String("transfer".to_string()),
        );

        let out_mv = execute_exit_in_tx(
            &mut tx,
            ExitInput {
                farm_id: source_farm_id,
                animal_category_id: category_id,
                operation_type: OperationType::TransferOut,
                quantity,
                actor,
                timestamp: Some(ts),
                metadata: out_metadata,
                client_id: None,
                death_reason_id: None,
                source_ip: source_ip.clone(),
            },
        )
        .await?;

        let in_mv = execute_entry_in_tx(
            &mut tx,
            EntryInput {
                farm_id: target_farm_id,
                animal_category_id: category_id,
                operation_type: OperationType::TransferIn,
                quantity,
                actor,
                timestamp: Some(ts),
                metadata: in_metadata,
                source_ip,
            },
        )
        .await?;

        tx.commit().await.map_err(DbError::from)?;

        tracing::info!(
            source_farm_id = %source_farm_id,
            target_farm_id = %target_farm_id,
            animal_category_id = %category_id,
            quantity,
            "transfer executed"
        );

        Ok((out_mv, in_mv))
    }

    /// Moves `quantity` head from `source_category_id` to
    /// `target_category_id` on the same farm, as one
    /// `CATEGORY_CHANGE_OUT`/`CATEGORY_CHANGE_IN` pair sharing a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the categories are equal or
    /// quantity is non-positive, or either leg rejects; [`ServiceError::Db`]
    /// on a connection failure.
    #[allow(clippy::too_many_arguments)]
    pub async fn execute_category_change(
        &self,
        farm_id: FarmId,
        source_category_id: AnimalCategoryId,
        target_category_id: AnimalCategoryId,
        quantity: i32,
        actor: UserId,
        timestamp: Option<DateTime<Utc>>,
        metadata: Metadata,
        source_ip: Option<String>,
    ) -> Result<(AnimalMovement, AnimalMovement), ServiceError> {
        require_category_change_params(source_category_id, target_category_id)?;

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let ts = timestamp.unwrap_or_else(Utc::now);

        let mut out_metadata = metadata.clone();
        out_metadata.insert(
            META_COUNTERPART_CATEGORY.to_string(),
            serde_json::Value::String(target_category_id.to_string()),
        );
        out_metadata.insert(
            META_TRANSFER_KIND.to_string(),
            serde_json::Value::String("category_change".to_string()),
        );
        let mut in_metadata = metadata;
        in_metadata.insert(
            META_COUNTERPART_CATEGORY.to_string(),
            serde_json::Value::String(source_category_id.to_string()),
        );
        in_metadata.insert(
            META_TRANSFER_KIND.to_string(),
            serde_json::Value::String("category_change".to_string()),
        );

        let out_mv = execute_exit_in_tx(
            &mut tx,
            ExitInput {
                farm_id,
                animal_category_id: source_category_id,
                operation_type: OperationType::CategoryChangeOut,
                quantity,
                actor,
                timestamp: Some(ts),
                metadata: out_metadata,
                client_id: None,
                death_reason_id: None,
                source_ip: source_ip.clone(),
            },
        )
        .await?;

        let in_mv = execute_entry_in_tx(
            &mut tx,
            EntryInput {
                farm_id,
                animal_category_id: target_category_id,
                operation_type: OperationType::CategoryChangeIn,
                quantity,
                actor,
                timestamp: Some(ts),
                metadata: in_metadata,
                source_ip,
            },
        )
        .await?;

        tx.commit().await.map_err(DbError::from)?;

        tracing::info!(
            farm_id = %farm_id,
            source_category_id = %source_category_id,
            target_category_id = %target_category_id,
            quantity,
            "category change executed"
        );

        Ok((out_mv, in_mv))
    }

    /// Promotes calves out of the pre-weaning categories and into their
    /// two-year-old counterparts, per the fixed rule table in
    /// `livestock_domain::weaning`. At least one of `quantity_males`,
    /// `quantity_females` must be strictly positive; a zero leg is skipped
    /// entirely rather than executed as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if both quantities are zero or
    /// negative, if a required system category is missing
    /// (`WEANING_CATEGORY_NOT_FOUND`), or if any leg rejects; the whole
    /// weaning call is atomic — a failed leg rolls back every prior leg.
    #[allow(clippy::too_many_arguments)]
    pub async fn execute_weaning(
        &self,
        farm_id: FarmId,
        quantity_males: i32,
        quantity_females: i32,
        actor: UserId,
        timestamp: Option<DateTime<Utc>>,
        metadata: Metadata,
        source_ip: Option<String>,
    ) -> Result<Vec<(AnimalMovement, AnimalMovement)>, ServiceError> {
        require_weaning_params(farm_id, quantity_males, quantity_females)?;

        let pairs = weaning::promotion_pairs(quantity_males, quantity_females);
        let common = CompositeCommon {
            actor,
            timestamp,
            metadata,
            source_ip,
        };

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let ts = common.timestamp.unwrap_or_else(Utc::now);
        let mut results = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let source_category =
                crate::category_store::find_by_slug(&mut tx, pair.source_slug)
                    .await
                    .map_err(ServiceError::from)?
                    .ok_or(DomainError::WeaningCategoryNotFound {
                        slug: pair.source_slug,
                    })?;
            let target_category =
                crate::category_store::find_by_slug(&mut tx, pair.target_slug)
                    .await
                    .map_err(ServiceError::from)?
                    .ok_or(DomainError::WeaningCategoryNotFound {
                        slug: pair.target_slug,
                    })?;

            let mut out_metadata = common.metadata.clone();
            out_metadata.insert(
                META_COUNTERPART_CATEGORY.to_string(),
                serde_json::Value::String(target_category.id.to_string()),
            );
            out_metadata.insert(
                META_TRANSFER_KIND.to_string(),
                serde_json::Value::String("weaning".to_string()),
            );
            let mut in_metadata = common.metadata.clone();
            in_metadata.insert(
                META_COUNTERPART_CATEGORY.to_string(),
                serde_json::Value::String(source_category.id.to_string()),
            );
            in_metadata.insert(
                META_TRANSFER_KIND.to_string(),
                serde_json::Value::String("weaning".to_string()),
            );

            let out_mv = execute_exit_in_tx(
                &mut tx,
                ExitInput {
                    farm_id,
                    animal_category_id: source_category.id,
                    operation_type: OperationType::WeaningOut,
                    quantity: pair.quantity,
                    actor: common.actor,
                    timestamp: Some(ts),
                    metadata: out_metadata,
                    client_id: None,
                    death_reason_id: None,
                    source_ip: common.source_ip.clone(),
                },
            )
            .await?;

            let in_mv = execute_entry_in_tx(
                &mut tx,
                EntryInput {
                    farm_id,
                    animal_category_id: target_category.id,
                    operation_type: OperationType::WeaningIn,
                    quantity: pair.quantity,
                    actor: common.actor,
                    timestamp: Some(ts),
                    metadata: in_metadata,
                    source_ip: common.source_ip.clone(),
                },
            )
            .await?;

            results.push((out_mv, in_mv));
        }

        tx.commit().await.map_err(DbError::from)?;

        tracing::info!(
            farm_id = %farm_id,
            quantity_males,
            quantity_females,
            pairs = results.len(),
            "weaning executed"
        );

        Ok(results)
    }
}
