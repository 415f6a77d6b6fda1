//! Atomic single-balance mutation: the transactional heart of the ledger.
//!
//! `execute_entry`/`execute_exit` each run the full protocol inside one
//! transaction — validate, lock, compute, append, conditionally update,
//! commit — and are the only code paths allowed to change a balance's
//! `current_quantity`. `TransferService` composes the `*_in_tx` halves of
//! this module directly so a composite operation shares one transaction
//! rather than opening one per leg.

use chrono::{DateTime, Utc};
use livestock_domain::validators::{require_companions, require_positive, require_sufficient};
use livestock_domain::{classification, DomainError};
use livestock_types::{
    AnimalCategoryId, AnimalMovement, Client, ClientId, DeathReason, DeathReasonId, FarmId,
    Metadata, MovementType, OperationType, UserId,
};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{DbError, ServiceError};
use crate::movement_store::{self, NewMovement};
use crate::{balance_store, client_store, death_reason_store};

/// Inputs shared by an entry — a quantity that increases a balance.
pub struct EntryInput {
    /// The farm whose balance is affected.
    pub farm_id: FarmId,
    /// The category whose balance is affected.
    pub animal_category_id: AnimalCategoryId,
    /// Must classify to [`MovementType::Entry`].
    pub operation_type: OperationType,
    /// Strictly positive headcount.
    pub quantity: i32,
    /// The actor recording this movement.
    pub actor: UserId,
    /// Event time; defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form structured metadata.
    pub metadata: Metadata,
    /// Optional source IP of the request that produced this movement.
    pub source_ip: Option<String>,
}

/// Inputs shared by an exit — a quantity that decreases a balance.
pub struct ExitInput {
    /// The farm whose balance is affected.
    pub farm_id: FarmId,
    /// The category whose balance is affected.
    pub animal_category_id: AnimalCategoryId,
    /// Must classify to [`MovementType::Exit`].
    pub operation_type: OperationType,
    /// Strictly positive headcount, must not exceed the current balance.
    pub quantity: i32,
    /// The actor recording this movement.
    pub actor: UserId,
    /// Event time; defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form structured metadata.
    pub metadata: Metadata,
    /// Required iff `operation_type` is `Sale` or `Donation`.
    pub client_id: Option<ClientId>,
    /// Required iff `operation_type` is `Death`.
    pub death_reason_id: Option<DeathReasonId>,
    /// Optional source IP of the request that produced this movement.
    pub source_ip: Option<String>,
}

/// Atomic single-balance entry/exit over a connection pool.
#[derive(Clone)]
pub struct MovementService {
    pool: PgPool,
}

impl MovementService {
    /// Builds a service bound to `pool`. Each public method opens its own
    /// transaction and commits before returning.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an entry: birth, purchase, balance adjustment, or the
    /// incoming half of a composite operation.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Domain`] for any of `INVALID_QUANTITY`,
    /// `INVALID_OPERATION`, `STOCK_BALANCE_NOT_FOUND`, or
    /// `CONCURRENCY_CONFLICT`; a [`ServiceError::Db`] on a connection failure.
    pub async fn execute_entry(&self, input: EntryInput) -> Result<AnimalMovement, ServiceError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let movement = execute_entry_in_tx(&mut tx, input).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(movement)
    }

    /// Records an exit: death, sale, slaughter, donation, or the outgoing
    /// half of a composite operation.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Domain`] for any of `INVALID_QUANTITY`,
    /// `INVALID_OPERATION`, `INSUFFICIENT_STOCK`, `STOCK_BALANCE_NOT_FOUND`,
    /// or `CONCURRENCY_CONFLICT`; a [`ServiceError::Db`] on a connection failure.
    pub async fn execute_exit(&self, input: ExitInput) -> Result<AnimalMovement, ServiceError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let movement = execute_exit_in_tx(&mut tx, input).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(movement)
    }
}

/// The entry protocol, borrowing an already-open transaction so
/// `TransferService` can compose it with other calls atomically.
pub(crate) async fn execute_entry_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    input: EntryInput,
) -> Result<AnimalMovement, ServiceError> {
    require_positive(input.quantity)?;
    if classification::movement_type(input.operation_type) != MovementType::Entry {
        return Err(DomainError::InvalidOperation {
            operation: classification::label(input.operation_type),
            reason: "operation does not classify as an entry".to_string(),
        }
        .into());
    }
    require_companions(input.operation_type, None, None)?;

    let balance = balance_store::lock_for_update(tx, input.farm_id, input.animal_category_id).await?;
    let new_quantity = balance
        .current_quantity
        .checked_add(input.quantity)
        .ok_or_else(|| DomainError::InvalidOperation {
            operation: classification::label(input.operation_type),
            reason: "resulting quantity overflows the balance's integer width".to_string(),
        })?;

    let timestamp = input.timestamp.unwrap_or_else(Utc::now);
    let movement = movement_store::insert(
        tx,
        NewMovement {
            farm_stock_balance_id: balance.id,
            movement_type: MovementType::Entry,
            operation_type: input.operation_type,
            quantity: input.quantity,
            timestamp,
            related_movement_id: None,
            client_id: None,
            death_reason_id: None,
            metadata: input.metadata,
            created_by: input.actor,
            source_ip: input.source_ip,
        },
    )
    .await
    .map_err(ServiceError::from)?;

    let updated = balance_store::conditional_update(tx, balance.id, new_quantity, balance.version)
        .await
        .map_err(ServiceError::from)?;
    if !updated {
        return Err(DomainError::ConcurrencyConflict {
            farm_id: input.farm_id,
            animal_category_id: input.animal_category_id,
        }
        .into());
    }

    tracing::info!(
        farm_id = %input.farm_id,
        animal_category_id = %input.animal_category_id,
        operation = classification::label(input.operation_type),
        quantity = input.quantity,
        movement_id = %movement.id,
        "entry recorded"
    );

    Ok(movement)
}

/// The exit protocol, borrowing an already-open transaction so
/// `TransferService` can compose it with other calls atomically.
pub(crate) async fn execute_exit_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    input: ExitInput,
) -> Result<AnimalMovement, ServiceError> {
    require_positive(input.quantity)?;
    if classification::movement_type(input.operation_type) != MovementType::Exit {
        return Err(DomainError::InvalidOperation {
            operation: classification::label(input.operation_type),
            reason: "operation does not classify as an exit".to_string(),
        }
        .into());
    }
    require_companions(input.operation_type, input.client_id, input.death_reason_id)?;

    if let Some(client_id) = input.client_id {
        ensure_client_exists(tx, client_id).await?;
    }
    if let Some(death_reason_id) = input.death_reason_id {
        ensure_death_reason_exists(tx, death_reason_id).await?;
    }

    let balance = balance_store::lock_for_update(tx, input.farm_id, input.animal_category_id).await?;
    require_sufficient(
        balance.current_quantity,
        input.quantity,
        input.farm_id,
        input.animal_category_id,
    )?;

    // Re-checked defensively even though `require_sufficient` already passed:
    // the balance is locked, but staying honest about the arithmetic rather
    // than trusting the earlier check costs nothing.
    let new_quantity = match balance.current_quantity.checked_sub(input.quantity) {
        Some(value) if value >= 0 => value,
        _ => {
            return Err(DomainError::InsufficientStock {
                farm_id: input.farm_id,
                animal_category_id: input.animal_category_id,
                requested: input.quantity,
                available: balance.current_quantity,
            }
            .into())
        }
    };

    let timestamp = input.timestamp.unwrap_or_else(Utc::now);
    let movement = movement_store::insert(
        tx,
        NewMovement {
            farm_stock_balance_id: balance.id,
            movement_type: MovementType::Exit,
            operation_type: input.operation_type,
            quantity: input.quantity,
            timestamp,
            related_movement_id: None,
            client_id: input.client_id,
            death_reason_id: input.death_reason_id,
            metadata: input.metadata,
            created_by: input.actor,
            source_ip: input.source_ip,
        },
    )
    .await
    .map_err(ServiceError::from)?;

    let updated = balance_store::conditional_update(tx, balance.id, new_quantity, balance.version)
        .await
        .map_err(ServiceError::from)?;
    if !updated {
        return Err(DomainError::ConcurrencyConflict {
            farm_id: input.farm_id,
            animal_category_id: input.animal_category_id,
        }
        .into());
    }

    tracing::info!(
        farm_id = %input.farm_id,
        animal_category_id = %input.animal_category_id,
        operation = classification::label(input.operation_type),
        quantity = input.quantity,
        movement_id = %movement.id,
        "exit recorded"
    );

    Ok(movement)
}

/// Confirms a client reference resolves before it is written to the ledger,
/// rather than deferring entirely to the foreign-key constraint — giving a
/// named, classified error instead of a raw constraint-violation message.
async fn ensure_client_exists(
    tx: &mut Transaction<'_, Postgres>,
    client_id: ClientId,
) -> Result<Client, ServiceError> {
    client_store::get(tx, client_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            DomainError::InvalidOperation {
                operation: "CLIENT_LOOKUP",
                reason: format!("no client found with id {client_id}"),
            }
            .into()
        })
}

/// Confirms a death-reason reference resolves before it is written to the
/// ledger, mirroring [`ensure_client_exists`].
async fn ensure_death_reason_exists(
    tx: &mut Transaction<'_, Postgres>,
    death_reason_id: DeathReasonId,
) -> Result<DeathReason, ServiceError> {
    death_reason_store::get(tx, death_reason_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            DomainError::InvalidOperation {
                operation: "DEATH_REASON_LOOKUP",
                reason: format!("no death reason found with id {death_reason_id}"),
            }
            .into()
        })
}
