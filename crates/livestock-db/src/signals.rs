//! Initialization signals: materializing the balance cross-product.
//!
//! These are explicit functions invoked by the code path that creates a farm
//! or category — an application-level post-commit callback, never an
//! implicit database trigger or ORM signal. Both are `CREATE IF NOT EXISTS`
//! in semantics: idempotent, safe to re-run, and never alter an existing row.

use livestock_types::{AnimalCategoryId, FarmId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::{balance_store, category_store};

/// Summary of how many balance rows a signal materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancesMaterialized {
    /// Number of rows newly created by this call.
    pub created: u32,
    /// Number of rows that already existed and were left untouched.
    pub already_present: u32,
}

/// Call on creation of a new farm: for every active category, create a
/// zero-quantity balance row if one does not already exist.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub async fn on_farm_created(pool: &PgPool, farm_id: FarmId) -> Result<BalancesMaterialized, DbError> {
    let mut tx = pool.begin().await?;
    let category_ids = category_store::list_active_ids(&mut tx).await?;

    let mut created = 0u32;
    let mut already_present = 0u32;
    for category_id in category_ids {
        if balance_store::create_if_missing(&mut tx, farm_id, category_id).await? {
            created = created.saturating_add(1);
        } else {
            already_present = already_present.saturating_add(1);
        }
    }

    tx.commit().await?;

    tracing::info!(
        farm_id = %farm_id,
        created,
        already_present,
        "farm creation signal materialized balances"
    );

    Ok(BalancesMaterialized {
        created,
        already_present,
    })
}

/// Call on creation of a new category: for every active farm, create a
/// zero-quantity balance row if one does not already exist.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub async fn on_category_created(
    pool: &PgPool,
    animal_category_id: AnimalCategoryId,
) -> Result<BalancesMaterialized, DbError> {
    let mut tx = pool.begin().await?;
    let farm_ids = category_store::list_active_farm_ids(&mut tx).await?;

    let mut created = 0u32;
    let mut already_present = 0u32;
    for farm_id in farm_ids {
        if balance_store::create_if_missing(&mut tx, farm_id, animal_category_id).await? {
            created = created.saturating_add(1);
        } else {
            already_present = already_present.saturating_add(1);
        }
    }

    tx.commit().await?;

    tracing::info!(
        animal_category_id = %animal_category_id,
        created,
        already_present,
        "category creation signal materialized balances"
    );

    Ok(BalancesMaterialized {
        created,
        already_present,
    })
}
