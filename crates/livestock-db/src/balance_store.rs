//! Persistence for the `farm_stock_balances` table — the consolidated
//! snapshot `MovementService` mutates under lock and `ReportQueries` reads
//! for operator-facing summaries.

use chrono::{DateTime, Utc};
use livestock_types::{AnimalCategory, AnimalCategoryId, FarmId, FarmStockBalance};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{DbError, ServiceError};

/// A raw `farm_stock_balances` row, decoded before its UUID columns are
/// wrapped in their typed identifiers.
#[derive(Debug, Clone, sqlx::FromRow)]
struct BalanceRow {
    id: Uuid,
    farm_id: Uuid,
    animal_category_id: Uuid,
    current_quantity: i32,
    version: i32,
    updated_at: DateTime<Utc>,
}

impl From<BalanceRow> for FarmStockBalance {
    fn from(row: BalanceRow) -> Self {
        Self {
            id: row.id.into(),
            farm_id: row.farm_id.into(),
            animal_category_id: row.animal_category_id.into(),
            current_quantity: row.current_quantity,
            version: row.version,
            updated_at: row.updated_at,
        }
    }
}

/// Locks the `(farm, category)` balance row for the remainder of the
/// transaction.
///
/// # Errors
///
/// Returns [`livestock_domain::DomainError::StockBalanceNotFound`] if no row
/// exists for the pair, or [`DbError`] on a connection failure.
pub(crate) async fn lock_for_update(
    tx: &mut Transaction<'_, Postgres>,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
) -> Result<FarmStockBalance, ServiceError> {
    let row = sqlx::query_as::<_, BalanceRow>(
        r"SELECT id, farm_id, animal_category_id, current_quantity, version, updated_at
          FROM farm_stock_balances
          WHERE farm_id = $1 AND animal_category_id = $2
          FOR UPDATE",
    )
    .bind(Uuid::from(farm_id))
    .bind(Uuid::from(animal_category_id))
    .fetch_optional(&mut **tx)
    .await
    .map_err(DbError::from)?;

    row.map(FarmStockBalance::from).ok_or_else(|| {
        livestock_domain::DomainError::StockBalanceNotFound {
            farm_id,
            animal_category_id,
        }
        .into()
    })
}

/// Reads the `(farm, category)` balance without locking, for read-only
/// reporting paths that never mutate it.
///
/// # Errors
///
/// Returns [`livestock_domain::DomainError::StockBalanceNotFound`] if no row
/// exists, or [`DbError`] on a connection failure.
pub(crate) async fn read(
    pool: &PgPool,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
) -> Result<FarmStockBalance, ServiceError> {
    let row = sqlx::query_as::<_, BalanceRow>(
        r"SELECT id, farm_id, animal_category_id, current_quantity, version, updated_at
          FROM farm_stock_balances
          WHERE farm_id = $1 AND animal_category_id = $2",
    )
    .bind(Uuid::from(farm_id))
    .bind(Uuid::from(animal_category_id))
    .fetch_optional(pool)
    .await
    .map_err(DbError::from)?;

    row.map(FarmStockBalance::from).ok_or_else(|| {
        livestock_domain::DomainError::StockBalanceNotFound {
            farm_id,
            animal_category_id,
        }
        .into()
    })
}

/// Applies the version-guarded conditional update at the heart of the
/// ledger's concurrency protocol.
///
/// Returns `true` if exactly one row matched and was updated, `false` if the
/// `version` predicate found no match (meaning another transaction already
/// advanced it) — the caller maps `false` onto `CONCURRENCY_CONFLICT`.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn conditional_update(
    tx: &mut Transaction<'_, Postgres>,
    id: livestock_types::FarmStockBalanceId,
    new_quantity: i32,
    observed_version: i32,
) -> Result<bool, DbError> {
    let next_version = observed_version.checked_add(1).unwrap_or(observed_version);
    let result = sqlx::query(
        r"UPDATE farm_stock_balances
          SET current_quantity = $1, version = $2, updated_at = now()
          WHERE id = $3 AND version = $4",
    )
    .bind(new_quantity)
    .bind(next_version)
    .bind(Uuid::from(id))
    .bind(observed_version)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Creates a zero-quantity balance row for `(farm, category)` if one does not
/// already exist. Idempotent by design — backs both the initialization
/// signals and the reference-data seeder.
///
/// Returns `true` if a row was created.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn create_if_missing(
    tx: &mut Transaction<'_, Postgres>,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        r"INSERT INTO farm_stock_balances (id, farm_id, animal_category_id, current_quantity, version, updated_at)
          VALUES ($1, $2, $3, 0, 0, now())
          ON CONFLICT (farm_id, animal_category_id) DO NOTHING",
    )
    .bind(Uuid::from(livestock_types::FarmStockBalanceId::new()))
    .bind(Uuid::from(farm_id))
    .bind(Uuid::from(animal_category_id))
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// The current balance for every active category on one farm, for
/// operator-facing summaries.
///
/// A category joined with its balance on one farm, for [`farm_stock_summary`].
#[derive(Debug, Clone, sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    slug: Option<String>,
    is_system: bool,
    is_active: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    current_quantity: i32,
}

/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn farm_stock_summary(
    pool: &PgPool,
    farm_id: FarmId,
) -> Result<Vec<(AnimalCategory, i32)>, DbError> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        r"SELECT c.id, c.name, c.description, c.slug, c.is_system, c.is_active, c.display_order, c.created_at,
                 b.current_quantity
          FROM animal_categories c
          JOIN farm_stock_balances b ON b.animal_category_id = c.id
          WHERE b.farm_id = $1 AND c.is_active = true
          ORDER BY c.display_order, c.name",
    )
    .bind(Uuid::from(farm_id))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let category = AnimalCategory {
                id: row.id.into(),
                name: row.name,
                description: row.description,
                slug: row.slug,
                is_system: row.is_system,
                display_order: row.display_order,
                is_active: row.is_active,
                created_at: row.created_at,
            };
            (category, row.current_quantity)
        })
        .collect())
}
