//! Persistence for the append-only `animal_movements` ledger table.
//!
//! Every function here either inserts a new row or reads existing ones —
//! there is no update or delete path, matching the ledger-immutability
//! invariant enforced one layer up by `MovementService`.

use chrono::{DateTime, Utc};
use livestock_types::{
    AnimalMovement, AnimalMovementId, AnimalCategoryId, ClientId, DeathReasonId, FarmId,
    FarmStockBalanceId, Metadata, MovementType, OperationType, UserId,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::codec::{movement_type_from_db, movement_type_to_db, operation_type_from_db, operation_type_to_db};
use crate::error::DbError;

/// The fields needed to append one ledger row. Constructed by
/// `MovementService`, never by a caller directly.
pub(crate) struct NewMovement {
    pub(crate) farm_stock_balance_id: FarmStockBalanceId,
    pub(crate) movement_type: MovementType,
    pub(crate) operation_type: OperationType,
    pub(crate) quantity: i32,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) related_movement_id: Option<AnimalMovementId>,
    pub(crate) client_id: Option<ClientId>,
    pub(crate) death_reason_id: Option<DeathReasonId>,
    pub(crate) metadata: Metadata,
    pub(crate) created_by: UserId,
    pub(crate) source_ip: Option<String>,
}

/// A raw `animal_movements` row.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MovementRow {
    id: Uuid,
    farm_stock_balance_id: Uuid,
    movement_type: String,
    operation_type: String,
    quantity: i32,
    timestamp: DateTime<Utc>,
    related_movement_id: Option<Uuid>,
    client_id: Option<Uuid>,
    death_reason_id: Option<Uuid>,
    metadata: serde_json::Value,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    source_ip: Option<String>,
}

impl MovementRow {
    fn into_domain(self) -> Result<AnimalMovement, DbError> {
        Ok(AnimalMovement {
            id: self.id.into(),
            farm_stock_balance_id: self.farm_stock_balance_id.into(),
            movement_type: movement_type_from_db(&self.movement_type)?,
            operation_type: operation_type_from_db(&self.operation_type)?,
            quantity: self.quantity,
            timestamp: self.timestamp,
            related_movement_id: self.related_movement_id.map(Into::into),
            client_id: self.client_id.map(Into::into),
            death_reason_id: self.death_reason_id.map(Into::into),
            metadata: serde_json::from_value(self.metadata)?,
            created_by: self.created_by.into(),
            created_at: self.created_at,
            source_ip: self.source_ip,
        })
    }
}

const SELECT_COLUMNS: &str = "id, farm_stock_balance_id, movement_type::TEXT as movement_type, \
    operation_type::TEXT as operation_type, quantity, timestamp, related_movement_id, client_id, \
    death_reason_id, metadata, created_by, created_at, source_ip";

/// Appends one ledger row. The append is unconditional — the ledger is the
/// witness of what happened, and this function never rejects on business
/// grounds (that validation already happened in `MovementService`).
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    new: NewMovement,
) -> Result<AnimalMovement, DbError> {
    let id = AnimalMovementId::new();
    let metadata_json = serde_json::to_value(&new.metadata)?;

    let row = sqlx::query_as::<_, MovementRow>(&format!(
        r"INSERT INTO animal_movements
            (id, farm_stock_balance_id, movement_type, operation_type, quantity, timestamp,
             related_movement_id, client_id, death_reason_id, metadata, created_by, created_at, source_ip)
          VALUES ($1, $2, $3::movement_type, $4::operation_type, $5, $6, $7, $8, $9, $10, $11, now(), $12)
          RETURNING {SELECT_COLUMNS}"
    ))
    .bind(Uuid::from(id))
    .bind(Uuid::from(new.farm_stock_balance_id))
    .bind(movement_type_to_db(new.movement_type))
    .bind(operation_type_to_db(new.operation_type))
    .bind(new.quantity)
    .bind(new.timestamp)
    .bind(new.related_movement_id.map(Uuid::from))
    .bind(new.client_id.map(Uuid::from))
    .bind(new.death_reason_id.map(Uuid::from))
    .bind(metadata_json)
    .bind(Uuid::from(new.created_by))
    .bind(new.source_ip)
    .fetch_one(&mut **tx)
    .await?;

    row.into_domain()
}

/// Ledger rows for `(farm, category)` whose timestamp falls in the inclusive
/// range `[start, end]`, ordered by timestamp ascending.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure or a stored enum that no
/// longer decodes.
pub(crate) async fn period_movements(
    pool: &PgPool,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<AnimalMovement>, DbError> {
    let rows = sqlx::query_as::<_, MovementRow>(&format!(
        r"SELECT m.{SELECT_COLUMNS}
          FROM animal_movements m
          JOIN farm_stock_balances b ON b.id = m.farm_stock_balance_id
          WHERE b.farm_id = $1 AND b.animal_category_id = $2
            AND m.timestamp >= $3 AND m.timestamp <= $4
          ORDER BY m.timestamp ASC"
    ))
    .bind(Uuid::from(farm_id))
    .bind(Uuid::from(animal_category_id))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(MovementRow::into_domain).collect()
}

/// Ledger rows for `(farm, category)` with timestamp strictly before `before`.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure or a stored enum that no
/// longer decodes.
pub(crate) async fn pre_period_movements(
    pool: &PgPool,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
    before: DateTime<Utc>,
) -> Result<Vec<AnimalMovement>, DbError> {
    let rows = sqlx::query_as::<_, MovementRow>(&format!(
        r"SELECT m.{SELECT_COLUMNS}
          FROM animal_movements m
          JOIN farm_stock_balances b ON b.id = m.farm_stock_balance_id
          WHERE b.farm_id = $1 AND b.animal_category_id = $2 AND m.timestamp < $3
          ORDER BY m.timestamp ASC"
    ))
    .bind(Uuid::from(farm_id))
    .bind(Uuid::from(animal_category_id))
    .bind(before)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(MovementRow::into_domain).collect()
}

/// Whether [`signed_sum`]'s `upper_bound` includes movements at exactly that
/// instant. `opening_stock` needs movements strictly before the period
/// starts; `reconcile` needs everything at or before `as_of` (or everything,
/// when `as_of` is `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SumBound {
    /// `m.timestamp < upper_bound`.
    Exclusive,
    /// `m.timestamp <= upper_bound`.
    Inclusive,
}

/// The signed sum of ledger quantities for `(farm, category)`, optionally
/// bounded to `upper_bound` per `bound`'s inclusivity. Entries contribute
/// positively, exits negatively — this is the `reconcile` primitive and the
/// building block for opening/closing stock.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn signed_sum(
    pool: &PgPool,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
    upper_bound: Option<DateTime<Utc>>,
    bound: SumBound,
) -> Result<i32, DbError> {
    let comparison = match bound {
        SumBound::Exclusive => "m.timestamp < $3",
        SumBound::Inclusive => "m.timestamp <= $3",
    };
    let query = format!(
        r"SELECT SUM(
              CASE WHEN m.movement_type = 'entry' THEN m.quantity ELSE -m.quantity END
          )
          FROM animal_movements m
          JOIN farm_stock_balances b ON b.id = m.farm_stock_balance_id
          WHERE b.farm_id = $1 AND b.animal_category_id = $2
            AND ($3::timestamptz IS NULL OR {comparison})"
    );
    let total: Option<i64> = sqlx::query_scalar(&query)
        .bind(Uuid::from(farm_id))
        .bind(Uuid::from(animal_category_id))
        .bind(upper_bound)
        .fetch_one(pool)
        .await?;

    let clamped = total
        .unwrap_or(0)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    Ok(i32::try_from(clamped).unwrap_or(0))
}

/// Aggregate entry/exit counts over an optional filtered range.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn movement_statistics(
    pool: &PgPool,
    farm_id: FarmId,
    animal_category_id: Option<AnimalCategoryId>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<livestock_types::MovementStatistics, DbError> {
    #[derive(sqlx::FromRow)]
    struct StatsRow {
        total_entries: Option<i64>,
        total_exits: Option<i64>,
        movement_count: i64,
    }

    let row = sqlx::query_as::<_, StatsRow>(
        r"SELECT
              SUM(CASE WHEN m.movement_type = 'entry' THEN m.quantity ELSE 0 END) AS total_entries,
              SUM(CASE WHEN m.movement_type = 'exit' THEN m.quantity ELSE 0 END) AS total_exits,
              COUNT(*) AS movement_count
          FROM animal_movements m
          JOIN farm_stock_balances b ON b.id = m.farm_stock_balance_id
          WHERE b.farm_id = $1
            AND ($2::uuid IS NULL OR b.animal_category_id = $2)
            AND ($3::timestamptz IS NULL OR m.timestamp >= $3)
            AND ($4::timestamptz IS NULL OR m.timestamp <= $4)",
    )
    .bind(Uuid::from(farm_id))
    .bind(animal_category_id.map(Uuid::from))
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    let clamp_i32 = |value: i64| i32::try_from(value.clamp(0, i64::from(i32::MAX))).unwrap_or(0);
    let total_entries = clamp_i32(row.total_entries.unwrap_or(0));
    let total_exits = clamp_i32(row.total_exits.unwrap_or(0));

    Ok(livestock_types::MovementStatistics {
        total_entries,
        total_exits,
        net: total_entries.saturating_sub(total_exits),
        movement_count: row.movement_count,
    })
}
