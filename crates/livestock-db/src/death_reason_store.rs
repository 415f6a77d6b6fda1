//! Read access to the `death_reasons` reference table.
//!
//! Death reasons are owned by an external module (out of this crate's
//! scope); the ledger only resolves references to confirm they exist before
//! a death is recorded.

use livestock_types::{DeathReason, DeathReasonId};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
struct DeathReasonRow {
    id: Uuid,
    name: String,
}

impl From<DeathReasonRow> for DeathReason {
    fn from(row: DeathReasonRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
        }
    }
}

/// Looks up a death reason by ID.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn get(
    tx: &mut Transaction<'_, Postgres>,
    id: DeathReasonId,
) -> Result<Option<DeathReason>, DbError> {
    let row = sqlx::query_as::<_, DeathReasonRow>("SELECT id, name FROM death_reasons WHERE id = $1")
        .bind(Uuid::from(id))
        .fetch_optional(&mut **tx)
        .await?;

    Ok(row.map(DeathReason::from))
}
