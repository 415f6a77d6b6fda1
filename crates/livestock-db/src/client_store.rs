//! Read access to the `clients` reference table.
//!
//! Clients are owned by an external module (out of this crate's scope); the
//! ledger only resolves references to confirm they exist before a sale or
//! donation is recorded.

use livestock_types::{Client, ClientId};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
        }
    }
}

/// Looks up a client by ID.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn get(
    tx: &mut Transaction<'_, Postgres>,
    id: ClientId,
) -> Result<Option<Client>, DbError> {
    let row = sqlx::query_as::<_, ClientRow>("SELECT id, name FROM clients WHERE id = $1")
        .bind(Uuid::from(id))
        .fetch_optional(&mut **tx)
        .await?;

    Ok(row.map(Client::from))
}
