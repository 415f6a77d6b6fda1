//! Error types for the persistence and service layer.
//!
//! [`DbError`] is the closed infrastructure taxonomy — connection loss,
//! migration failure, serialization failure — at the persistence-crate
//! boundary. It never appears where a caller only expects a
//! [`livestock_domain::DomainError`]. [`ServiceError`] composes the two for
//! functions that can fail either way (every `MovementService`,
//! `TransferService`, and `ReportQueries` method): a business-rule rejection
//! surfaces as `ServiceError::Domain`, a plumbing failure as `ServiceError::Db`.

/// Infrastructure failures: connection, migration, and (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("database error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A metadata value failed to serialize or deserialize as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored enum string did not match any known Rust variant.
    ///
    /// Only reachable if the database schema and this crate's codec have
    /// drifted apart — e.g. a migration added an enum label this binary
    /// does not know about yet.
    #[error("could not decode stored value: {0}")]
    Decode(String),

    /// A configuration value was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// The combined failure mode of a transactional service call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A business-rule violation: invalid quantity, insufficient stock, a
    /// concurrency conflict, and so on.
    #[error(transparent)]
    Domain(#[from] livestock_domain::DomainError),

    /// A persistence-layer failure unrelated to business rules.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(source: sqlx::Error) -> Self {
        Self::Db(DbError::from(source))
    }
}
