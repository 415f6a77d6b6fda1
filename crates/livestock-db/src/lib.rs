//! Persistence and transactional service layer for the livestock inventory
//! ledger, backed by `PostgreSQL`.
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool construction and migration running
//! - [`config`] -- layered configuration (YAML + env + defaults)
//! - [`error`] -- infrastructure and combined service error types
//! - [`codec`] -- conversions between Rust enums and their stored text form
//! - [`balance_store`], [`category_store`], [`client_store`],
//!   [`death_reason_store`], [`movement_store`] -- table-scoped persistence,
//!   each converting a private row type into the public domain struct
//! - [`movement_service`] -- atomic single-balance entry/exit
//! - [`transfer_service`] -- composite transfer, category change, and weaning
//! - [`report_queries`] -- read-only historical reconstruction
//! - [`signals`] -- balance cross-product materialization on farm/category creation
//! - [`seed`] -- idempotent system-category seeding

pub(crate) mod balance_store;
pub(crate) mod category_store;
pub(crate) mod client_store;
pub(crate) mod codec;
pub mod config;
pub(crate) mod death_reason_store;
pub mod error;
pub mod movement_service;
pub(crate) mod movement_store;
pub mod postgres;
pub mod report_queries;
pub mod seed;
pub mod signals;
pub mod transfer_service;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig};
pub use error::{DbError, ServiceError};
pub use movement_service::{EntryInput, ExitInput, MovementService};
pub use postgres::{PostgresConfig, PostgresPool};
pub use report_queries::ReportQueries;
pub use seed::SeedSummary;
pub use signals::BalancesMaterialized;
pub use transfer_service::TransferService;
