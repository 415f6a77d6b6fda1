//! Shared type definitions for the livestock inventory ledger.
//!
//! This crate is the single source of truth for the ledger's vocabulary:
//! identifiers, enumerations, and entity structs. It carries no business
//! logic — validation and classification live in `livestock-domain`.
//!
//! # Modules
//!
//! - [`ids`] -- type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- `MovementType` and `OperationType`
//! - [`structs`] -- entity structs (Farm, `AnimalCategory`, balances, movements)
//! - [`system_categories`] -- the nine reserved system-category definitions

pub mod enums;
pub mod ids;
pub mod structs;
pub mod system_categories;

pub use enums::{MovementType, OperationType};
pub use ids::{
    AnimalCategoryId, AnimalMovementId, ClientId, DeathReasonId, FarmId, FarmStockBalanceId,
    UserId,
};
pub use structs::{
    Actor, AnimalCategory, AnimalMovement, Client, ConsistencyReport, DeathReason, Farm,
    FarmStockBalance, META_COUNTERPART_CATEGORY, META_COUNTERPART_FARM, META_TRANSFER_KIND,
    Metadata, MovementStatistics,
};
