//! Pure business-rule layer for the livestock inventory ledger.
//!
//! Nothing here touches a database, a clock, or the filesystem — this crate
//! has no `sqlx`/`tokio` dependency by design. `livestock-db` calls into
//! these functions from inside its transactions and maps their outcomes onto
//! persisted rows.
//!
//! # Modules
//!
//! - [`classification`] -- closed pattern-matching predicates over `OperationType`
//! - [`validators`] -- pure invariant checks, each returning a classified [`DomainError`]
//! - [`error`] -- the closed domain error taxonomy
//! - [`weaning`] -- the fixed calf-promotion rule table

pub mod classification;
pub mod error;
pub mod validators;
pub mod weaning;

pub use classification::Companion;
pub use error::DomainError;
pub use weaning::WeaningPair;
