//! The closed domain error taxonomy.
//!
//! Every failure mode `MovementService`/`TransferService` can produce maps to
//! exactly one of these seven variants, each carrying a stable string code
//! for callers that need to branch on error identity rather than match the
//! Rust type directly (e.g. an HTTP layer translating to a status code).

use livestock_types::{AnimalCategoryId, FarmId};

/// A violation of a ledger invariant or a caller contract.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Quantity is zero, negative, or otherwise not a strictly positive integer.
    #[error("invalid quantity: {quantity} (must be a strictly positive integer)")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i32,
    },

    /// An exit would drive the balance negative.
    #[error(
        "insufficient stock on farm {farm_id} for category {animal_category_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The farm involved.
        farm_id: FarmId,
        /// The category involved.
        animal_category_id: AnimalCategoryId,
        /// The quantity requested for exit.
        requested: i32,
        /// The quantity actually available.
        available: i32,
    },

    /// No balance row exists for the given `(farm, category)` pair.
    #[error("no stock balance found for farm {farm_id} and category {animal_category_id}")]
    StockBalanceNotFound {
        /// The farm involved.
        farm_id: FarmId,
        /// The category involved.
        animal_category_id: AnimalCategoryId,
    },

    /// The optimistic version check found the balance row had already moved.
    #[error("concurrent update detected on farm {farm_id} category {animal_category_id}; retry")]
    ConcurrencyConflict {
        /// The farm involved.
        farm_id: FarmId,
        /// The category involved.
        animal_category_id: AnimalCategoryId,
    },

    /// A direction mismatch, a missing companion, or equal source/target was supplied.
    #[error("invalid operation '{operation}': {reason}")]
    InvalidOperation {
        /// A short label for the operation that was rejected.
        operation: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A system category required by the weaning rule table is missing.
    #[error(
        "system category with slug '{slug}' not found; run the reference-data seeder before weaning"
    )]
    WeaningCategoryNotFound {
        /// The missing slug.
        slug: &'static str,
    },

    /// An attempt was made to update or delete a persisted movement.
    #[error("movement {0} is immutable once persisted")]
    LedgerImmutable(livestock_types::AnimalMovementId),
}

impl DomainError {
    /// The stable error code, matching the taxonomy's public contract.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::StockBalanceNotFound { .. } => "STOCK_BALANCE_NOT_FOUND",
            Self::ConcurrencyConflict { .. } => "CONCURRENCY_CONFLICT",
            Self::InvalidOperation { .. } => "INVALID_OPERATION",
            Self::WeaningCategoryNotFound { .. } => "WEANING_CATEGORY_NOT_FOUND",
            Self::LedgerImmutable(_) => "LEDGER_IMMUTABLE",
        }
    }

    /// Whether a caller may reasonably retry the operation that raised this error.
    ///
    /// Only a version conflict is locally recoverable; every other variant
    /// indicates a data setup error or a programming error upstream.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let err = DomainError::InvalidQuantity { quantity: 0 };
        assert_eq!(err.code(), "INVALID_QUANTITY");
        assert!(!err.is_retryable());
    }

    #[test]
    fn only_concurrency_conflict_is_retryable() {
        let err = DomainError::ConcurrencyConflict {
            farm_id: FarmId::new(),
            animal_category_id: AnimalCategoryId::new(),
        };
        assert!(err.is_retryable());
    }
}
