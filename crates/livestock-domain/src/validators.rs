//! Pure, side-effect-free invariant validators.
//!
//! None of these functions touch the database; they only inspect the values
//! a caller supplied and return the classified `DomainError` on violation.

use livestock_types::{AnimalCategoryId, ClientId, DeathReasonId, FarmId, OperationType};

use crate::classification::{self, Companion};
use crate::error::DomainError;

/// Fails `INVALID_QUANTITY` unless `quantity` is a strictly positive integer.
pub const fn require_positive(quantity: i32) -> Result<(), DomainError> {
    if quantity > 0 {
        Ok(())
    } else {
        Err(DomainError::InvalidQuantity { quantity })
    }
}

/// Fails `INSUFFICIENT_STOCK` when `requested` exceeds `available`.
pub fn require_sufficient(
    available: i32,
    requested: i32,
    farm_id: FarmId,
    animal_category_id: AnimalCategoryId,
) -> Result<(), DomainError> {
    if requested > available {
        Err(DomainError::InsufficientStock {
            farm_id,
            animal_category_id,
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

/// Fails `INVALID_OPERATION` when a required companion reference is missing.
pub fn require_companions(
    operation: OperationType,
    client_id: Option<ClientId>,
    death_reason_id: Option<DeathReasonId>,
) -> Result<(), DomainError> {
    match classification::companion_requirement(operation) {
        Companion::Client if client_id.is_none() => Err(DomainError::InvalidOperation {
            operation: classification::label(operation),
            reason: "requires a client reference".to_string(),
        }),
        Companion::DeathReason if death_reason_id.is_none() => {
            Err(DomainError::InvalidOperation {
                operation: classification::label(operation),
                reason: "requires a death reason reference".to_string(),
            })
        }
        Companion::None | Companion::Client | Companion::DeathReason | Companion::PairedEvent => {
            Ok(())
        }
    }
}

/// Fails `INVALID_OPERATION` unless both farms are present and distinct.
pub fn require_transfer_params(source_farm: FarmId, target_farm: FarmId) -> Result<(), DomainError> {
    if source_farm == target_farm {
        Err(DomainError::InvalidOperation {
            operation: "TRANSFER",
            reason: "source and target farm must differ".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Fails `INVALID_OPERATION` unless both categories are present and distinct.
pub fn require_category_change_params(
    source_category: AnimalCategoryId,
    target_category: AnimalCategoryId,
) -> Result<(), DomainError> {
    if source_category == target_category {
        Err(DomainError::InvalidOperation {
            operation: "CATEGORY_CHANGE",
            reason: "source and target category must differ".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Fails `INVALID_OPERATION` unless both quantities are non-negative and at
/// least one is strictly positive. `farm_id` is accepted for symmetry with
/// the other `require_*` signatures and to keep the error message farm-scoped.
pub fn require_weaning_params(
    _farm_id: FarmId,
    quantity_males: i32,
    quantity_females: i32,
) -> Result<(), DomainError> {
    if quantity_males < 0 || quantity_females < 0 {
        return Err(DomainError::InvalidOperation {
            operation: "WEANING",
            reason: "quantities must be non-negative".to_string(),
        });
    }
    if quantity_males == 0 && quantity_females == 0 {
        return Err(DomainError::InvalidOperation {
            operation: "WEANING",
            reason: "at least one of quantity_males/quantity_females must be positive"
                .to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_quantity_passes() {
        assert!(require_positive(1).is_ok());
    }

    #[test]
    fn zero_and_negative_quantity_fail() {
        assert!(require_positive(0).is_err());
        assert!(require_positive(-1).is_err());
    }

    #[test]
    fn sufficient_stock_passes_at_exact_balance() {
        let farm = FarmId::new();
        let cat = AnimalCategoryId::new();
        assert!(require_sufficient(10, 10, farm, cat).is_ok());
    }

    #[test]
    fn insufficient_stock_fails_over_balance() {
        let farm = FarmId::new();
        let cat = AnimalCategoryId::new();
        let err = require_sufficient(20, 21, farm, cat).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
    }

    #[test]
    fn death_without_reason_fails() {
        let err = require_companions(OperationType::Death, None, None).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERATION");
    }

    #[test]
    fn sale_with_client_passes() {
        assert!(require_companions(OperationType::Sale, Some(ClientId::new()), None).is_ok());
    }

    #[test]
    fn transfer_requires_distinct_farms() {
        let farm = FarmId::new();
        assert!(require_transfer_params(farm, farm).is_err());
        assert!(require_transfer_params(farm, FarmId::new()).is_ok());
    }

    #[test]
    fn weaning_requires_at_least_one_positive_quantity() {
        let farm = FarmId::new();
        assert!(require_weaning_params(farm, 0, 0).is_err());
        assert!(require_weaning_params(farm, 1, 0).is_ok());
        assert!(require_weaning_params(farm, -1, 0).is_err());
    }
}
