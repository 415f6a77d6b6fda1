//! Classification of [`OperationType`] into direction and companion
//! requirements.
//!
//! Everything here is a closed pattern match over the enum — adding a new
//! operation means the compiler forces every function below to account for
//! it. No scattered `if operation == ...` checks live outside this module.

use livestock_types::{MovementType, OperationType};

/// Whether the operation is paired with a counterpart (transfer, category
/// change, weaning) rather than standing alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    /// No companion reference required.
    None,
    /// A client ID is required.
    Client,
    /// A death-reason ID is required.
    DeathReason,
    /// A paired movement is produced by the same composite operation.
    PairedEvent,
}

/// The total mapping from operation to movement direction.
#[must_use]
pub const fn movement_type(operation: OperationType) -> MovementType {
    match operation {
        OperationType::Birth
        | OperationType::Purchase
        | OperationType::BalanceAdjust
        | OperationType::WeaningIn
        | OperationType::TransferIn
        | OperationType::CategoryChangeIn => MovementType::Entry,

        OperationType::Death
        | OperationType::Sale
        | OperationType::Slaughter
        | OperationType::Donation
        | OperationType::WeaningOut
        | OperationType::TransferOut
        | OperationType::CategoryChangeOut => MovementType::Exit,
    }
}

/// The companion requirement for an operation, per §4.1's table.
#[must_use]
pub const fn companion_requirement(operation: OperationType) -> Companion {
    match operation {
        OperationType::Death => Companion::DeathReason,
        OperationType::Sale | OperationType::Donation => Companion::Client,
        OperationType::WeaningIn
        | OperationType::WeaningOut
        | OperationType::TransferIn
        | OperationType::TransferOut
        | OperationType::CategoryChangeIn
        | OperationType::CategoryChangeOut => Companion::PairedEvent,
        OperationType::Birth
        | OperationType::Purchase
        | OperationType::BalanceAdjust
        | OperationType::Slaughter => Companion::None,
    }
}

/// Whether `operation` requires a client reference.
#[must_use]
pub const fn requires_client(operation: OperationType) -> bool {
    matches!(companion_requirement(operation), Companion::Client)
}

/// Whether `operation` requires a death-reason reference.
#[must_use]
pub const fn requires_death_reason(operation: OperationType) -> bool {
    matches!(companion_requirement(operation), Companion::DeathReason)
}

/// A short, stable label for an operation, used in `DomainError::InvalidOperation`.
#[must_use]
pub const fn label(operation: OperationType) -> &'static str {
    match operation {
        OperationType::Birth => "BIRTH",
        OperationType::Purchase => "PURCHASE",
        OperationType::BalanceAdjust => "BALANCE_ADJUST",
        OperationType::WeaningIn => "WEANING_IN",
        OperationType::TransferIn => "TRANSFER_IN",
        OperationType::CategoryChangeIn => "CATEGORY_CHANGE_IN",
        OperationType::Death => "DEATH",
        OperationType::Sale => "SALE",
        OperationType::Slaughter => "SLAUGHTER",
        OperationType::Donation => "DONATION",
        OperationType::WeaningOut => "WEANING_OUT",
        OperationType::TransferOut => "TRANSFER_OUT",
        OperationType::CategoryChangeOut => "CATEGORY_CHANGE_OUT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_and_exits_partition_all_operations() {
        let entries = [
            OperationType::Birth,
            OperationType::Purchase,
            OperationType::BalanceAdjust,
            OperationType::WeaningIn,
            OperationType::TransferIn,
            OperationType::CategoryChangeIn,
        ];
        let exits = [
            OperationType::Death,
            OperationType::Sale,
            OperationType::Slaughter,
            OperationType::Donation,
            OperationType::WeaningOut,
            OperationType::TransferOut,
            OperationType::CategoryChangeOut,
        ];
        for op in entries {
            assert_eq!(movement_type(op), MovementType::Entry);
        }
        for op in exits {
            assert_eq!(movement_type(op), MovementType::Exit);
        }
    }

    #[test]
    fn death_requires_death_reason_only() {
        assert!(requires_death_reason(OperationType::Death));
        assert!(!requires_client(OperationType::Death));
    }

    #[test]
    fn sale_and_donation_require_client_only() {
        assert!(requires_client(OperationType::Sale));
        assert!(requires_client(OperationType::Donation));
        assert!(!requires_death_reason(OperationType::Sale));
    }

    #[test]
    fn paired_operations_require_no_direct_companion() {
        assert!(!requires_client(OperationType::TransferOut));
        assert!(!requires_death_reason(OperationType::WeaningIn));
        assert_eq!(
            companion_requirement(OperationType::CategoryChangeOut),
            Companion::PairedEvent
        );
    }
}
