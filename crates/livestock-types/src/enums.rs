//! Enumeration types for the livestock inventory ledger.
//!
//! `MovementType` and `OperationType` are the closed sum types every ledger
//! row carries. Classification of an `OperationType` (direction, required
//! companions) lives in `livestock-domain`, not here — this crate only
//! defines the vocabulary, it does not judge it.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Movement direction
// ---------------------------------------------------------------------------

/// The fundamental direction of a ledger movement.
///
/// `Entry` increases a balance (birth, purchase, incoming transfer).
/// `Exit` decreases a balance (death, sale, outgoing transfer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Increases the balance.
    Entry,
    /// Decreases the balance.
    Exit,
}

// ---------------------------------------------------------------------------
// Operation type
// ---------------------------------------------------------------------------

/// The specific business operation that produced a movement.
///
/// Exactly thirteen members: six entries and seven exits. See
/// `livestock_domain::classification` for the direction and
/// companion-requirement predicates over this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperationType {
    // --- Entries ---
    /// A calf born on the farm.
    Birth,
    /// Animals purchased from an external source.
    Purchase,
    /// Manual correction to reconcile a known discrepancy.
    BalanceAdjust,
    /// Incoming half of a weaning category change.
    WeaningIn,
    /// Incoming half of an inter-farm transfer.
    TransferIn,
    /// Incoming half of a within-farm category change.
    CategoryChangeIn,

    // --- Exits ---
    /// An animal died.
    Death,
    /// Animals sold to a client.
    Sale,
    /// Animals sent to slaughter.
    Slaughter,
    /// Animals donated to a client.
    Donation,
    /// Outgoing half of a weaning category change.
    WeaningOut,
    /// Outgoing half of an inter-farm transfer.
    TransferOut,
    /// Outgoing half of a within-farm category change.
    CategoryChangeOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_type_has_exactly_thirteen_members() {
        // Thirteen enum-level operation kinds; the domain crate further
        // validates that each maps to exactly one MovementType.
        let all = [
            OperationType::Birth,
            OperationType::Purchase,
            OperationType::BalanceAdjust,
            OperationType::WeaningIn,
            OperationType::TransferIn,
            OperationType::CategoryChangeIn,
            OperationType::Death,
            OperationType::Sale,
            OperationType::Slaughter,
            OperationType::Donation,
            OperationType::WeaningOut,
            OperationType::TransferOut,
            OperationType::CategoryChangeOut,
        ];
        assert_eq!(all.len(), 13);
    }

    #[test]
    fn movement_type_roundtrip_serde() {
        let json = serde_json::to_string(&MovementType::Entry).unwrap_or_default();
        let restored: Result<MovementType, _> = serde_json::from_str(&json);
        assert_eq!(restored.ok(), Some(MovementType::Entry));
    }
}
