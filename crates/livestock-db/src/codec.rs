//! String codecs between the ledger's Rust enums and their `PostgreSQL` enum
//! columns (`movement_type`, `operation_type`).
//!
//! Columns are declared as native Postgres enum types in the migrations and
//! read back with an explicit `::TEXT` cast, matching the rest of the
//! workspace's preference for runtime-checked queries over compile-time ones.

use livestock_types::{MovementType, OperationType};

use crate::error::DbError;

/// The stored label for a movement direction.
pub(crate) const fn movement_type_to_db(value: MovementType) -> &'static str {
    match value {
        MovementType::Entry => "entry",
        MovementType::Exit => "exit",
    }
}

/// Parses a stored movement-direction label.
///
/// # Errors
///
/// Returns [`DbError::Decode`] if `value` is not one of the two known labels.
pub(crate) fn movement_type_from_db(value: &str) -> Result<MovementType, DbError> {
    match value {
        "entry" => Ok(MovementType::Entry),
        "exit" => Ok(MovementType::Exit),
        other => Err(DbError::Decode(format!("unknown movement_type '{other}'"))),
    }
}

/// The stored label for an operation.
pub(crate) const fn operation_type_to_db(value: OperationType) -> &'static str {
    match value {
        OperationType::Birth => "birth",
        OperationType::Purchase => "purchase",
        OperationType::BalanceAdjust => "balance_adjust",
        OperationType::WeaningIn => "weaning_in",
        OperationType::TransferIn => "transfer_in",
        OperationType::CategoryChangeIn => "category_change_in",
        OperationType::Death => "death",
        OperationType::Sale => "sale",
        OperationType::Slaughter => "slaughter",
        OperationType::Donation => "donation",
        OperationType::WeaningOut => "weaning_out",
        OperationType::TransferOut => "transfer_out",
        OperationType::CategoryChangeOut => "category_change_out",
    }
}

/// Parses a stored operation label.
///
/// # Errors
///
/// Returns [`DbError::Decode`] if `value` is not one of the thirteen known labels.
pub(crate) fn operation_type_from_db(value: &str) -> Result<OperationType, DbError> {
    match value {
        "birth" => Ok(OperationType::Birth),
        "purchase" => Ok(OperationType::Purchase),
        "balance_adjust" => Ok(OperationType::BalanceAdjust),
        "weaning_in" => Ok(OperationType::WeaningIn),
        "transfer_in" => Ok(OperationType::TransferIn),
        "category_change_in" => Ok(OperationType::CategoryChangeIn),
        "death" => Ok(OperationType::Death),
        "sale" => Ok(OperationType::Sale),
        "slaughter" => Ok(OperationType::Slaughter),
        "donation" => Ok(OperationType::Donation),
        "weaning_out" => Ok(OperationType::WeaningOut),
        "transfer_out" => Ok(OperationType::TransferOut),
        "category_change_out" => Ok(OperationType::CategoryChangeOut),
        other => Err(DbError::Decode(format!("unknown operation_type '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_round_trips() {
        for mt in [MovementType::Entry, MovementType::Exit] {
            let encoded = movement_type_to_db(mt);
            assert_eq!(movement_type_from_db(encoded).unwrap_or(MovementType::Entry), mt);
        }
    }

    #[test]
    fn unknown_movement_type_is_decode_error() {
        assert!(movement_type_from_db("sideways").is_err());
    }

    #[test]
    fn operation_type_round_trips() {
        let ops = [
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
        for op in ops {
            let encoded = operation_type_to_db(op);
            assert_eq!(
                operation_type_from_db(encoded).unwrap_or(OperationType::Birth),
                op
            );
        }
    }
}
