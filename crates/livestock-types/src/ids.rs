//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the ledger has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. All IDs use UUID v7 (time-ordered)
//! for efficient database indexing.
//!
//! The `new()` constructors exist for app-side generation (tests, seed data);
//! production inserts may instead rely on a database-side default.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a farm.
    FarmId
}

define_id! {
    /// Unique identifier for an animal category.
    AnimalCategoryId
}

define_id! {
    /// Unique identifier for a farm stock balance row (one per farm+category pair).
    FarmStockBalanceId
}

define_id! {
    /// Unique identifier for an animal movement (ledger event).
    AnimalMovementId
}

define_id! {
    /// Unique identifier for a client (buyer or donee).
    ClientId
}

define_id! {
    /// Unique identifier for a death reason lookup value.
    DeathReasonId
}

define_id! {
    /// Unique identifier for the actor recorded against a movement.
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let farm = FarmId::new();
        let category = AnimalCategoryId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(farm.into_inner(), Uuid::nil());
        assert_ne!(category.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = FarmId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<FarmId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(restored.is_ok());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = FarmId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
