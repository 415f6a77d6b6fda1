//! Entity structs for the livestock inventory ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{MovementType, OperationType};
use crate::ids::{
    AnimalCategoryId, AnimalMovementId, ClientId, DeathReasonId, FarmId, FarmStockBalanceId,
    UserId,
};

/// Free-form structured metadata attached to a movement.
///
/// String-keyed, JSON-compatible values — weight, price, supplier,
/// observation, counterparty IDs for paired operations. Unknown keys are
/// preserved; known keys are read through the accessors below.
pub type Metadata = BTreeMap<String, Value>;

/// A well-known metadata key recording the counterparty farm of a transfer.
pub const META_COUNTERPART_FARM: &str = "counterpart_farm_id";
/// A well-known metadata key recording the counterparty category of a category change.
pub const META_COUNTERPART_CATEGORY: &str = "counterpart_category_id";
/// A well-known metadata key tagging the kind of composite operation.
pub const META_TRANSFER_KIND: &str = "transfer_kind";

// ---------------------------------------------------------------------------
// Farm
// ---------------------------------------------------------------------------

/// A farm: the top-level unit that owns stock balances and movements.
///
/// Created by external CRUD outside this crate's scope; its creation
/// triggers balance materialization (see `livestock_db::signals`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farm {
    /// Unique identifier.
    pub id: FarmId,
    /// Unique human-readable name.
    pub name: String,
    /// Soft-delete flag; inactive farms are excluded from initialization signals.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Animal category
// ---------------------------------------------------------------------------

/// A classification of animal (e.g. calf, cow, bull) — the "SKU" of this
/// inventory system.
///
/// Nine slugs are reserved for the system (see [`crate::system_categories`]);
/// custom categories carry no slug and are not `is_system`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalCategory {
    /// Unique identifier.
    pub id: AnimalCategoryId,
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Present exactly when `is_system` is true; immutable for system categories.
    pub slug: Option<String>,
    /// Whether this is one of the nine system-reserved categories.
    pub is_system: bool,
    /// Display ordering hint.
    pub display_order: i32,
    /// Soft-delete flag. System categories can never be deactivated.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Farm stock balance (snapshot)
// ---------------------------------------------------------------------------

/// The consolidated current headcount for one `(farm, category)` pair.
///
/// Mutated exclusively by `MovementService`/`TransferService` through a
/// conditional, version-guarded update. Never deleted while referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmStockBalance {
    /// Unique identifier.
    pub id: FarmStockBalanceId,
    /// Owning farm.
    pub farm_id: FarmId,
    /// Owning category.
    pub animal_category_id: AnimalCategoryId,
    /// Current headcount. Never negative.
    pub current_quantity: i32,
    /// Optimistic concurrency counter, incremented on every update.
    pub version: i32,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Animal movement (ledger event)
// ---------------------------------------------------------------------------

/// One immutable ledger event — a single state change to a balance.
///
/// Once persisted, a movement's fields must never be mutated; attempting to
/// do so through the service layer fails with `LEDGER_IMMUTABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalMovement {
    /// Unique identifier.
    pub id: AnimalMovementId,
    /// The balance this movement affected. Never cascade-deleted.
    pub farm_stock_balance_id: FarmStockBalanceId,
    /// Derived from `operation_type`; stored for fast filtering.
    pub movement_type: MovementType,
    /// The specific business operation.
    pub operation_type: OperationType,
    /// Strictly positive headcount moved.
    pub quantity: i32,
    /// Business event time. Defaults to now but may be backdated.
    pub timestamp: DateTime<Utc>,
    /// Self-reference to the paired movement of a composite operation, if the
    /// implementation chooses two-phase linking over metadata encoding.
    pub related_movement_id: Option<AnimalMovementId>,
    /// Required iff `operation_type` is `Sale` or `Donation`.
    pub client_id: Option<ClientId>,
    /// Required iff `operation_type` is `Death`.
    pub death_reason_id: Option<DeathReasonId>,
    /// Free-form structured metadata.
    pub metadata: Metadata,
    /// The actor who recorded this movement.
    pub created_by: UserId,
    /// Technical insertion timestamp, distinct from `timestamp`.
    pub created_at: DateTime<Utc>,
    /// Optional source IP of the request that produced this movement.
    pub source_ip: Option<String>,
}

// ---------------------------------------------------------------------------
// Auxiliary reference entities
// ---------------------------------------------------------------------------

/// A buyer or donee referenced by sale/donation movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
}

/// A mortality cause referenced by death movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathReason {
    /// Unique identifier.
    pub id: DeathReasonId,
    /// Display name.
    pub name: String,
}

/// An opaque actor handle. The core does not authenticate or authorize;
/// callers are trusted to have performed access checks upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier.
    pub id: UserId,
    /// Display name, recorded for audit convenience.
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Reporting value objects
// ---------------------------------------------------------------------------

/// The result of comparing a stored snapshot against its reconciled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// The farm being checked.
    pub farm_id: FarmId,
    /// The category being checked.
    pub animal_category_id: AnimalCategoryId,
    /// The value currently stored in `FarmStockBalance.current_quantity`.
    pub stored_quantity: i32,
    /// The value recomputed from the ledger.
    pub reconciled_quantity: i32,
    /// `stored_quantity - reconciled_quantity`; zero means consistent.
    pub discrepancy: i32,
}

impl ConsistencyReport {
    /// Whether the stored snapshot agrees with the ledger.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.discrepancy == 0
    }
}

/// Aggregate entry/exit counts over an optional filtered range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementStatistics {
    /// Sum of all `Entry` quantities in range.
    pub total_entries: i32,
    /// Sum of all `Exit` quantities in range.
    pub total_exits: i32,
    /// `total_entries - total_exits`.
    pub net: i32,
    /// Number of movement rows in range.
    pub movement_count: i64,
}
