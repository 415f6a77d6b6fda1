//! The fixed weaning rule table: which system-category slugs calves promote
//! between, and by how much.

use livestock_types::system_categories::{
    WEANING_SOURCE_FEMALE, WEANING_SOURCE_MALE, WEANING_TARGET_FEMALE, WEANING_TARGET_MALE,
};

/// One source-to-target promotion leg to execute as a `WEANING_OUT`/`WEANING_IN` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaningPair {
    /// The category slug animals leave.
    pub source_slug: &'static str,
    /// The category slug animals enter.
    pub target_slug: &'static str,
    /// Headcount moved. Always strictly positive.
    pub quantity: i32,
}

/// Builds the promotion legs for the requested quantities.
///
/// A zero-quantity leg is omitted entirely rather than emitted as a no-op
/// pair. Callers are expected to have already rejected the all-zero case
/// with [`crate::validators::require_weaning_params`].
#[must_use]
pub fn promotion_pairs(quantity_males: i32, quantity_females: i32) -> Vec<WeaningPair> {
    let mut pairs = Vec::with_capacity(2);
    if quantity_males > 0 {
        pairs.push(WeaningPair {
            source_slug: WEANING_SOURCE_MALE,
            target_slug: WEANING_TARGET_MALE,
            quantity: quantity_males,
        });
    }
    if quantity_females > 0 {
        pairs.push(WeaningPair {
            source_slug: WEANING_SOURCE_FEMALE,
            target_slug: WEANING_TARGET_FEMALE,
            quantity: quantity_females,
        });
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_quantities_positive_yields_two_pairs() {
        let pairs = promotion_pairs(6, 4);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].source_slug, WEANING_SOURCE_MALE);
        assert_eq!(pairs[0].target_slug, WEANING_TARGET_MALE);
        assert_eq!(pairs[1].source_slug, WEANING_SOURCE_FEMALE);
    }

    #[test]
    fn zero_quantity_leg_is_omitted() {
        let pairs = promotion_pairs(6, 0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].quantity, 6);
    }

    #[test]
    fn both_zero_yields_empty() {
        assert!(promotion_pairs(0, 0).is_empty());
    }
}
