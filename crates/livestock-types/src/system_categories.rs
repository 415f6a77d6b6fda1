//! The nine system-reserved animal category slugs.
//!
//! These are seeded idempotently by `livestock_db::seed` and consumed by
//! the weaning rule table in `livestock_domain::weaning`. Custom categories
//! created by farm operators never collide with these slugs because slugs
//! are unique and these are reserved at the application layer, not just by
//! convention.

/// One system-category definition: `(slug, display_name, description, display_order)`.
pub struct SystemCategoryDef {
    /// Stable, immutable slug.
    pub slug: &'static str,
    /// Human-readable display name.
    pub name: &'static str,
    /// Short description shown to operators.
    pub description: &'static str,
    /// Suggested display ordering.
    pub display_order: i32,
}

/// The nine system categories, in their canonical display order.
pub const SYSTEM_CATEGORIES: &[SystemCategoryDef] = &[
    SystemCategoryDef {
        slug: "touros",
        name: "Touros",
        description: "Breeding bulls",
        display_order: 0,
    },
    SystemCategoryDef {
        slug: "vacas",
        name: "Vacas",
        description: "Breeding cows",
        display_order: 1,
    },
    SystemCategoryDef {
        slug: "bezerro-macho",
        name: "Bezerro Macho",
        description: "Male calves, pre-weaning",
        display_order: 2,
    },
    SystemCategoryDef {
        slug: "bezerro-femea",
        name: "Bezerra Fêmea",
        description: "Female calves, pre-weaning",
        display_order: 3,
    },
    SystemCategoryDef {
        slug: "novilha-2a",
        name: "Novilha 2 Anos",
        description: "Two-year-old heifers, post-weaning",
        display_order: 4,
    },
    SystemCategoryDef {
        slug: "novilha-3a",
        name: "Novilha 3 Anos",
        description: "Three-year-old heifers",
        display_order: 5,
    },
    SystemCategoryDef {
        slug: "bois-2a",
        name: "Bois 2 Anos",
        description: "Two-year-old steers, post-weaning",
        display_order: 6,
    },
    SystemCategoryDef {
        slug: "rufiao",
        name: "Rufião",
        description: "Teaser bull",
        display_order: 7,
    },
    SystemCategoryDef {
        slug: "vaca-primipara",
        name: "Vaca Primípara",
        description: "First-calving cow",
        display_order: 8,
    },
];

/// The slug male calves wean out of.
pub const WEANING_SOURCE_MALE: &str = "bezerro-macho";
/// The slug male calves wean into.
pub const WEANING_TARGET_MALE: &str = "bois-2a";
/// The slug female calves wean out of.
pub const WEANING_SOURCE_FEMALE: &str = "bezerro-femea";
/// The slug female calves wean into.
pub const WEANING_TARGET_FEMALE: &str = "novilha-2a";

#[cfg(test)]
mod tests {
    use super::SYSTEM_CATEGORIES;

    #[test]
    fn has_exactly_nine_system_categories() {
        assert_eq!(SYSTEM_CATEGORIES.len(), 9);
    }

    #[test]
    fn all_slugs_distinct() {
        let mut slugs: Vec<&str> = SYSTEM_CATEGORIES.iter().map(|c| c.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), SYSTEM_CATEGORIES.len());
    }
}
