//! Idempotent creation of the nine system-defined animal categories.
//!
//! Locates each by slug, falling back to display name for categories created
//! manually before slugs existed, then creates or updates it. After sync,
//! re-runs the category-creation signal for every synced category so every
//! active farm has balance coverage, even on a re-run against a database
//! that already had farms before the categories existed.

use livestock_types::system_categories::SYSTEM_CATEGORIES;
use livestock_types::AnimalCategoryId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::{category_store, signals};

/// Outcome of one seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Categories created because no matching slug or name existed.
    pub created: u32,
    /// Categories found but whose fields differed from the reference
    /// definition and were updated.
    pub updated: u32,
    /// Categories found and already matching the reference definition.
    pub unchanged: u32,
    /// Balance rows created while re-running the creation signal.
    pub balances_created: u32,
}

/// Syncs all nine system categories and backfills their balance coverage.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub async fn sync_system_categories(pool: &PgPool) -> Result<SeedSummary, DbError> {
    let mut created = 0u32;
    let mut updated = 0u32;
    let mut unchanged = 0u32;
    let mut synced_ids: Vec<AnimalCategoryId> = Vec::with_capacity(SYSTEM_CATEGORIES.len());

    for def in SYSTEM_CATEGORIES {
        let mut tx = pool.begin().await?;

        let existing = match category_store::find_by_slug(&mut tx, def.slug).await? {
            Some(category) => Some(category),
            None => category_store::find_by_name(&mut tx, def.name).await?,
        };

        let id = match existing {
            Some(category) => {
                let differs = category.name != def.name
                    || category.description.as_deref() != Some(def.description)
                    || category.slug.as_deref() != Some(def.slug)
                    || category.display_order != def.display_order
                    || !category.is_system
                    || !category.is_active;

                if differs {
                    category_store::sync_system_category_fields(
                        &mut tx,
                        category.id,
                        def.name,
                        def.description,
                        def.slug,
                        def.display_order,
                    )
                    .await?;
                    updated = updated.saturating_add(1);
                } else {
                    unchanged = unchanged.saturating_add(1);
                }
                category.id
            }
            None => {
                let inserted = category_store::insert_system_category(
                    &mut tx,
                    def.name,
                    def.description,
                    def.slug,
                    def.display_order,
                )
                .await?;
                created = created.saturating_add(1);
                inserted.id
            }
        };

        tx.commit().await?;
        synced_ids.push(id);
    }

    let mut balances_created = 0u32;
    for id in synced_ids {
        let materialized = signals::on_category_created(pool, id).await?;
        balances_created = balances_created.saturating_add(materialized.created);
    }

    tracing::info!(
        created,
        updated,
        unchanged,
        balances_created,
        "system category seed complete"
    );

    Ok(SeedSummary {
        created,
        updated,
        unchanged,
        balances_created,
    })
}
