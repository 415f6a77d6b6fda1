//! Persistence for the `animal_categories` table, used by the initialization
//! signals and the reference-data seeder.

use chrono::{DateTime, Utc};
use livestock_types::{AnimalCategory, AnimalCategoryId};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::DbError;

/// A raw `animal_categories` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct CategoryRow {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) is_system: bool,
    pub(crate) is_active: bool,
    pub(crate) display_order: i32,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<CategoryRow> for AnimalCategory {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            description: row.description,
            slug: row.slug,
            is_system: row.is_system,
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, name, description, slug, is_system, is_active, display_order, created_at";

/// Looks up an active category by its immutable system slug.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn find_by_slug(
    tx: &mut Transaction<'_, Postgres>,
    slug: &str,
) -> Result<Option<AnimalCategory>, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM animal_categories WHERE slug = $1"
    ))
    .bind(slug)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(AnimalCategory::from))
}

/// Looks up a category by its display name, for back-compat matching of
/// categories created manually before slugs existed.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn find_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> Result<Option<AnimalCategory>, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM animal_categories WHERE name = $1"
    ))
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(AnimalCategory::from))
}

/// Inserts a new system category.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn insert_system_category(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    description: &str,
    slug: &str,
    display_order: i32,
) -> Result<AnimalCategory, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!(
        r"INSERT INTO animal_categories (id, name, description, slug, is_system, is_active, display_order, created_at)
          VALUES ($1, $2, $3, $4, true, true, $5, now())
          RETURNING {SELECT_COLUMNS}"
    ))
    .bind(Uuid::from(AnimalCategoryId::new()))
    .bind(name)
    .bind(description)
    .bind(slug)
    .bind(display_order)
    .fetch_one(&mut **tx)
    .await?;

    Ok(AnimalCategory::from(row))
}

/// Updates only the fields of a system category that differ from the
/// reference definition, matching the reference seeder's "diff-then-write"
/// behavior rather than an unconditional overwrite.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn sync_system_category_fields(
    tx: &mut Transaction<'_, Postgres>,
    id: AnimalCategoryId,
    name: &str,
    description: &str,
    slug: &str,
    display_order: i32,
) -> Result<(), DbError> {
    sqlx::query(
        r"UPDATE animal_categories
          SET name = $1, description = $2, slug = $3, display_order = $4,
              is_system = true, is_active = true
          WHERE id = $5",
    )
    .bind(name)
    .bind(description)
    .bind(slug)
    .bind(display_order)
    .bind(Uuid::from(id))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Lists the IDs of every active category, for materializing balance rows
/// against a newly created farm.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn list_active_ids(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<Vec<AnimalCategoryId>, DbError> {
    let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM animal_categories WHERE is_active = true")
        .fetch_all(&mut **tx)
        .await?;

    Ok(ids.into_iter().map(AnimalCategoryId::from).collect())
}

/// Lists the IDs of every active farm, for materializing balance rows
/// against a newly created category.
///
/// # Errors
///
/// Returns [`DbError`] on a connection failure.
pub(crate) async fn list_active_farm_ids(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<Vec<livestock_types::FarmId>, DbError> {
    let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM farms WHERE is_active = true")
        .fetch_all(&mut **tx)
        .await?;

    Ok(ids.into_iter().map(livestock_types::FarmId::from).collect())
}

