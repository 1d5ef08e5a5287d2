//! Menu Item Repository
//!
//! Catalog reads for the storefront and the order engine, plus the admin
//! write surface. `find_for_order` runs on the caller's connection so the
//! order engine reads a consistent catalog snapshot inside its own
//! transaction.

use rust_decimal::Decimal;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult, parse_money};

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    category_id: Option<i64>,
    name: String,
    description: Option<String>,
    base_price: String,
    image_url: Option<String>,
    is_available: bool,
}

impl MenuItemRow {
    fn into_model(self) -> RepoResult<MenuItem> {
        let base_price = parse_money(&self.base_price, "base_price")?;
        Ok(MenuItem {
            id: self.id,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            base_price,
            image_url: self.image_url,
            is_available: self.is_available,
        })
    }
}

const COLUMNS: &str = "id, category_id, name, description, base_price, image_url, is_available";

/// List catalog items, optionally restricted to one category.
///
/// `available_only` is what customer-facing listings use; the admin view
/// passes `false` to see everything.
pub async fn find_all(
    pool: &SqlitePool,
    category_id: Option<i64>,
    available_only: bool,
) -> RepoResult<Vec<MenuItem>> {
    let mut sql = format!("SELECT {COLUMNS} FROM menu_item WHERE 1 = 1");
    if available_only {
        sql.push_str(" AND is_available = 1");
    }
    if category_id.is_some() {
        sql.push_str(" AND category_id = ?");
    }
    sql.push_str(" ORDER BY name");

    let mut query = sqlx::query_as::<_, MenuItemRow>(&sql);
    if let Some(cid) = category_id {
        query = query.bind(cid);
    }

    let rows = query.fetch_all(pool).await?;
    rows.into_iter().map(MenuItemRow::into_model).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let row =
        sqlx::query_as::<_, MenuItemRow>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    row.map(MenuItemRow::into_model).transpose()
}

/// Catalog read used by the order engine, inside its transaction
pub async fn find_for_order(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<MenuItem>> {
    let row =
        sqlx::query_as::<_, MenuItemRow>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    row.map(MenuItemRow::into_model).transpose()
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    if data.base_price < Decimal::ZERO {
        return Err(RepoError::Validation("base_price must be non-negative".into()));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_item (category_id, name, description, base_price, image_url, is_available)
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price.to_string())
    .bind(&data.image_url)
    .bind(data.is_available.unwrap_or(true))
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update: fetch-merge-write inside one transaction so concurrent
/// edits cannot lose fields (each omitted field keeps its stored value).
pub async fn update(pool: &SqlitePool, id: i64, patch: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(price) = patch.base_price
        && price < Decimal::ZERO
    {
        return Err(RepoError::Validation("base_price must be non-negative".into()));
    }

    let mut tx = pool.begin().await?;

    let row =
        sqlx::query_as::<_, MenuItemRow>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let current = row
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?
        .into_model()?;

    let merged = patch.apply_to(current);

    sqlx::query(
        "UPDATE menu_item
         SET category_id = ?, name = ?, description = ?, base_price = ?, image_url = ?, is_available = ?
         WHERE id = ?",
    )
    .bind(merged.category_id)
    .bind(&merged.name)
    .bind(&merged.description)
    .bind(merged.base_price.to_string())
    .bind(&merged.image_url)
    .bind(merged.is_available)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(merged)
}

pub async fn set_availability(pool: &SqlitePool, id: i64, is_available: bool) -> RepoResult<MenuItem> {
    let rows = sqlx::query("UPDATE menu_item SET is_available = ? WHERE id = ?")
        .bind(is_available)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}
