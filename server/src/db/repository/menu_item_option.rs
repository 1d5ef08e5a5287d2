//! Menu Item Option Repository
//!
//! Options always belong to one item; the scoped lookup
//! `find_by_id_for_item` is what the order engine uses to reject options
//! attached to the wrong item.

use rust_decimal::Decimal;
use shared::models::{MenuItemOption, MenuItemOptionCreate};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult, parse_money};

#[derive(sqlx::FromRow)]
struct OptionRow {
    id: i64,
    item_id: i64,
    group_name: String,
    name: String,
    additional_price: String,
}

impl OptionRow {
    fn into_model(self) -> RepoResult<MenuItemOption> {
        let additional_price = parse_money(&self.additional_price, "additional_price")?;
        Ok(MenuItemOption {
            id: self.id,
            item_id: self.item_id,
            group_name: self.group_name,
            name: self.name,
            additional_price,
        })
    }
}

const COLUMNS: &str = "id, item_id, group_name, name, additional_price";

pub async fn find_by_item(pool: &SqlitePool, item_id: i64) -> RepoResult<Vec<MenuItemOption>> {
    let rows = sqlx::query_as::<_, OptionRow>(&format!(
        "SELECT {COLUMNS} FROM menu_item_option WHERE item_id = ? ORDER BY group_name, name"
    ))
    .bind(item_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(OptionRow::into_model).collect()
}

/// Option lookup scoped to its parent item, on the caller's connection.
///
/// Returns `None` both for a missing option and for an option that
/// belongs to a different item; the engine treats both as the same
/// client error.
pub async fn find_by_id_for_item(
    conn: &mut SqliteConnection,
    option_id: i64,
    item_id: i64,
) -> RepoResult<Option<MenuItemOption>> {
    let row = sqlx::query_as::<_, OptionRow>(&format!(
        "SELECT {COLUMNS} FROM menu_item_option WHERE id = ? AND item_id = ?"
    ))
    .bind(option_id)
    .bind(item_id)
    .fetch_optional(conn)
    .await?;
    row.map(OptionRow::into_model).transpose()
}

/// Create an option under an item.
///
/// The (item, group, name) unique constraint turns duplicates into
/// [`RepoError::Duplicate`] (409 upstream).
pub async fn create(
    pool: &SqlitePool,
    item_id: i64,
    data: MenuItemOptionCreate,
) -> RepoResult<MenuItemOption> {
    if data.additional_price < Decimal::ZERO {
        return Err(RepoError::Validation(
            "additional_price must be non-negative".into(),
        ));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_item_option (item_id, group_name, name, additional_price)
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(item_id)
    .bind(&data.group_name)
    .bind(&data.name)
    .bind(data.additional_price.to_string())
    .fetch_one(pool)
    .await?;

    let row = sqlx::query_as::<_, OptionRow>(&format!(
        "SELECT {COLUMNS} FROM menu_item_option WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(pool)
    .await?;
    row.into_model()
}
