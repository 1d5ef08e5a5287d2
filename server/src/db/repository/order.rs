//! Order Repository
//!
//! Write primitives run on `&mut SqliteConnection` so the order engine
//! can keep header insert, line inserts and total finalization inside a
//! single transaction. Reads hydrate the full order (header + ordered
//! line items with item names and option snapshots).

use rust_decimal::Decimal;
use shared::models::{ChosenOption, Order, OrderDetail, OrderLineItem, OrderStatus};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult, parse_money};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    table_number: i64,
    status: String,
    total_amount: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl OrderRow {
    fn into_model(self) -> RepoResult<Order> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| RepoError::Database(format!("Corrupt order status '{}'", self.status)))?;
        let total_amount = parse_money(&self.total_amount, "total_amount")?;
        Ok(Order {
            id: self.id,
            table_number: self.table_number,
            status,
            total_amount,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LineItemRow {
    id: i64,
    item_id: i64,
    item_name: String,
    quantity: i64,
    price_at_order_time: String,
    chosen_options: String,
    sub_total: String,
}

impl LineItemRow {
    fn into_model(self) -> RepoResult<OrderLineItem> {
        let price_at_order_time = parse_money(&self.price_at_order_time, "price_at_order_time")?;
        let sub_total = parse_money(&self.sub_total, "sub_total")?;
        let chosen_options: Vec<ChosenOption> = serde_json::from_str(&self.chosen_options)
            .map_err(|e| RepoError::Database(format!("Corrupt chosen_options: {e}")))?;
        Ok(OrderLineItem {
            id: self.id,
            item_id: self.item_id,
            item_name: self.item_name,
            quantity: self.quantity,
            price_at_order_time,
            chosen_options,
            sub_total,
        })
    }
}

const HEADER_COLUMNS: &str =
    "id, table_number, status, total_amount, notes, created_at, updated_at";

// ── Transactional writes (order engine) ─────────────────────────────

/// Insert the order header with a zero total; the engine finalizes the
/// total in the same transaction once every line is priced.
pub async fn insert_header(
    conn: &mut SqliteConnection,
    table_number: i64,
    notes: Option<&str>,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (table_number, status, total_amount, notes)
         VALUES (?, ?, '0', ?) RETURNING id",
    )
    .bind(table_number)
    .bind(OrderStatus::PendingApproval.as_str())
    .bind(notes)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn insert_line(
    conn: &mut SqliteConnection,
    order_id: i64,
    item_id: i64,
    quantity: i64,
    price_at_order_time: Decimal,
    chosen_options: &[ChosenOption],
    sub_total: Decimal,
) -> RepoResult<()> {
    let options_json = serde_json::to_string(chosen_options)
        .map_err(|e| RepoError::Database(format!("Failed to encode chosen_options: {e}")))?;

    sqlx::query(
        "INSERT INTO order_item
            (order_id, item_id, quantity, price_at_order_time, chosen_options, sub_total)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(item_id)
    .bind(quantity)
    .bind(price_at_order_time.to_string())
    .bind(options_json)
    .bind(sub_total.to_string())
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn finalize_total(
    conn: &mut SqliteConnection,
    order_id: i64,
    total_amount: Decimal,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET total_amount = ? WHERE id = ?")
        .bind(total_amount.to_string())
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(())
}

// ── Reads ───────────────────────────────────────────────────────────

pub async fn find_header(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {HEADER_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(OrderRow::into_model).transpose()
}

async fn find_lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLineItem>> {
    let rows = sqlx::query_as::<_, LineItemRow>(
        "SELECT oi.id, oi.item_id, mi.name AS item_name, oi.quantity,
                oi.price_at_order_time, oi.chosen_options, oi.sub_total
         FROM order_item oi
         JOIN menu_item mi ON mi.id = oi.item_id
         WHERE oi.order_id = ?
         ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(LineItemRow::into_model).collect()
}

/// Hydrated order: header plus ordered line items
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_header(pool, id).await? else {
        return Ok(None);
    };
    let items = find_lines(pool, id).await?;
    Ok(Some(OrderDetail { order, items }))
}

/// Hydrated orders, newest first, optionally filtered by status
pub async fn find_all_detail(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
) -> RepoResult<Vec<OrderDetail>> {
    let mut sql = format!("SELECT {HEADER_COLUMNS} FROM orders");
    if status.is_some() {
        sql.push_str(" WHERE status = ?");
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, OrderRow>(&sql);
    if let Some(s) = status {
        query = query.bind(s.as_str());
    }
    let rows = query.fetch_all(pool).await?;

    let mut details = Vec::with_capacity(rows.len());
    for row in rows {
        let order = row.into_model()?;
        let items = find_lines(pool, order.id).await?;
        details.push(OrderDetail { order, items });
    }
    Ok(details)
}

// ── Status updates ──────────────────────────────────────────────────

/// Compare-and-set status update.
///
/// Returns `false` when the row no longer holds `expected` (a concurrent
/// transition won); `NotFound` when the order does not exist at all.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
    expected: OrderStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ? AND status = ?",
    )
    .bind(status.as_str())
    .bind(id)
    .bind(expected.as_str())
    .execute(pool)
    .await?;

    if rows.rows_affected() > 0 {
        return Ok(true);
    }
    if find_header(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(false)
}
