//! Order Transaction Engine and Status Machine
//!
//! Converts a client-submitted order request into a priced, persisted
//! and broadcast order, and drives the status lifecycle afterwards.
//!
//! Pricing is authoritative: client-supplied prices do not exist in the
//! request shape, every amount is read from the catalog inside the same
//! transaction that writes the order. The header insert, all line
//! inserts and the total finalization commit atomically; any validation
//! failure before commit drops the transaction and rolls everything
//! back, so a partial order is never visible.

use std::sync::Arc;

use shared::models::{ChosenOption, OrderCreateRequest, OrderDetail, OrderStatus};
use sqlx::SqlitePool;

use crate::db::repository::{menu_item, menu_item_option, order as order_repo};
use crate::notify::{EventName, NotificationPublisher};
use crate::orders::pricing;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Order engine: owns the order store handle and the notification channel
///
/// The publisher is injected here at wiring time; handlers never reach
/// for a global.
#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    publisher: Arc<dyn NotificationPublisher>,
}

impl OrderService {
    pub fn new(pool: SqlitePool, publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { pool, publisher }
    }

    /// Create an order in one atomic transaction.
    ///
    /// Fail-fast: the first invalid line aborts the whole request,
    /// including rows already inserted for earlier lines.
    pub async fn create_order(&self, req: OrderCreateRequest) -> AppResult<OrderDetail> {
        validate_request(&req)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let order_id =
            order_repo::insert_header(&mut *tx, req.table_number, req.notes.as_deref()).await?;

        let mut subtotals = Vec::with_capacity(req.items.len());
        for line in &req.items {
            let item = menu_item::find_for_order(&mut *tx, line.item_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Menu item {} not found", line.item_id))
                })?;
            if !item.is_available {
                return Err(AppError::validation(format!(
                    "Menu item '{}' is currently unavailable",
                    item.name
                )));
            }

            let mut options = Vec::with_capacity(line.chosen_options.len());
            for chosen in &line.chosen_options {
                let option =
                    menu_item_option::find_by_id_for_item(&mut *tx, chosen.option_id, line.item_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::validation(format!(
                                "Invalid option {} for item {}",
                                chosen.option_id, line.item_id
                            ))
                        })?;
                options.push(ChosenOption {
                    option_id: option.id,
                    group_name: option.group_name,
                    name: option.name,
                    additional_price: option.additional_price,
                });
            }

            let sub_total = pricing::line_subtotal(item.base_price, &options, line.quantity)?;
            order_repo::insert_line(
                &mut *tx,
                order_id,
                item.id,
                line.quantity,
                item.base_price,
                &options,
                sub_total,
            )
            .await?;
            subtotals.push(sub_total);
        }

        let total = pricing::order_total(subtotals.iter())?;
        order_repo::finalize_total(&mut *tx, order_id, total).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(order_id, table = req.table_number, %total, "Order created");

        let detail = self.load_detail(order_id).await?;
        self.notify(EventName::NewOrder, &detail).await;
        Ok(detail)
    }

    /// Transition an order to `new_status`.
    ///
    /// Edges are enforced strictly against the status graph; an illegal
    /// transition (including anything out of a terminal state) is
    /// rejected and leaves the stored status untouched.
    pub async fn update_status(
        &self,
        order_id: i64,
        new_status: OrderStatus,
    ) -> AppResult<OrderDetail> {
        let current = order_repo::find_header(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::business_rule(format!(
                "Cannot transition order {order_id} from '{}' to '{new_status}'",
                current.status
            )));
        }

        // Compare-and-set so two concurrent transitions cannot both win
        let updated =
            order_repo::update_status(&self.pool, order_id, new_status, current.status).await?;
        if !updated {
            return Err(AppError::conflict(format!(
                "Order {order_id} was modified concurrently"
            )));
        }

        tracing::info!(order_id, status = new_status.as_str(), "Order status updated");

        let detail = self.load_detail(order_id).await?;
        self.notify(EventName::OrderStatusUpdate, &detail).await;
        Ok(detail)
    }

    pub async fn get_order(&self, order_id: i64) -> AppResult<OrderDetail> {
        order_repo::find_detail(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
    }

    pub async fn list_orders(&self, status: Option<OrderStatus>) -> AppResult<Vec<OrderDetail>> {
        Ok(order_repo::find_all_detail(&self.pool, status).await?)
    }

    async fn load_detail(&self, order_id: i64) -> AppResult<OrderDetail> {
        order_repo::find_detail(&self.pool, order_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Order {order_id} vanished after commit"))
            })
    }

    /// Best-effort publish: the order is already committed, so a channel
    /// failure is logged and swallowed.
    async fn notify(&self, event: EventName, order: &OrderDetail) {
        if let Err(e) = self.publisher.publish(event, order).await {
            tracing::warn!(
                event = event.as_str(),
                order_id = order.order.id,
                error = %e,
                "Failed to publish order event"
            );
        }
    }
}

/// Request validation before any write; a rejected request leaves no
/// trace in the database.
fn validate_request(req: &OrderCreateRequest) -> AppResult<()> {
    if req.table_number <= 0 {
        return Err(AppError::validation("table_number must be a positive integer"));
    }
    if req.items.is_empty() {
        return Err(AppError::validation("items must be a non-empty list"));
    }
    for line in &req.items {
        if line.quantity <= 0 {
            return Err(AppError::validation(format!(
                "Invalid quantity for item {}: must be positive",
                line.item_id
            )));
        }
        if line.quantity > pricing::MAX_QUANTITY {
            return Err(AppError::validation(format!(
                "Quantity for item {} exceeds maximum allowed ({})",
                line.item_id,
                pricing::MAX_QUANTITY
            )));
        }
    }
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}
