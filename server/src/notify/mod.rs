//! Notification Publisher
//!
//! Fan-out boundary the order engine pushes finalized orders and status
//! changes through. The publisher is injected into [`OrderService`] at
//! wiring time; there is no process-global handle. A deployment without
//! a real channel wires [`NoopPublisher`] instead.
//!
//! Publishing is best-effort: the engine logs a failure and moves on,
//! it never rolls back or fails an already-committed order.
//!
//! [`OrderService`]: crate::orders::OrderService

mod broadcast;

pub use broadcast::{BroadcastPublisher, OrderEventMessage};

use async_trait::async_trait;
use shared::models::OrderDetail;

use crate::utils::AppResult;

/// Event names on the notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventName {
    NewOrder,
    OrderStatusUpdate,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::NewOrder => "newOrder",
            EventName::OrderStatusUpdate => "orderStatusUpdate",
        }
    }
}

/// Fan-out channel for order lifecycle events
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish a fully hydrated order under the given event name
    async fn publish(&self, event: EventName, order: &OrderDetail) -> AppResult<()>;
}

/// Publisher that drops every event (no channel configured)
#[derive(Debug, Clone, Default)]
pub struct NoopPublisher;

#[async_trait]
impl NotificationPublisher for NoopPublisher {
    async fn publish(&self, event: EventName, _order: &OrderDetail) -> AppResult<()> {
        tracing::debug!(event = event.as_str(), "Notification channel absent, event skipped");
        Ok(())
    }
}
