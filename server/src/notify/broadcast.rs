//! Broadcast-channel publisher
//!
//! In-process fan-out over a `tokio::sync::broadcast` channel. Transports
//! (the `/api/events` WebSocket feed, tests, future kitchen displays)
//! attach with [`BroadcastPublisher::subscribe`] and receive every event
//! published after they attached.

use async_trait::async_trait;
use serde::Serialize;
use shared::models::OrderDetail;
use tokio::sync::broadcast;

use super::{EventName, NotificationPublisher};
use crate::utils::{AppError, AppResult};

/// One event on the wire: name plus the hydrated order as JSON
#[derive(Debug, Clone, Serialize)]
pub struct OrderEventMessage {
    pub event: String,
    pub payload: serde_json::Value,
}

/// Publisher backed by a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<OrderEventMessage>,
}

impl BroadcastPublisher {
    /// Default channel capacity; slow subscribers that lag behind this
    /// many events start dropping the oldest ones.
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Attach a new subscriber
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEventMessage> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationPublisher for BroadcastPublisher {
    async fn publish(&self, event: EventName, order: &OrderDetail) -> AppResult<()> {
        // With no subscribers attached there is nobody to notify; that is
        // not an error, the event is simply dropped.
        if self.tx.receiver_count() == 0 {
            return Ok(());
        }

        let payload = serde_json::to_value(order)
            .map_err(|e| AppError::internal(format!("Failed to encode order event: {e}")))?;
        let msg = OrderEventMessage {
            event: event.as_str().to_string(),
            payload,
        };
        self.tx
            .send(msg)
            .map_err(|e| AppError::internal(format!("Broadcast send failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shared::models::{Order, OrderStatus};

    use super::*;

    fn order_detail(id: i64) -> OrderDetail {
        OrderDetail {
            order: Order {
                id,
                table_number: 5,
                status: OrderStatus::PendingApproval,
                total_amount: rust_decimal::Decimal::new(1900, 2),
                notes: None,
                created_at: "2026-01-01 12:00:00".to_string(),
                updated_at: "2026-01-01 12:00:00".to_string(),
            },
            items: vec![],
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let publisher = BroadcastPublisher::new();
        let mut rx = publisher.subscribe();

        publisher
            .publish(EventName::NewOrder, &order_detail(7))
            .await
            .unwrap();

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.event, "newOrder");
        assert_eq!(msg.payload["id"], 7);
        assert_eq!(msg.payload["total_amount"], "19.00");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let publisher = BroadcastPublisher::new();
        assert_eq!(publisher.subscriber_count(), 0);
        publisher
            .publish(EventName::OrderStatusUpdate, &order_detail(1))
            .await
            .unwrap();
    }
}
