//! Order Models
//!
//! Orders are created once, atomically, and afterwards only move through
//! the status machine below. Monetary snapshots (`price_at_order_time`,
//! option `additional_price`, `sub_total`, `total_amount`) are frozen at
//! creation time; catalog edits never touch them.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// ```text
/// pending_approval → approved → preparing → ready → completed
///        └────────────┴───────────┴──────────┴──→ cancelled
/// ```
///
/// `completed` and `cancelled` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingApproval,
    Approved,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order (used in error messages)
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::PendingApproval,
        OrderStatus::Approved,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingApproval => "pending_approval",
            OrderStatus::Approved => "approved",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states have no outgoing edges
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether `self → next` is an edge of the status graph
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (PendingApproval, Approved) => true,
            (Approved, Preparing) => true,
            (Preparing, Ready) => true,
            (Ready, Completed) => true,
            // cancellation is allowed from any non-terminal state
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a status string outside the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}

/// Chosen option snapshot stored on a line item
///
/// Copied from the catalog at order time (stored as JSON in the line item
/// row) so later option renames or price changes leave the order intact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChosenOption {
    pub option_id: i64,
    pub group_name: String,
    pub name: String,
    pub additional_price: Decimal,
}

/// Order header entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_number: i64,
    pub status: OrderStatus,
    /// Always recomputed server-side; never client-supplied
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One line of an order, with the item name joined in for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    /// Item base price snapshot taken at order time
    pub price_at_order_time: Decimal,
    pub chosen_options: Vec<ChosenOption>,
    /// (price_at_order_time + Σ option prices) × quantity
    pub sub_total: Decimal,
}

/// Fully hydrated order: header plus ordered line items
///
/// This is the payload returned by the order API and published on the
/// notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLineItem>,
}

/// Chosen option reference in an incoming order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChosenOptionRef {
    pub option_id: i64,
}

/// One requested line of a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub item_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub chosen_options: Vec<ChosenOptionRef>,
}

/// Create order payload (client prices are never accepted; the server
/// prices every line from the catalog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub table_number: i64,
    pub items: Vec<OrderItemRequest>,
    pub notes: Option<String>,
}

/// Status update payload; the raw string is parsed explicitly so unknown
/// values produce a 400 listing the allowed set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_is_allowed() {
        use OrderStatus::*;
        assert!(PendingApproval.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
    }

    #[test]
    fn cancel_from_any_non_terminal() {
        use OrderStatus::*;
        for from in [PendingApproval, Approved, Preparing, Ready] {
            assert!(from.can_transition_to(Cancelled), "{from} should cancel");
        }
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn no_edges_out_of_terminal_states() {
        use OrderStatus::*;
        for next in OrderStatus::ALL {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn skipping_states_is_rejected() {
        use OrderStatus::*;
        assert!(!PendingApproval.can_transition_to(Preparing));
        assert!(!PendingApproval.can_transition_to(Completed));
        assert!(!Approved.can_transition_to(Ready));
        // no self-loops either
        assert!(!Preparing.can_transition_to(Preparing));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
