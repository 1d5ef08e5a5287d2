//! Data models
//!
//! Shared between the server and frontends (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//!
//! Monetary fields are `rust_decimal::Decimal` and serialize as decimal
//! strings ("8.00"); they are stored as canonical decimal TEXT in the
//! database and never handled as floats.

pub mod category;
pub mod menu_item;
pub mod order;
pub mod user;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use order::*;
pub use user::*;
