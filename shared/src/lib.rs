//! Shared types for the ordering system
//!
//! Data models exchanged between the server and the customer/admin
//! frontends. Kept free of server-only dependencies so client tooling
//! can reuse the same wire types.

pub mod models;

pub use serde::{Deserialize, Serialize};
