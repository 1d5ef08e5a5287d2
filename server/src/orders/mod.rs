//! Orders Module
//!
//! The order transaction engine ([`OrderService`]), the status lifecycle
//! it enforces, and the pure pricing arithmetic underneath.

mod engine;
pub mod pricing;

pub use engine::OrderService;
