//! Server core
//!
//! Configuration, shared state and the HTTP server lifecycle:
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared handles cloned into every handler
//! - [`Server`] - bind, serve, graceful shutdown

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
