//! Repository Module
//!
//! Free-function CRUD over `&SqlitePool`; functions that must join an
//! open order transaction take `&mut SqliteConnection` instead so the
//! caller controls commit and rollback.

pub mod category;
pub mod menu_item;
pub mod menu_item_option;
pub mod order;
pub mod user;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a monetary TEXT column into a `Decimal`
///
/// Prices are written by the application as canonical decimal strings,
/// so a parse failure means a corrupt row, not bad input.
pub(crate) fn parse_money(raw: &str, column: &str) -> RepoResult<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| RepoError::Database(format!("Corrupt {column} value '{raw}': {e}")))
}
