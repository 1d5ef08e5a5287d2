//! Role checks
//!
//! Pure functions over [`CurrentUser`] so handlers and tests can exercise
//! authorization without building HTTP requests. `admin` passes every
//! check.

use crate::auth::CurrentUser;
use crate::utils::{AppError, AppResult};

/// Require the user to hold one of the listed roles.
pub fn require_role(user: &CurrentUser, allowed: &[&str]) -> AppResult<()> {
    if user.role == "admin" || allowed.contains(&user.role.as_str()) {
        return Ok(());
    }
    Err(AppError::forbidden(format!(
        "Role '{}' may not perform this action",
        user.role
    )))
}
