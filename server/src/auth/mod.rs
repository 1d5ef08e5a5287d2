//! Authentication and authorization
//!
//! JWT-based authentication with role checks:
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - authenticated user context, extracted per request
//! - [`policy::require_role`] - role gate used by protected handlers

pub mod extractor;
pub mod jwt;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use policy::require_role;
