use crate::domain::auth::AuthenticatedUser;

pub mod auth;
pub mod categories;
pub mod errors;
pub mod main;
pub mod pages;
pub mod visits;

pub use errors::{ServiceError, ServiceResult};

/// Write operations are reserved for logged-in users whose account is active.
fn ensure_active(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.is_active {
        Ok(())
    } else {
        log::warn!("Rejected write from inactive user {}", user.username);
        Err(ServiceError::Unauthorized)
    }
}
