use serde::Serialize;

use crate::domain::types::{UserId, Username};
use crate::domain::user::User;

/// Identity attached to a request once its session resolves to a user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: Username,
    pub is_active: bool,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}
