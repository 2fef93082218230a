use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, UserId, Username, WebsiteUrl};

/// A registered account.
///
/// `password_hash` holds a PHC-formatted Argon2 hash and is never rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub website: Option<WebsiteUrl>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub website: Option<WebsiteUrl>,
    pub created_at: NaiveDateTime,
}
