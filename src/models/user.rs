use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{EmailAddress, TypeConstraintError, Username, WebsiteUrl};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            username: Username::new(user.username)?,
            email: EmailAddress::new(user.email)?,
            password_hash: user.password_hash,
            website: user.website.map(WebsiteUrl::new).transpose()?,
            is_active: user.is_active,
            created_at: user.created_at,
        })
    }
}

impl From<DomainNewUser> for NewUser {
    fn from(user: DomainNewUser) -> Self {
        Self {
            username: user.username.into_inner(),
            email: user.email.as_str().to_string(),
            password_hash: user.password_hash,
            website: user.website.map(WebsiteUrl::into_inner),
            created_at: user.created_at,
        }
    }
}
