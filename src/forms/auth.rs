use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{EmailAddress, Username, WebsiteUrl};
use crate::forms::{FieldErrors, FormError};

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 32, message = "Usernames are 3 to 32 characters long."))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 8, message = "Passwords must be at least 8 characters long."))]
    pub password: String,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterFormPayload {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub website: Option<WebsiteUrl>,
}

impl TryFrom<RegisterForm> for RegisterFormPayload {
    type Error = FormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut errors = FieldErrors::new();
        let username = errors.check(Username::new(value.username));
        let email = errors.check(EmailAddress::new(value.email));
        let website = match value.website.filter(|w| !w.trim().is_empty()) {
            Some(website) => errors.check(WebsiteUrl::new(website)).map(Some),
            None => Some(None),
        };

        match (username, email, website) {
            (Some(username), Some(email), Some(website)) => Ok(Self {
                username,
                email,
                password: value.password,
                website,
            }),
            _ => Err(FormError(errors)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Please enter your username."))]
    pub username: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Please enter your password."))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub username: Username,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = FormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            username: Username::new(value.username).map_err(FieldErrors::from)?,
            password: value.password,
        })
    }
}
