use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::NaiveDateTime;
use rand_core::OsRng;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::UserId;
use crate::domain::user::NewUser;
use crate::forms::FieldErrors;
use crate::forms::auth::{LoginForm, LoginFormPayload, RegisterForm, RegisterFormPayload};
use crate::repository::{RepositoryError, UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const INVALID_LOGIN: &str = "Invalid login details supplied.";
const ACCOUNT_DISABLED: &str = "Your Rango account is disabled.";

/// Hash a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Malformed stored hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash is malformed: {e}");
            false
        }
    }
}

pub fn register<R>(
    form: RegisterForm,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + UserWriter,
{
    let payload = RegisterFormPayload::try_from(form)?;

    let taken = || ServiceError::Form(FieldErrors::single("username", USERNAME_TAKEN));

    match repo.get_user_by_username(&payload.username) {
        Ok(Some(_)) => return Err(taken()),
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to get user: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        log::error!("Failed to hash password: {e}");
        ServiceError::Internal
    })?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password_hash,
        website: payload.website,
        created_at: now,
    };

    match repo.create_user(&new_user) {
        Ok(user) => {
            log::info!("Registered user {}", user.username);
            Ok(user.into())
        }
        Err(RepositoryError::Conflict(_)) => Err(taken()),
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Check credentials. Unknown users and wrong passwords are reported the same
/// way.
pub fn login<R>(form: LoginForm, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let invalid = || ServiceError::Form(FieldErrors::single("username", INVALID_LOGIN));

    let payload = LoginFormPayload::try_from(form).map_err(|_| invalid())?;

    let user = match repo.get_user_by_username(&payload.username) {
        Ok(Some(user)) => user,
        Ok(None) => {
            log::info!("Login attempt for unknown user {}", payload.username);
            return Err(invalid());
        }
        Err(e) => {
            log::error!("Failed to get user: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        log::info!("Invalid password for {}", user.username);
        return Err(invalid());
    }

    if !user.is_active {
        return Err(ServiceError::Form(FieldErrors::single(
            "username",
            ACCOUNT_DISABLED,
        )));
    }

    Ok(user.into())
}

/// Resolve the identity stored in the session to an active user.
pub fn current_user<R>(identity: &str, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let id = identity
        .parse::<i32>()
        .ok()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(ServiceError::Unauthorized)?;

    match repo.get_user_by_id(id) {
        Ok(Some(user)) if user.is_active => Ok(user.into()),
        Ok(_) => Err(ServiceError::Unauthorized),
        Err(e) => {
            log::error!("Failed to get user: {e}");
            Err(ServiceError::Internal)
        }
    }
}
