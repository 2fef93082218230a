use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use std::future::{Ready, ready};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{
    current_user, login as login_service, register as register_service,
};

pub const LOGIN_URL: &str = "/login";

fn login_required(reason: &'static str) -> actix_web::Error {
    InternalError::from_response(reason, redirect(LOGIN_URL)).into()
}

fn resolve_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| login_required("no identity"))?;
    let id = identity.id().map_err(|e| {
        log::warn!("Unreadable identity: {e}");
        login_required("invalid identity")
    })?;

    let Some(repo) = req.app_data::<web::Data<DieselRepository>>() else {
        log::error!("Repository is not registered as app data");
        return Err(actix_web::error::ErrorInternalServerError("misconfigured"));
    };

    match current_user(&id, repo.get_ref()) {
        Ok(user) => Ok(user),
        Err(ServiceError::Internal) => {
            Err(actix_web::error::ErrorInternalServerError("user lookup failed"))
        }
        Err(_) => {
            identity.logout();
            Err(login_required("unknown or inactive user"))
        }
    }
}

/// Requests without a logged-in, active user are redirected to the login
/// page. Use `Option<AuthenticatedUser>` on pages open to everyone.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_user(req))
    }
}

#[get("/register")]
pub async fn show_register(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, user.as_ref(), "register");
    context.insert("form", &RegisterForm::default());
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match register_service(form.clone(), repo.get_ref(), Utc::now().naive_utc()) {
        Ok(user) => {
            FlashMessage::success(format!("Welcome, {}! You can now log in.", user.username))
                .send();
            redirect(LOGIN_URL)
        }
        Err(ServiceError::Form(errors)) => {
            let mut context = base_context(&flash_messages, None, "register");
            context.insert("form", &form);
            context.insert("errors", &errors);
            render_template(&tera, "auth/register.html", &context)
        }
        Err(err) => {
            log::error!("Failed to register user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/login")]
pub async fn show_login(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, user.as_ref(), "login");
    context.insert("form", &LoginForm::default());
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match login_service(form.clone(), repo.get_ref()) {
        Ok(user) => {
            if let Err(e) = Identity::login(&req.extensions(), user.id.to_string()) {
                log::error!("Failed to attach identity: {e}");
                return HttpResponse::InternalServerError().finish();
            }
            log::info!("{} logged in", user.username);
            redirect("/")
        }
        Err(ServiceError::Form(errors)) => {
            let mut context = base_context(&flash_messages, None, "login");
            context.insert("form", &form);
            context.insert("errors", &errors);
            render_template(&tera, "auth/login.html", &context)
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: AuthenticatedUser, identity: Identity) -> impl Responder {
    identity.logout();
    log::info!("{} logged out", user.username);
    redirect("/")
}

#[get("/restricted")]
pub async fn restricted(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, Some(&user), "restricted");
    render_template(&tera, "auth/restricted.html", &context)
}
