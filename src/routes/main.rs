use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::main::{show_about, show_index};

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    mut session: Session,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_index(repo.get_ref(), &mut session, Utc::now().naive_utc()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "index");
            context.insert("categories", &data.categories);
            context.insert("pages", &data.pages);
            context.insert("visits", &data.visits.visits);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/about")]
pub async fn about(
    user: Option<AuthenticatedUser>,
    mut session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_about(&mut session, Utc::now().naive_utc()) {
        Ok(summary) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "about");
            context.insert("visits", &summary.visits);
            render_template(&tera, "main/about.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render about page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
