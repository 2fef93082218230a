use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::pages::AddPageForm;
use crate::repository::DieselRepository;
use crate::routes::auth::LOGIN_URL;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::pages::{
    add_page as add_page_service, goto_page as goto_page_service,
    show_add_page as show_add_page_service,
};

#[get("/category/{slug}/add_page")]
pub async fn show_add_page(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_add_page_service(&slug, &user, repo.get_ref()) {
        Ok(category) => {
            let mut context = base_context(&flash_messages, Some(&user), "add_page");
            context.insert("category", &category);
            context.insert("form", &AddPageForm::default());
            render_template(&tera, "pages/add.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(err) => {
            log::error!("Failed to render add page form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/add_page")]
pub async fn add_page(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddPageForm>,
) -> impl Responder {
    let slug = slug.into_inner();

    match add_page_service(&slug, form.clone(), &user, repo.get_ref()) {
        Ok(page) => {
            FlashMessage::success(format!("Page {} added.", page.title)).send();
            redirect(&format!("/category/{slug}"))
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(ServiceError::Form(errors)) => match show_add_page_service(&slug, &user, repo.get_ref()) {
            Ok(category) => {
                let mut context = base_context(&flash_messages, Some(&user), "add_page");
                context.insert("category", &category);
                context.insert("form", &form);
                context.insert("errors", &errors);
                render_template(&tera, "pages/add.html", &context)
            }
            Err(_) => redirect("/"),
        },
        Err(err) => {
            log::error!("Failed to add page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Counts the click-through, then sends the browser to the page itself.
#[get("/goto/{page_id}")]
pub async fn goto_page(page_id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match goto_page_service(page_id.into_inner(), repo.get_ref()) {
        Ok(url) => redirect(&url),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(err) => {
            log::error!("Failed to follow page link: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
