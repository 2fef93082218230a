use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::{AddCategoryForm, UpdateCategoryForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::auth::LOGIN_URL;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    like_category as like_category_service, show_category as show_category_service,
    update_category as update_category_service,
};

fn category_url(slug: &str) -> String {
    format!("/category/{slug}")
}

#[get("/category/{slug}")]
pub async fn show_category(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_category_service(&slug, repo.get_ref()) {
        Ok(detail) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "category");
            context.insert("category", &detail.category);
            context.insert("pages", &detail.pages);
            context.insert("categories", &detail.categories);
            render_template(&tera, "categories/show.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render category page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/add_category")]
pub async fn show_add_category(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "add_category");
    context.insert("form", &AddCategoryForm::default());
    render_template(&tera, "categories/add.html", &context)
}

#[post("/add_category")]
pub async fn add_category(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    match add_category_service(form.clone(), &user, repo.get_ref()) {
        Ok(category) => {
            FlashMessage::success(format!("Category {} added.", category.name)).send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::Form(errors)) => {
            let mut context = base_context(&flash_messages, Some(&user), "add_category");
            context.insert("form", &form);
            context.insert("errors", &errors);
            render_template(&tera, "categories/add.html", &context)
        }
        Err(err) => {
            log::error!("Failed to add category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/update")]
pub async fn update_category(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateCategoryForm>,
) -> impl Responder {
    let slug = slug.into_inner();

    match update_category_service(&slug, form, &user, repo.get_ref()) {
        Ok(category) => {
            FlashMessage::success("Category updated.").send();
            redirect(&category_url(&category.slug))
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(errors)) => {
            FlashMessage::error(errors.to_string()).send();
            redirect(&category_url(&slug))
        }
        Err(err) => {
            log::error!("Failed to update category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/like")]
pub async fn like_category(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let slug = slug.into_inner();

    match like_category_service(&slug, &user, repo.get_ref()) {
        Ok(likes) => {
            FlashMessage::success(format!("Thanks for the like! {likes} so far.")).send();
            redirect(&category_url(&slug))
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to like category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/delete")]
pub async fn delete_category(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let slug = slug.into_inner();

    match delete_category_service(
        &slug,
        &user,
        repo.get_ref(),
        server_config.category_delete_policy,
    ) {
        Ok(()) => {
            FlashMessage::success("Category deleted.").send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect("/")
        }
        Err(ServiceError::Conflict(_)) => {
            FlashMessage::error("Remove the pages of this category before deleting it.").send();
            redirect(&category_url(&slug))
        }
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
