use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use chrono::Utc;
use tera::Tera;

use rango::domain::category::NewCategory;
use rango::domain::types::{CategoryName, CategorySlug, EmailAddress, Username};
use rango::domain::user::NewUser;
use rango::repository::{CategoryReader, CategoryWriter, DieselRepository, UserWriter};
use rango::routes::auth::login;
use rango::routes::categories::like_category;
use rango::services::auth::hash_password;

mod common;

const PASSWORD: &str = "tango-with-django";

fn seed(repo: &DieselRepository) {
    let name = CategoryName::new("Python").expect("valid category name");
    repo.create_category(&NewCategory::new(name).expect("sluggable name"))
        .expect("should create category");
    repo.create_user(&NewUser {
        username: Username::new("laura").expect("valid username"),
        email: EmailAddress::new("laura@example.com").expect("valid email"),
        password_hash: hash_password(PASSWORD).expect("should hash password"),
        website: None,
        created_at: Utc::now().naive_utc(),
    })
    .expect("should create user");
}

fn python_likes(repo: &DieselRepository) -> i32 {
    let slug = CategorySlug::new("python").expect("valid slug");
    repo.get_category_by_slug(&slug)
        .expect("should query category")
        .expect("category should exist")
        .likes
        .get()
}

#[actix_web::test]
async fn like_redirects_back_to_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);

    let key = Key::generate();
    let app = test::init_service(
        App::new()
            .wrap(
                FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
                    .build(),
            )
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(Tera::default()))
            .service(login)
            .service(like_category),
    )
    .await;

    // Anonymous likes are sent to the login page and not counted.
    let req = test::TestRequest::post()
        .uri("/category/python/like")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    assert_eq!(python_likes(&repo), 0);

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(format!("username=laura&password={PASSWORD}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookies: Vec<Cookie<'static>> = resp
        .response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect();
    assert!(!cookies.is_empty());

    let mut req = test::TestRequest::post().uri("/category/python/like");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/category/python"
    );
    assert_eq!(python_likes(&repo), 1);
}
