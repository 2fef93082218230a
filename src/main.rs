use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use rango::db::establish_connection_pool;
use rango::models::config::ServerConfig;
use rango::repository::DieselRepository;
use rango::routes::auth::{login, logout, register, restricted, show_login, show_register};
use rango::routes::categories::{
    add_category, delete_category, like_category, show_add_category, show_category,
    update_category,
};
use rango::routes::main::{about, index};
use rango::routes::pages::{add_page, goto_page, show_add_page};

fn signing_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            log::warn!("APP__SECRET is missing or shorter than 64 bytes; using a random key");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let secret_key = signing_key(&server_config.secret);
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting Rango on {}:{} (category delete policy: {:?})",
        bind_address.0,
        bind_address.1,
        server_config.category_delete_policy
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .service(index)
            .service(about)
            .service(show_category)
            .service(show_add_category)
            .service(add_category)
            .service(update_category)
            .service(like_category)
            .service(delete_category)
            .service(show_add_page)
            .service(add_page)
            .service(goto_page)
            .service(show_register)
            .service(register)
            .service(show_login)
            .service(login)
            .service(logout)
            .service(restricted)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
