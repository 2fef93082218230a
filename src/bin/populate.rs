//! Seeds the catalog with the sample categories and pages.
//!
//! Safe to run repeatedly: existing rows are reused and page URLs and view
//! counts are refreshed.

use dotenvy::dotenv;

use rango::db::establish_connection_pool;
use rango::models::config::ServerConfig;
use rango::repository::DieselRepository;
use rango::seed::populate;

fn main() {
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

    log::info!("Starting Rango population script...");
    match populate(&repo) {
        Ok(seeded) => {
            for (category, page) in seeded {
                log::info!("- {}: {}", category.name, page.title);
            }
        }
        Err(e) => {
            log::error!("Failed to populate the catalog: {e}");
            std::process::exit(1);
        }
    }
}
