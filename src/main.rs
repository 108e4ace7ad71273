use std::io;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tera::Tera;

use pushkind_portfolio::db::establish_connection_pool;
use pushkind_portfolio::domain::auth::AuthChange;
use pushkind_portfolio::models::config::ServerConfig;
use pushkind_portfolio::navigation::Router;
use pushkind_portfolio::navigation::events::AuthEvents;
use pushkind_portfolio::repository::DieselRepository;
use pushkind_portfolio::routes::api::{api_v1_categories, api_v1_category, api_v1_preview};
use pushkind_portfolio::routes::auth::{login, logout};
use pushkind_portfolio::routes::categories::{add_category, delete_category, update_category};
use pushkind_portfolio::routes::cv::{download_cv, upload_cv};
use pushkind_portfolio::routes::main::page;
use pushkind_portfolio::routes::portfolio::{add_item, delete_item, update_item};
use pushkind_portfolio::routes::sub_categories::{add_sub_category, delete_sub_category};
use pushkind_portfolio::storage::LocalMediaStorage;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = ServerConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database.url).map_err(|e| {
        log::error!("Failed to establish database connection: {e}");
        io::Error::other(e)
    })?;
    {
        let mut conn = pool.get().map_err(io::Error::other)?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            log::error!("Failed to run migrations: {e}");
            io::Error::other(e.to_string())
        })?;
    }

    std::fs::create_dir_all(&server_config.media.dir)?;
    let storage = LocalMediaStorage::new(&server_config.media.dir, &server_config.media.url);

    let tera = Tera::new(&server_config.templates).map_err(|e| {
        log::error!("Failed to parse templates: {e}");
        io::Error::other(e)
    })?;

    let secret_key = Key::try_from(server_config.server.secret.as_bytes()).map_err(|e| {
        log::error!("Server secret must be at least 64 bytes: {e}");
        io::Error::other(e)
    })?;
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let auth_events = AuthEvents::new();
    // Lives as long as the server.
    let _auth_log = auth_events.subscribe(|change| match change {
        AuthChange::SignedIn(session) => log::info!("Session opened for {}", session.email),
        AuthChange::SignedOut => log::info!("Session closed"),
    });

    let router = Router::new(server_config.navigation.clone());
    let repo = DieselRepository::new(pool);
    let bind = (server_config.server.host.clone(), server_config.server.port);
    log::info!("Starting server on {}:{}", bind.0, bind.1);

    let media_url = server_config.media.url.clone();
    let media_dir = server_config.media.dir.clone();

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
            .service(Files::new(&media_url, &media_dir))
            .service(login)
            .service(logout)
            .service(add_category)
            .service(update_category)
            .service(delete_category)
            .service(add_sub_category)
            .service(delete_sub_category)
            .service(add_item)
            .service(update_item)
            .service(delete_item)
            .service(upload_cv)
            .service(download_cv)
            .service(api_v1_categories)
            .service(api_v1_category)
            .service(api_v1_preview)
            // Catch-all page router, must stay last.
            .service(page)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(router.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(auth_events.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
