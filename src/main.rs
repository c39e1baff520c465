mod api;
mod config;
mod database;
mod jobs;
mod middleware;
mod models;
mod services;
mod templates;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use crate::{
    config::AppConfig,
    database::{Database, PgUserTable},
    services::{JokeClient, UserStore},
    templates::TemplateRegistry,
    utils::{AppError, SessionStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(startup_error)?;

    log::info!("🚀 Starting Jokers...");
    log::info!(
        "📊 Database: {}@{}:{}/{}",
        config.db.user,
        config.db.host,
        config.db.port,
        config.db.db_name
    );
    let db = Database::connect(&config.db).await.map_err(startup_error)?;
    log::info!("✅ PostgreSQL connected successfully");

    let templates = TemplateRegistry::load(&config.template_dir).map_err(startup_error)?;
    let jokes = JokeClient::new(config.joke_api_url.clone(), config.joke_api_timeout)
        .map_err(startup_error)?;
    log::info!("🃏 Joke API: {}", jokes.base_url());
    let users = UserStore::new(Arc::new(PgUserTable::new(db.pool().clone())), config.password_cost);
    let sessions = web::Data::new(SessionStore::new(config.session_ttl));

    let users_data = web::Data::new(users);
    let jokes_data = web::Data::new(jokes);
    let templates_data = web::Data::new(templates);

    // 🧹 Expired sessions are dropped in the background
    jobs::start_session_sweeper(sessions.clone(), config.session_sweep_interval);

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    log::info!("🌐 Server starting on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(users_data.clone())
            .app_data(jokes_data.clone())
            .app_data(sessions.clone())
            .app_data(templates_data.clone())
            .wrap(middleware::SessionLoader::new(sessions.clone()))
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .configure(api::configure(static_dir.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

fn startup_error(err: AppError) -> std::io::Error {
    log::error!("❌ Startup failed: {}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
