use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod dto;
mod error;
mod extract;
mod routes;
mod services;

use config::AppConfig;
use services::seeder::seed_demo_league;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let pool = app::connect(&config.database_url, config.max_connections).await?;
    info!("Connected to sqlite database.");

    if config.seed_demo {
        seed_demo_league(&pool).await?;
    }

    let (tx, _rx) = broadcast::channel::<String>(100);
    let router = app::build_router(pool, tx, config.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Started server on {}.", config.bind_address);
    axum::serve(listener, router).await?;

    Ok(())
}
