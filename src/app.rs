use axum::{
    Router,
    extract::Extension,
    routing::{delete, get, post, put},
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::{
    clubs::{create_club, delete_club, get_club, get_clubs, update_club},
    groups::{attach_club, create_group, delete_group, detach_club, get_group, get_groups, update_group},
    league::{get_dashboard, get_livescores, get_playoffs, health_check},
    matches::{create_match, delete_match, get_match, get_matches, update_match},
    players::{create_player, delete_player, get_club_players, update_player},
};
use crate::services::websocket::websocket_handler;

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

pub fn build_router(pool: SqlitePool, tx: broadcast::Sender<String>, config: AppConfig) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/health-check", get(health_check))
        .route("/groups", get(get_groups).post(create_group))
        .route("/groups/{id}", get(get_group).put(update_group).delete(delete_group))
        .route("/groups/{id}/clubs", post(attach_club))
        .route("/groups/{id}/clubs/{club_id}", delete(detach_club))
        .route("/playoffs", get(get_playoffs))
        .route("/livescores", get(get_livescores))
        .route("/clubs", get(get_clubs).post(create_club))
        .route("/clubs/{id}", get(get_club).put(update_club).delete(delete_club))
        .route("/clubs/{id}/players", get(get_club_players).post(create_player))
        .route("/players/{id}", put(update_player).delete(delete_player))
        .route("/matches", get(get_matches).post(create_match))
        .route("/matches/{id}", get(get_match).put(update_match).delete(delete_match))
        .route("/ws", get(websocket_handler))
        .layer(Extension(pool))
        .layer(Extension(tx))
        .layer(Extension(config))
        .layer(CorsLayer::permissive())
}
