use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use tracing::info;

use crate::dto::player_dto::{Player, PlayerPayload};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::services::league_queries::{fetch_club, fetch_club_players};

/**
 * GET the roster of a club, ordered by jersey number.
 */
pub async fn get_club_players(
    Extension(pool): Extension<SqlitePool>,
    Path(club_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if fetch_club(&pool, club_id).await?.is_none() {
        return Err(AppError::NotFound("Club was not found.".to_string()));
    }

    let players = fetch_club_players(&pool, club_id).await?;
    Ok((StatusCode::OK, Json(players)))
}

pub async fn create_player(
    Extension(pool): Extension<SqlitePool>,
    Path(club_id): Path<i64>,
    AppJson(payload): AppJson<PlayerPayload>,
) -> Result<impl IntoResponse, AppError> {
    info!("Adding player {} to club {}", payload.name, club_id);
    payload.validate().map_err(AppError::Validation)?;

    if fetch_club(&pool, club_id).await?.is_none() {
        return Err(AppError::NotFound("Club was not found.".to_string()));
    }

    let player = sqlx::query_as::<_, Player>(
        r#"
        INSERT INTO players (club_id, name, jersey_number, position, birth_date, nationality)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(club_id)
    .bind(payload.name.trim())
    .bind(payload.jersey_number)
    .bind(&payload.position)
    .bind(payload.birth_date)
    .bind(&payload.nationality)
    .fetch_one(&pool)
    .await
    .map_err(|e| jersey_taken(e, payload.jersey_number))?;

    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update_player(
    Extension(pool): Extension<SqlitePool>,
    Path(player_id): Path<i64>,
    AppJson(payload): AppJson<PlayerPayload>,
) -> Result<impl IntoResponse, AppError> {
    info!("Updating player {}", player_id);
    payload.validate().map_err(AppError::Validation)?;

    let player = sqlx::query_as::<_, Player>(
        r#"
        UPDATE players
        SET name = ?, jersey_number = ?, position = ?, birth_date = ?, nationality = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(payload.name.trim())
    .bind(payload.jersey_number)
    .bind(&payload.position)
    .bind(payload.birth_date)
    .bind(&payload.nationality)
    .bind(player_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| jersey_taken(e, payload.jersey_number))?
    .ok_or_else(|| AppError::NotFound("Player was not found.".to_string()))?;

    Ok((StatusCode::OK, Json(player)))
}

pub async fn delete_player(
    Extension(pool): Extension<SqlitePool>,
    Path(player_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("Deleting player {}", player_id);

    let res = sqlx::query("DELETE FROM players WHERE id = ?")
        .bind(player_id)
        .execute(&pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Player was not found.".to_string()));
    }
    Ok((StatusCode::OK, Json("Player was successfully removed.".to_string())))
}

fn jersey_taken(e: sqlx::Error, jersey_number: i64) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(format!("Jersey number {} is already taken in this club.", jersey_number))
        }
        _ => AppError::from(e),
    }
}
