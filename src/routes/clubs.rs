use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::info;

use crate::config::AppConfig;
use crate::dto::club_dto::{Club, ClubDetails, ClubListEntry, ClubPayload};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::services::{
    league_queries::{MatchOrder, fetch_club, fetch_club_groups, fetch_club_players, fetch_matches},
    match_rules::MatchFilter,
    websocket::{send_livescores_update, send_standings_update},
};

/**
 * GET every club, ordered by name, with its groups and roster.
 */
pub async fn get_clubs(Extension(pool): Extension<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    info!("Fetching clubs.");

    let clubs = sqlx::query_as::<_, Club>("SELECT * FROM clubs ORDER BY name")
        .fetch_all(&pool)
        .await?;

    let mut entries = Vec::with_capacity(clubs.len());
    for club in clubs {
        let groups = fetch_club_groups(&pool, club.id).await?;
        let players = fetch_club_players(&pool, club.id).await?;
        entries.push(ClubListEntry { club, groups, players });
    }

    Ok((StatusCode::OK, Json(entries)))
}

/**
 * POST request to create a new club.
 */
pub async fn create_club(
    Extension(pool): Extension<SqlitePool>,
    AppJson(payload): AppJson<ClubPayload>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating club {}", payload.name);
    payload.validate().map_err(AppError::Validation)?;

    let club = sqlx::query_as::<_, Club>(
        r#"
        INSERT INTO clubs (name, short_name, logo, description, city)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(payload.name.trim())
    .bind(payload.short_name.trim())
    .bind(&payload.logo)
    .bind(&payload.description)
    .bind(&payload.city)
    .fetch_one(&pool)
    .await
    .map_err(name_taken)?;

    Ok((StatusCode::CREATED, Json(club)))
}

/**
 * GET a club with its groups, players and every match it plays in, newest first.
 */
pub async fn get_club(
    Extension(pool): Extension<SqlitePool>,
    Path(club_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let club = fetch_club(&pool, club_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Club was not found.".to_string()))?;

    let groups = fetch_club_groups(&pool, club_id).await?;
    let players = fetch_club_players(&pool, club_id).await?;
    let matches = fetch_matches(
        &pool,
        &MatchFilter::default().involving(club_id),
        MatchOrder::Latest,
        None,
        None,
    )
    .await?;

    Ok((StatusCode::OK, Json(ClubDetails { club, groups, players, matches })))
}

pub async fn update_club(
    Extension(pool): Extension<SqlitePool>,
    Path(club_id): Path<i64>,
    AppJson(payload): AppJson<ClubPayload>,
) -> Result<impl IntoResponse, AppError> {
    info!("Updating club {}", club_id);
    payload.validate().map_err(AppError::Validation)?;

    let club = sqlx::query_as::<_, Club>(
        r#"
        UPDATE clubs
        SET name = ?, short_name = ?, logo = ?, description = ?, city = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(payload.name.trim())
    .bind(payload.short_name.trim())
    .bind(&payload.logo)
    .bind(&payload.description)
    .bind(&payload.city)
    .bind(club_id)
    .fetch_optional(&pool)
    .await
    .map_err(name_taken)?
    .ok_or_else(|| AppError::NotFound("Club was not found.".to_string()))?;

    Ok((StatusCode::OK, Json(club)))
}

/**
 * DELETE a club. Memberships, matches and players go with it, so every
 * group it played in gets a fresh table.
 */
pub async fn delete_club(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Extension(config): Extension<AppConfig>,
    Path(club_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("Deleting club {}", club_id);

    let groups = fetch_club_groups(&pool, club_id).await?;

    let res = sqlx::query("DELETE FROM clubs WHERE id = ?")
        .bind(club_id)
        .execute(&pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Club was not found.".to_string()));
    }

    send_livescores_update(&pool, &tx).await;
    for group in groups {
        send_standings_update(&pool, &tx, &config, group.id).await;
    }

    Ok((StatusCode::OK, Json("Club deleted successfully.".to_string())))
}

fn name_taken(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("This club name or short name is already taken.".to_string())
        }
        _ => AppError::from(e),
    }
}
