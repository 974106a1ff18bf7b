use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::info;

use crate::config::AppConfig;
use crate::dto::match_dto::{CreateMatch, Match, MatchQuery, Paginated, UpdateMatch};
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::services::{
    league_queries::{
        MatchOrder, count_matches, fetch_club, fetch_group, fetch_match, fetch_matches, is_group_member,
    },
    match_rules::MatchFilter,
    websocket::{send_livescores_update, send_standings_update},
};

/**
 * GET matches, newest first, 1-based `page`.
 */
pub async fn get_matches(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<AppConfig>,
    AppQuery(query): AppQuery<MatchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MatchFilter::from(&query);
    let per_page = config.matches_per_page;
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page as i64 - 1) * per_page as i64;

    let total = count_matches(&pool, &filter).await?;
    let data = fetch_matches(&pool, &filter, MatchOrder::Latest, Some(per_page as i64), Some(offset)).await?;

    Ok((StatusCode::OK, Json(Paginated::new(data, page, per_page, total))))
}

/**
 * POST request to schedule a match.
 */
pub async fn create_match(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    AppJson(payload): AppJson<CreateMatch>,
) -> Result<impl IntoResponse, AppError> {
    info!("Scheduling match {} vs {}", payload.home_club_id, payload.away_club_id);
    payload
        .validate(Utc::now().naive_utc())
        .map_err(AppError::Validation)?;

    if fetch_club(&pool, payload.home_club_id).await?.is_none() {
        return Err(AppError::Validation("Selected home club does not exist.".to_string()));
    }
    if fetch_club(&pool, payload.away_club_id).await?.is_none() {
        return Err(AppError::Validation("Selected away club does not exist.".to_string()));
    }
    if let Some(group_id) = payload.group_id {
        if fetch_group(&pool, group_id).await?.is_none() {
            return Err(AppError::Validation("Selected group does not exist.".to_string()));
        }
        for club_id in [payload.home_club_id, payload.away_club_id] {
            if !is_group_member(&pool, group_id, club_id).await? {
                return Err(AppError::Validation(format!(
                    "Club {} is not a member of the selected group.",
                    club_id
                )));
            }
        }
    }

    let match_id = sqlx::query(
        r#"
        INSERT INTO matches (home_club_id, away_club_id, group_id, match_date, match_type, playoff_round, status, notes)
        VALUES (?, ?, ?, ?, ?, ?, 'scheduled', ?)
        "#,
    )
    .bind(payload.home_club_id)
    .bind(payload.away_club_id)
    .bind(payload.group_id)
    .bind(payload.match_date)
    .bind(payload.match_type)
    .bind(payload.playoff_round)
    .bind(&payload.notes)
    .execute(&pool)
    .await?
    .last_insert_rowid();

    let created = fetch_match(&pool, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Match was not found.".to_string()))?;

    send_livescores_update(&pool, &tx).await;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_match(
    Extension(pool): Extension<SqlitePool>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let game = fetch_match(&pool, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Match was not found.".to_string()))?;

    Ok((StatusCode::OK, Json(game)))
}

/**
 * PUT score entry and status transitions. Goals, minute and notes are
 * replaced as sent.
 */
pub async fn update_match(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Extension(config): Extension<AppConfig>,
    Path(match_id): Path<i64>,
    AppJson(payload): AppJson<UpdateMatch>,
) -> Result<impl IntoResponse, AppError> {
    info!("Updating match {}", match_id);
    payload.validate().map_err(AppError::Validation)?;

    let existing = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ?")
        .bind(match_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Match was not found.".to_string()))?;

    sqlx::query(
        r#"
        UPDATE matches
        SET home_goals = ?, away_goals = ?, status = ?, minute = ?,
            notes = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(payload.home_goals)
    .bind(payload.away_goals)
    .bind(payload.status)
    .bind(payload.minute)
    .bind(&payload.notes)
    .bind(match_id)
    .execute(&pool)
    .await?;

    let updated = fetch_match(&pool, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Match was not found.".to_string()))?;

    send_livescores_update(&pool, &tx).await;
    if let Some(group_id) = existing.group_id {
        send_standings_update(&pool, &tx, &config, group_id).await;
    }

    Ok((StatusCode::OK, Json(updated)))
}

pub async fn delete_match(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Extension(config): Extension<AppConfig>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("Deleting match {}", match_id);

    let group_id: Option<Option<i64>> = sqlx::query_scalar("DELETE FROM matches WHERE id = ? RETURNING group_id")
        .bind(match_id)
        .fetch_optional(&pool)
        .await?;

    let Some(group_id) = group_id else {
        return Err(AppError::NotFound("Match was not found.".to_string()));
    };

    send_livescores_update(&pool, &tx).await;
    if let Some(group_id) = group_id {
        send_standings_update(&pool, &tx, &config, group_id).await;
    }

    Ok((StatusCode::OK, Json("Match deleted successfully.".to_string())))
}
