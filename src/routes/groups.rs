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
use crate::dto::group_dto::{AttachClub, Group, GroupDetails, GroupPayload};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::services::{
    league_queries::{active_group_standings, fetch_club, fetch_group, fetch_group_clubs},
    standings::load_group_standings,
    websocket::{send_livescores_update, send_standings_update},
};

/**
 * GET active groups with their standings and qualifiers.
 */
pub async fn get_groups(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<AppConfig>,
) -> Result<impl IntoResponse, AppError> {
    info!("Fetching group standings.");
    let groups = active_group_standings(&pool, config.qualifiers_per_group).await?;
    Ok((StatusCode::OK, Json(groups)))
}

pub async fn create_group(
    Extension(pool): Extension<SqlitePool>,
    AppJson(payload): AppJson<GroupPayload>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating group {}", payload.name);
    payload.validate().map_err(AppError::Validation)?;

    let group = sqlx::query_as::<_, Group>(
        "INSERT INTO groups (name, description, status) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(payload.name.trim())
    .bind(&payload.description)
    .bind(payload.status.unwrap_or_default())
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(group)))
}

/**
 * GET one group, any status, with members and table.
 */
pub async fn get_group(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<AppConfig>,
    Path(group_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let group = fetch_group(&pool, group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group was not found.".to_string()))?;

    let clubs = fetch_group_clubs(&pool, group_id).await?;
    let standings = load_group_standings(&pool, group, config.qualifiers_per_group).await?;

    Ok((StatusCode::OK, Json(GroupDetails { standings, clubs })))
}

pub async fn update_group(
    Extension(pool): Extension<SqlitePool>,
    Path(group_id): Path<i64>,
    AppJson(payload): AppJson<GroupPayload>,
) -> Result<impl IntoResponse, AppError> {
    info!("Updating group {}", group_id);
    payload.validate().map_err(AppError::Validation)?;

    let group = sqlx::query_as::<_, Group>(
        r#"
        UPDATE groups
        SET name = ?, description = ?, status = COALESCE(?, status), updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(payload.name.trim())
    .bind(&payload.description)
    .bind(payload.status)
    .bind(group_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Group was not found.".to_string()))?;

    Ok((StatusCode::OK, Json(group)))
}

/**
 * DELETE a group. Its memberships and group matches are removed with it.
 */
pub async fn delete_group(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Path(group_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("Deleting group {}", group_id);

    let res = sqlx::query("DELETE FROM groups WHERE id = ?")
        .bind(group_id)
        .execute(&pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Group was not found.".to_string()));
    }

    send_livescores_update(&pool, &tx).await;
    Ok((StatusCode::OK, Json("Group deleted successfully.".to_string())))
}

pub async fn attach_club(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Extension(config): Extension<AppConfig>,
    Path(group_id): Path<i64>,
    AppJson(payload): AppJson<AttachClub>,
) -> Result<impl IntoResponse, AppError> {
    info!("Adding club {} to group {}", payload.club_id, group_id);

    if fetch_group(&pool, group_id).await?.is_none() {
        return Err(AppError::NotFound("Group was not found.".to_string()));
    }
    if fetch_club(&pool, payload.club_id).await?.is_none() {
        return Err(AppError::NotFound("Club was not found.".to_string()));
    }

    sqlx::query("INSERT INTO group_clubs (group_id, club_id) VALUES (?, ?)")
        .bind(group_id)
        .bind(payload.club_id)
        .execute(&pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Club is already in this group.".to_string())
            }
            _ => AppError::from(e),
        })?;

    send_standings_update(&pool, &tx, &config, group_id).await;
    Ok((StatusCode::CREATED, Json("Club added to group.".to_string())))
}

pub async fn detach_club(
    Extension(pool): Extension<SqlitePool>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Extension(config): Extension<AppConfig>,
    Path((group_id, club_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    info!("Removing club {} from group {}", club_id, group_id);

    let res = sqlx::query("DELETE FROM group_clubs WHERE group_id = ? AND club_id = ?")
        .bind(group_id)
        .bind(club_id)
        .execute(&pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Club is not in this group.".to_string()));
    }

    send_standings_update(&pool, &tx, &config, group_id).await;
    Ok((StatusCode::OK, Json("Club removed from group.".to_string())))
}
