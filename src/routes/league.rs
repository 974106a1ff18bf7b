use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::{Duration, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::AppConfig;
use crate::dto::league_dto::{HealthCheck, LeagueDashboard, Livescores};
use crate::error::AppError;
use crate::services::{
    league_queries::{MatchOrder, active_group_standings, fetch_matches},
    match_rules::MatchFilter,
    playoffs::build_bracket,
};

const DASHBOARD_LIST_SIZE: i64 = 6;

pub async fn health_check() -> impl IntoResponse {
    let status = HealthCheck {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    (StatusCode::OK, Json(status))
}

/**
 * GET the home dashboard: live, recent and upcoming matches, group tables,
 * the playoff bracket and the qualifiers of each group.
 */
pub async fn get_dashboard(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<AppConfig>,
) -> Result<impl IntoResponse, AppError> {
    info!("Building league dashboard.");

    let live_matches = fetch_matches(&pool, &MatchFilter::live(), MatchOrder::Earliest, None, None).await?;
    let recent_matches = fetch_matches(
        &pool,
        &MatchFilter::completed(),
        MatchOrder::Latest,
        Some(DASHBOARD_LIST_SIZE),
        None,
    )
    .await?;
    let upcoming_matches = fetch_matches(
        &pool,
        &MatchFilter::scheduled(),
        MatchOrder::Earliest,
        Some(DASHBOARD_LIST_SIZE),
        None,
    )
    .await?;

    let group_standings = active_group_standings(&pool, config.qualifiers_per_group).await?;
    let qualified_clubs = group_standings
        .iter()
        .map(|g| (g.group.name.clone(), g.qualified.clone()))
        .collect();

    let playoffs = fetch_matches(&pool, &MatchFilter::playoffs(), MatchOrder::Earliest, None, None).await?;

    Ok((
        StatusCode::OK,
        Json(LeagueDashboard {
            live_matches,
            recent_matches,
            upcoming_matches,
            group_standings,
            playoff_matches: build_bracket(playoffs),
            qualified_clubs,
        }),
    ))
}

pub async fn get_playoffs(Extension(pool): Extension<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let playoffs = fetch_matches(&pool, &MatchFilter::playoffs(), MatchOrder::Earliest, None, None).await?;
    Ok((StatusCode::OK, Json(build_bracket(playoffs))))
}

/**
 * GET live matches plus everything dated today (UTC).
 */
pub async fn get_livescores(Extension(pool): Extension<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let live_matches = fetch_matches(&pool, &MatchFilter::live(), MatchOrder::Earliest, None, None).await?;

    let (start, end) = day_bounds(Utc::now().naive_utc());
    let today_matches = fetch_matches(
        &pool,
        &MatchFilter::default().between(start, end),
        MatchOrder::Earliest,
        None,
        None,
    )
    .await?;

    Ok((StatusCode::OK, Json(Livescores { live_matches, today_matches })))
}

fn day_bounds(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = now.date().and_time(chrono::NaiveTime::MIN);
    (start, start + Duration::days(1))
}
