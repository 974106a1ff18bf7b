use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::dto::{
    club_dto::Club,
    group_dto::{Group, GroupStandings, GroupStatus},
    match_dto::{Match, MatchResponse, MatchStatus, MatchWithClubs},
    player_dto::Player,
};
use crate::services::{match_rules::MatchFilter, standings::load_group_standings};

const MATCH_SELECT: &str = r#"
    SELECT
        m.*,
        hc.name AS home_club_name,
        hc.short_name AS home_club_short_name,
        ac.name AS away_club_name,
        ac.short_name AS away_club_short_name,
        g.name AS group_name
    FROM matches m
    JOIN clubs hc ON hc.id = m.home_club_id
    JOIN clubs ac ON ac.id = m.away_club_id
    LEFT JOIN groups g ON g.id = m.group_id
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOrder {
    Earliest,
    Latest,
}

impl MatchOrder {
    fn sql(self) -> &'static str {
        match self {
            MatchOrder::Earliest => " ORDER BY m.match_date ASC, m.id ASC",
            MatchOrder::Latest => " ORDER BY m.match_date DESC, m.id DESC",
        }
    }
}

pub async fn fetch_matches(
    pool: &SqlitePool,
    filter: &MatchFilter,
    order: MatchOrder,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<MatchResponse>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(MATCH_SELECT);
    filter.push_where(&mut qb);
    qb.push(order.sql());

    if let Some(limit) = limit {
        qb.push(" LIMIT ").push_bind(limit);
        if let Some(offset) = offset {
            qb.push(" OFFSET ").push_bind(offset);
        }
    }

    let rows = qb.build_query_as::<MatchWithClubs>().fetch_all(pool).await?;
    Ok(rows.into_iter().map(MatchResponse::from).collect())
}

pub async fn count_matches(pool: &SqlitePool, filter: &MatchFilter) -> Result<i64, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM matches m");
    filter.push_where(&mut qb);

    let (total,): (i64,) = qb.build_query_as().fetch_one(pool).await?;
    Ok(total)
}

pub async fn fetch_match(pool: &SqlitePool, match_id: i64) -> Result<Option<MatchResponse>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(MATCH_SELECT);
    qb.push(" WHERE m.id = ").push_bind(match_id);

    let row = qb.build_query_as::<MatchWithClubs>().fetch_optional(pool).await?;
    Ok(row.map(MatchResponse::from))
}

pub async fn fetch_club(pool: &SqlitePool, club_id: i64) -> Result<Option<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = ?")
        .bind(club_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_group(pool: &SqlitePool, group_id: i64) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = ?")
        .bind(group_id)
        .fetch_optional(pool)
        .await
}

/// Member clubs of a group, ordered by name.
pub async fn fetch_group_clubs(pool: &SqlitePool, group_id: i64) -> Result<Vec<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>(
        r#"
        SELECT c.*
        FROM clubs c
        JOIN group_clubs gc ON gc.club_id = c.id
        WHERE gc.group_id = ?
        ORDER BY c.name
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

pub async fn is_group_member(pool: &SqlitePool, group_id: i64, club_id: i64) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM group_clubs WHERE group_id = ? AND club_id = ?")
        .bind(group_id)
        .bind(club_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn fetch_group_games(
    pool: &SqlitePool,
    group_id: i64,
    status: MatchStatus,
) -> Result<Vec<Match>, sqlx::Error> {
    let filter = MatchFilter {
        status: Some(status),
        ..MatchFilter::group_phase().in_group(group_id)
    };

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT m.* FROM matches m");
    filter.push_where(&mut qb);
    qb.push(" ORDER BY m.match_date, m.id");

    qb.build_query_as::<Match>().fetch_all(pool).await
}

pub async fn fetch_club_groups(pool: &SqlitePool, club_id: i64) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT g.*
        FROM groups g
        JOIN group_clubs gc ON gc.group_id = g.id
        WHERE gc.club_id = ?
        ORDER BY g.name
        "#,
    )
    .bind(club_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_club_players(pool: &SqlitePool, club_id: i64) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE club_id = ? ORDER BY jersey_number")
        .bind(club_id)
        .fetch_all(pool)
        .await
}

/// Standings of every active group, ordered by group name.
pub async fn active_group_standings(
    pool: &SqlitePool,
    qualifier_count: usize,
) -> Result<Vec<GroupStandings>, sqlx::Error> {
    let groups = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE status = ? ORDER BY name, id")
        .bind(GroupStatus::Active)
        .fetch_all(pool)
        .await?;

    let mut all = Vec::with_capacity(groups.len());
    for group in groups {
        all.push(load_group_standings(pool, group, qualifier_count).await?);
    }
    Ok(all)
}
