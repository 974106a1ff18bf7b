use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::warn;

use crate::dto::{
    club_dto::Club,
    group_dto::{Group, GroupStandings},
    match_dto::{Match, MatchStatus},
    standings_dto::ClubRecord,
};
use crate::services::league_queries::{fetch_group_clubs, fetch_group_games};

/// Builds the group table from its members and their matches.
///
/// Only completed matches of this group between two member clubs count.
/// Anything else is skipped, so callers may pass an unfiltered list. Rows
/// start in `members` order and are stably sorted by points, goal
/// difference and goals scored, all descending.
pub fn compute_standings(group: &Group, members: &[Club], matches: &[Match]) -> Vec<ClubRecord> {
    let mut table: Vec<ClubRecord> = members.iter().cloned().map(ClubRecord::new).collect();
    let index: HashMap<i64, usize> = members
        .iter()
        .enumerate()
        .map(|(i, club)| (club.id, i))
        .collect();

    for game in matches {
        if game.status != MatchStatus::Completed || game.group_id != Some(group.id) {
            continue;
        }

        let (Some(&home), Some(&away)) = (index.get(&game.home_club_id), index.get(&game.away_club_id)) else {
            warn!(
                "Match {} in group {} involves a club outside the group, skipping it.",
                game.id, group.id
            );
            continue;
        };

        if game.home_goals.is_none() || game.away_goals.is_none() {
            warn!("Completed match {} has no final score, counting missing goals as 0.", game.id);
        }
        let home_goals = game.home_goals.unwrap_or(0);
        let away_goals = game.away_goals.unwrap_or(0);

        record_result(&mut table[home], home_goals, away_goals);
        record_result(&mut table[away], away_goals, home_goals);
    }

    // sort_by is stable, fully tied clubs keep their member order.
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });

    table
}

fn record_result(record: &mut ClubRecord, scored: i64, conceded: i64) {
    record.played += 1;
    record.goals_for += scored;
    record.goals_against += conceded;
    record.goal_difference = record.goals_for - record.goals_against;

    if scored > conceded {
        record.won += 1;
        record.points += 3;
    } else if scored == conceded {
        record.drawn += 1;
        record.points += 1;
    } else {
        record.lost += 1;
    }
}

/// The first `count` rows of a sorted table, or all of them when the group is smaller.
pub fn qualifiers(standings: &[ClubRecord], count: usize) -> Vec<ClubRecord> {
    standings.iter().take(count).cloned().collect()
}

pub async fn load_group_standings(
    pool: &SqlitePool,
    group: Group,
    qualifier_count: usize,
) -> Result<GroupStandings, sqlx::Error> {
    let members = fetch_group_clubs(pool, group.id).await?;
    let games = fetch_group_games(pool, group.id, MatchStatus::Completed).await?;

    let standings = compute_standings(&group, &members, &games);
    let qualified = qualifiers(&standings, qualifier_count);

    Ok(GroupStandings { group, standings, qualified })
}
