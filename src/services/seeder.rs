use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use rand::{Rng, seq::{IndexedRandom, SliceRandom}};
use sqlx::SqlitePool;
use tracing::info;

use crate::dto::{
    match_dto::{MatchStatus, MatchType, PlayoffRound},
    player_dto::POSITIONS,
};

const CLUBS: [(&str, &str, &str); 16] = [
    ("Manchester United", "MUN", "Manchester"),
    ("Barcelona", "BAR", "Barcelona"),
    ("Real Madrid", "RMA", "Madrid"),
    ("Bayern Munich", "BAY", "Munich"),
    ("Liverpool", "LIV", "Liverpool"),
    ("Chelsea", "CHE", "London"),
    ("Arsenal", "ARS", "London"),
    ("Juventus", "JUV", "Turin"),
    ("AC Milan", "MIL", "Milan"),
    ("Inter Milan", "INT", "Milan"),
    ("Paris Saint-Germain", "PSG", "Paris"),
    ("Borussia Dortmund", "BVB", "Dortmund"),
    ("Atletico Madrid", "ATM", "Madrid"),
    ("Tottenham", "TOT", "London"),
    ("Manchester City", "MCI", "Manchester"),
    ("Ajax", "AJA", "Amsterdam"),
];

const GROUP_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

const FIRST_NAMES: [&str; 12] = [
    "Luca", "Mateo", "Jonas", "Kai", "Diego", "Tom", "Hugo", "Rafael", "Noah", "Bruno", "Leon", "Marco",
];

const LAST_NAMES: [&str; 12] = [
    "Silva", "Müller", "García", "Rossi", "Dubois", "Smith", "de Jong", "Costa", "Fischer", "Moreau",
    "Romero", "Walker",
];

const NATIONALITIES: [&str; 9] = [
    "England", "Spain", "Germany", "France", "Italy", "Brazil", "Argentina", "Netherlands", "Portugal",
];

#[derive(Debug, Clone)]
pub struct PlannedMatch {
    /// Indexes into `CLUBS`.
    pub home: usize,
    pub away: usize,
    /// Index into the planned groups, `None` for playoffs.
    pub group: Option<usize>,
    pub match_date: NaiveDateTime,
    pub match_type: MatchType,
    pub playoff_round: Option<PlayoffRound>,
    pub status: MatchStatus,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub minute: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct PlannedPlayer {
    pub club: usize,
    pub name: String,
    pub jersey_number: i64,
    pub position: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
}

#[derive(Debug, Clone)]
pub struct DemoLeague {
    /// Club indexes per group, group `i` is named `Group {GROUP_LETTERS[i]}`.
    pub groups: Vec<Vec<usize>>,
    pub matches: Vec<PlannedMatch>,
    pub players: Vec<PlannedPlayer>,
}

pub fn plan_demo_league<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> DemoLeague {
    let mut order: Vec<usize> = (0..CLUBS.len()).collect();
    order.shuffle(rng);
    let groups: Vec<Vec<usize>> = order.chunks(CLUBS.len() / GROUP_LETTERS.len()).map(|c| c.to_vec()).collect();

    let mut matches = Vec::new();
    for (g, members) in groups.iter().enumerate() {
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                matches.push(plan_group_match(rng, now, members[i], members[j], g));
            }
        }
    }

    let mut qualified: Vec<usize> = (0..CLUBS.len()).collect();
    qualified.shuffle(rng);
    qualified.truncate(8);
    for (round, count) in [(PlayoffRound::Quarter, 2), (PlayoffRound::Semi, 2), (PlayoffRound::Final, 1)] {
        for _ in 0..count {
            let pair: Vec<usize> = qualified.choose_multiple(rng, 2).copied().collect();
            matches.push(plan_playoff_match(rng, now, pair[0], pair[1], round));
        }
    }

    let mut players = Vec::new();
    for club in 0..CLUBS.len() {
        let mut numbers: Vec<i64> = (1..=99).collect();
        numbers.shuffle(rng);
        let squad = rng.random_range(20..=25);
        for &jersey_number in numbers.iter().take(squad) {
            players.push(plan_player(rng, now, club, jersey_number));
        }
    }

    DemoLeague { groups, matches, players }
}

fn plan_group_match<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    home: usize,
    away: usize,
    group: usize,
) -> PlannedMatch {
    let status = *[
        MatchStatus::Completed,
        MatchStatus::Completed,
        MatchStatus::Completed,
        MatchStatus::Live,
        MatchStatus::Scheduled,
    ]
    .choose(rng)
    .unwrap_or(&MatchStatus::Scheduled);

    let (match_date, home_goals, away_goals, minute) = match status {
        MatchStatus::Completed => (
            now - Duration::days(rng.random_range(1..=14)),
            Some(rng.random_range(0..=4)),
            Some(rng.random_range(0..=4)),
            None,
        ),
        MatchStatus::Live => {
            let minute = rng.random_range(15..=90);
            (
                now - Duration::minutes(minute),
                Some(rng.random_range(0..=3)),
                Some(rng.random_range(0..=3)),
                Some(minute),
            )
        }
        _ => (now + Duration::days(rng.random_range(1..=14)), None, None, None),
    };

    PlannedMatch {
        home,
        away,
        group: Some(group),
        match_date,
        match_type: MatchType::Group,
        playoff_round: None,
        status,
        home_goals,
        away_goals,
        minute,
    }
}

fn plan_playoff_match<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    home: usize,
    away: usize,
    round: PlayoffRound,
) -> PlannedMatch {
    let completed = rng.random_bool(0.5);
    let (status, match_date, home_goals, away_goals) = if completed {
        (
            MatchStatus::Completed,
            now - Duration::days(rng.random_range(1..=3)),
            Some(rng.random_range(0..=3)),
            Some(rng.random_range(0..=3)),
        )
    } else {
        (MatchStatus::Scheduled, now + Duration::days(rng.random_range(7..=28)), None, None)
    };

    PlannedMatch {
        home,
        away,
        group: None,
        match_date,
        match_type: MatchType::Playoff,
        playoff_round: Some(round),
        status,
        home_goals,
        away_goals,
        minute: None,
    }
}

fn plan_player<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime, club: usize, jersey_number: i64) -> PlannedPlayer {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    let age_days = rng.random_range(18 * 365..=35 * 365);

    PlannedPlayer {
        club,
        name: format!("{} {}", first, last),
        jersey_number,
        position: POSITIONS.choose(rng).copied().unwrap_or("CM").to_string(),
        birth_date: (now - Duration::days(age_days)).date(),
        nationality: NATIONALITIES.choose(rng).copied().unwrap_or("England").to_string(),
    }
}

/// Fills an empty database with a demo league. Does nothing when clubs exist.
pub async fn seed_demo_league(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clubs")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("Database already has {} clubs, skipping demo seed.", existing);
        return Ok(false);
    }

    let plan = {
        let mut rng = rand::rng();
        plan_demo_league(&mut rng, Utc::now().naive_utc())
    };

    let mut db_tx = pool.begin().await?;

    let mut club_ids = Vec::with_capacity(CLUBS.len());
    for (name, short_name, city) in CLUBS {
        let id = sqlx::query("INSERT INTO clubs (name, short_name, city, description) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(short_name)
            .bind(city)
            .bind(format!("{} football club.", city))
            .execute(&mut *db_tx)
            .await?
            .last_insert_rowid();
        club_ids.push(id);
    }

    let mut group_ids = Vec::with_capacity(plan.groups.len());
    for (letter, members) in GROUP_LETTERS.iter().zip(&plan.groups) {
        let group_id = sqlx::query("INSERT INTO groups (name, status) VALUES (?, 'active')")
            .bind(format!("Group {}", letter))
            .execute(&mut *db_tx)
            .await?
            .last_insert_rowid();
        for &club in members {
            sqlx::query("INSERT INTO group_clubs (group_id, club_id) VALUES (?, ?)")
                .bind(group_id)
                .bind(club_ids[club])
                .execute(&mut *db_tx)
                .await?;
        }
        group_ids.push(group_id);
    }

    for game in &plan.matches {
        sqlx::query(
            r#"
            INSERT INTO matches (
                home_club_id, away_club_id, group_id, home_goals, away_goals,
                match_date, match_type, playoff_round, status, minute
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(club_ids[game.home])
        .bind(club_ids[game.away])
        .bind(game.group.map(|g| group_ids[g]))
        .bind(game.home_goals)
        .bind(game.away_goals)
        .bind(game.match_date)
        .bind(game.match_type)
        .bind(game.playoff_round)
        .bind(game.status)
        .bind(game.minute)
        .execute(&mut *db_tx)
        .await?;
    }

    for player in &plan.players {
        sqlx::query(
            r#"
            INSERT INTO players (club_id, name, jersey_number, position, birth_date, nationality)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(club_ids[player.club])
        .bind(&player.name)
        .bind(player.jersey_number)
        .bind(&player.position)
        .bind(player.birth_date)
        .bind(&player.nationality)
        .execute(&mut *db_tx)
        .await?;
    }

    db_tx.commit().await?;
    info!(
        "Seeded demo league: {} clubs, {} groups, {} matches, {} players.",
        club_ids.len(),
        group_ids.len(),
        plan.matches.len(),
        plan.players.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn plan(seed: u64) -> DemoLeague {
        let now = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
        plan_demo_league(&mut StdRng::seed_from_u64(seed), now)
    }

    #[test]
    fn four_groups_of_four_distinct_clubs() {
        let league = plan(7);
        assert_eq!(league.groups.len(), 4);
        let all: HashSet<usize> = league.groups.iter().flatten().copied().collect();
        assert_eq!(all.len(), 16);
        assert!(league.groups.iter().all(|g| g.len() == 4));
    }

    #[test]
    fn round_robin_and_playoffs() {
        let league = plan(11);
        let group_games = league.matches.iter().filter(|m| m.match_type == MatchType::Group).count();
        let playoff_games = league.matches.iter().filter(|m| m.match_type == MatchType::Playoff).count();
        assert_eq!(group_games, 4 * 6);
        assert_eq!(playoff_games, 5);

        for game in &league.matches {
            assert_ne!(game.home, game.away);
            assert_eq!(game.playoff_round.is_some(), game.match_type == MatchType::Playoff);
            if game.status == MatchStatus::Completed {
                assert!(game.home_goals.is_some() && game.away_goals.is_some());
            }
            if game.status == MatchStatus::Scheduled {
                assert!(game.home_goals.is_none() && game.minute.is_none());
            }
        }
    }

    #[test]
    fn jersey_numbers_unique_per_club() {
        let league = plan(3);
        for club in 0..CLUBS.len() {
            let numbers: Vec<i64> = league
                .players
                .iter()
                .filter(|p| p.club == club)
                .map(|p| p.jersey_number)
                .collect();
            assert!((20..=25).contains(&numbers.len()));
            let unique: HashSet<i64> = numbers.iter().copied().collect();
            assert_eq!(unique.len(), numbers.len());
        }
    }

    #[test]
    fn short_names_fit_and_are_unique() {
        let shorts: HashSet<&str> = CLUBS.iter().map(|c| c.1).collect();
        assert_eq!(shorts.len(), CLUBS.len());
        assert!(CLUBS.iter().all(|c| c.1.len() <= 5));
    }
}
