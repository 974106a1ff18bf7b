use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::services::match_rules::{match_result, match_winner};

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MatchType {
    Group,
    Playoff,
}

/// Knockout rounds, declared in the order they are played.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlayoffRound {
    Quarter,
    Semi,
    Final,
}

impl PlayoffRound {
    pub const ALL: [PlayoffRound; 3] = [PlayoffRound::Quarter, PlayoffRound::Semi, PlayoffRound::Final];
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Postponed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub home_club_id: i64,
    pub away_club_id: i64,
    pub group_id: Option<i64>,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub match_date: NaiveDateTime,
    pub match_type: MatchType,
    pub playoff_round: Option<PlayoffRound>,
    pub status: MatchStatus,
    pub minute: Option<i64>,
    pub notes: Option<String>,
}

/// A match row joined with the names of both clubs and its group.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct MatchWithClubs {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub game: Match,
    pub home_club_name: String,
    pub home_club_short_name: String,
    pub away_club_name: String,
    pub away_club_short_name: String,
    pub group_name: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub details: MatchWithClubs,
    pub result: Option<String>,
    pub winner_club_id: Option<i64>,
}

impl From<MatchWithClubs> for MatchResponse {
    fn from(details: MatchWithClubs) -> Self {
        let result = match_result(&details.game);
        let winner_club_id = match_winner(&details.game);
        Self { details, result, winner_club_id }
    }
}

/// Body of `POST /matches`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatch {
    pub home_club_id: i64,
    pub away_club_id: i64,
    pub group_id: Option<i64>,
    pub match_date: NaiveDateTime,
    pub match_type: MatchType,
    pub playoff_round: Option<PlayoffRound>,
    pub notes: Option<String>,
}

impl CreateMatch {
    /// Checks that need no database access. Club and group existence is
    /// checked by the handler.
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), String> {
        if self.home_club_id == self.away_club_id {
            return Err("Home club must be different from away club.".to_string());
        }
        if self.match_date <= now {
            return Err("Match date must be in the future.".to_string());
        }

        match (self.match_type, self.playoff_round) {
            (MatchType::Playoff, None) => {
                return Err("Playoff round is required for playoff matches.".to_string());
            }
            (MatchType::Group, Some(_)) => {
                return Err("Only playoff matches can have a playoff round.".to_string());
            }
            _ => {}
        }

        match (self.match_type, self.group_id) {
            (MatchType::Group, None) => Err("Group matches must belong to a group.".to_string()),
            (MatchType::Playoff, Some(_)) => Err("Playoff matches cannot belong to a group.".to_string()),
            _ => Ok(()),
        }
    }
}

/// Body of `PUT /matches/{id}`: score entry and status transitions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateMatch {
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub status: MatchStatus,
    pub minute: Option<i64>,
    pub notes: Option<String>,
}

impl UpdateMatch {
    pub fn validate(&self) -> Result<(), String> {
        if self.home_goals.is_some_and(|g| g < 0) {
            return Err("Home goals cannot be negative.".to_string());
        }
        if self.away_goals.is_some_and(|g| g < 0) {
            return Err("Away goals cannot be negative.".to_string());
        }
        if let Some(minute) = self.minute {
            if minute < 1 {
                return Err("Minute must be at least 1.".to_string());
            }
            if minute > 120 {
                return Err("Minute cannot exceed 120.".to_string());
            }
        }

        match self.status {
            MatchStatus::Scheduled
                if self.home_goals.is_some() || self.away_goals.is_some() || self.minute.is_some() =>
            {
                Err("A scheduled match cannot have goals or a minute.".to_string())
            }
            MatchStatus::Completed if self.home_goals.is_none() || self.away_goals.is_none() => {
                Err("A completed match needs both scores.".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Query string of `GET /matches`.
#[derive(Debug, Deserialize, Default)]
pub struct MatchQuery {
    pub status: Option<MatchStatus>,
    pub match_type: Option<MatchType>,
    pub group_id: Option<i64>,
    pub club_id: Option<i64>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total: i64,
    pub last_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, current_page: u32, per_page: u32, total: i64) -> Self {
        let per_page = per_page.max(1);
        let last_page = ((total.max(0) as u64).div_ceil(per_page as u64)).max(1) as u32;
        Self { data, current_page, per_page, total, last_page }
    }
}

#[derive(Serialize)]
pub struct LivescoresUpdate {
    pub r#type: String,
    pub live_matches: Vec<MatchResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn group_fixture() -> CreateMatch {
        CreateMatch {
            home_club_id: 1,
            away_club_id: 2,
            group_id: Some(1),
            match_date: now() + Duration::days(3),
            match_type: MatchType::Group,
            playoff_round: None,
            notes: None,
        }
    }

    fn score(status: MatchStatus, home: Option<i64>, away: Option<i64>, minute: Option<i64>) -> UpdateMatch {
        UpdateMatch { home_goals: home, away_goals: away, status, minute, notes: None }
    }

    #[test]
    fn accepts_future_group_fixture() {
        assert!(group_fixture().validate(now()).is_ok());
    }

    #[test]
    fn rejects_club_playing_itself() {
        let mut fixture = group_fixture();
        fixture.away_club_id = fixture.home_club_id;
        assert_eq!(
            fixture.validate(now()),
            Err("Home club must be different from away club.".to_string())
        );
    }

    #[test]
    fn rejects_fixture_in_the_past() {
        let mut fixture = group_fixture();
        fixture.match_date = now() - Duration::hours(1);
        assert!(fixture.validate(now()).is_err());
    }

    #[test]
    fn playoff_round_required_only_for_playoffs() {
        let mut playoff = group_fixture();
        playoff.match_type = MatchType::Playoff;
        playoff.group_id = None;
        assert!(playoff.validate(now()).is_err());

        playoff.playoff_round = Some(PlayoffRound::Semi);
        assert!(playoff.validate(now()).is_ok());

        let mut group = group_fixture();
        group.playoff_round = Some(PlayoffRound::Final);
        assert!(group.validate(now()).is_err());
    }

    #[test]
    fn playoff_matches_have_no_group() {
        let mut playoff = group_fixture();
        playoff.match_type = MatchType::Playoff;
        playoff.playoff_round = Some(PlayoffRound::Final);
        assert_eq!(
            playoff.validate(now()),
            Err("Playoff matches cannot belong to a group.".to_string())
        );
    }

    #[test]
    fn score_entry_bounds() {
        assert!(score(MatchStatus::Live, Some(1), Some(0), Some(55)).validate().is_ok());
        assert!(score(MatchStatus::Live, Some(-1), Some(0), Some(55)).validate().is_err());
        assert!(score(MatchStatus::Live, Some(1), Some(0), Some(0)).validate().is_err());
        assert!(score(MatchStatus::Live, Some(1), Some(0), Some(121)).validate().is_err());
        assert!(score(MatchStatus::Live, Some(1), Some(0), Some(120)).validate().is_ok());
    }

    #[test]
    fn scheduled_match_cannot_carry_a_score() {
        assert!(score(MatchStatus::Scheduled, None, None, None).validate().is_ok());
        assert!(score(MatchStatus::Scheduled, Some(0), Some(0), None).validate().is_err());
    }

    #[test]
    fn completed_match_needs_both_scores() {
        assert!(score(MatchStatus::Completed, Some(2), None, None).validate().is_err());
        assert!(score(MatchStatus::Completed, Some(2), Some(2), None).validate().is_ok());
    }

    #[test]
    fn pagination_envelope() {
        let page: Paginated<i32> = Paginated::new(vec![1, 2], 2, 20, 41);
        assert_eq!(page.last_page, 3);

        let empty: Paginated<i32> = Paginated::new(vec![], 1, 20, 0);
        assert_eq!(empty.last_page, 1);
    }
}
