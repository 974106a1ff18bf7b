use serde::{Deserialize, Serialize};

use crate::dto::club_dto::Club;

/// One row of a group table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClubRecord {
    pub club: Club,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

impl ClubRecord {
    pub fn new(club: Club) -> Self {
        Self {
            club,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

#[derive(Serialize)]
pub struct StandingsUpdate {
    pub r#type: String,
    pub group_id: i64,
    pub standings: Vec<ClubRecord>,
    pub qualified: Vec<ClubRecord>,
}
