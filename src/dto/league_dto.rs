use std::collections::BTreeMap;

use serde::Serialize;

use crate::dto::{
    group_dto::GroupStandings,
    match_dto::{MatchResponse, PlayoffRound},
    standings_dto::ClubRecord,
};

#[derive(Debug, Serialize, Clone)]
pub struct PlayoffRoundMatches {
    pub round: PlayoffRound,
    pub matches: Vec<MatchResponse>,
}

/// Playoff matches keyed by round, always quarter, semi, final in that order.
#[derive(Debug, Serialize, Clone)]
pub struct PlayoffBracket {
    pub rounds: Vec<PlayoffRoundMatches>,
}

#[derive(Debug, Serialize)]
pub struct LeagueDashboard {
    pub live_matches: Vec<MatchResponse>,
    pub recent_matches: Vec<MatchResponse>,
    pub upcoming_matches: Vec<MatchResponse>,
    pub group_standings: Vec<GroupStandings>,
    pub playoff_matches: PlayoffBracket,
    pub qualified_clubs: BTreeMap<String, Vec<ClubRecord>>,
}

#[derive(Debug, Serialize)]
pub struct Livescores {
    pub live_matches: Vec<MatchResponse>,
    pub today_matches: Vec<MatchResponse>,
}

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub status: String,
    pub timestamp: String,
}
