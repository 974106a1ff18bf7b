use chrono::NaiveDateTime;
use sqlx::{QueryBuilder, Sqlite};

use crate::dto::match_dto::{Match, MatchQuery, MatchStatus, MatchType, PlayoffRound};

/// Final score of a completed match, e.g. `"2 - 1"`.
pub fn match_result(game: &Match) -> Option<String> {
    final_score(game).map(|(home, away)| format!("{} - {}", home, away))
}

/// Id of the club that scored strictly more goals. `None` on a draw or
/// while the match has no final score.
pub fn match_winner(game: &Match) -> Option<i64> {
    let (home, away) = final_score(game)?;
    if home > away {
        Some(game.home_club_id)
    } else if away > home {
        Some(game.away_club_id)
    } else {
        None
    }
}

fn final_score(game: &Match) -> Option<(i64, i64)> {
    if game.status != MatchStatus::Completed {
        return None;
    }
    Some((game.home_goals?, game.away_goals?))
}

/// Explicit match selection. Every field left as `None` matches everything.
///
/// The same predicate exists twice: `matches` evaluates it against a loaded
/// row, `push_where` renders it into SQL against the `m` alias of the
/// `matches` table. Keep the two in step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub match_type: Option<MatchType>,
    pub group_id: Option<i64>,
    pub club_id: Option<i64>,
    pub playoff_round: Option<PlayoffRound>,
    /// Inclusive lower bound on `match_date`.
    pub from: Option<NaiveDateTime>,
    /// Exclusive upper bound on `match_date`.
    pub to: Option<NaiveDateTime>,
}

impl MatchFilter {
    pub fn live() -> Self {
        Self { status: Some(MatchStatus::Live), ..Self::default() }
    }

    pub fn completed() -> Self {
        Self { status: Some(MatchStatus::Completed), ..Self::default() }
    }

    pub fn scheduled() -> Self {
        Self { status: Some(MatchStatus::Scheduled), ..Self::default() }
    }

    pub fn group_phase() -> Self {
        Self { match_type: Some(MatchType::Group), ..Self::default() }
    }

    pub fn playoffs() -> Self {
        Self { match_type: Some(MatchType::Playoff), ..Self::default() }
    }

    pub fn in_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn involving(mut self, club_id: i64) -> Self {
        self.club_id = Some(club_id);
        self
    }

    pub fn between(mut self, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, game: &Match) -> bool {
        self.status.is_none_or(|s| game.status == s)
            && self.match_type.is_none_or(|t| game.match_type == t)
            && self.group_id.is_none_or(|g| game.group_id == Some(g))
            && self
                .club_id
                .is_none_or(|c| game.home_club_id == c || game.away_club_id == c)
            && self.playoff_round.is_none_or(|r| game.playoff_round == Some(r))
            && self.from.is_none_or(|from| game.match_date >= from)
            && self.to.is_none_or(|to| game.match_date < to)
    }

    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" WHERE 1 = 1");
        if let Some(status) = self.status {
            qb.push(" AND m.status = ").push_bind(status);
        }
        if let Some(match_type) = self.match_type {
            qb.push(" AND m.match_type = ").push_bind(match_type);
        }
        if let Some(group_id) = self.group_id {
            qb.push(" AND m.group_id = ").push_bind(group_id);
        }
        if let Some(club_id) = self.club_id {
            qb.push(" AND (m.home_club_id = ")
                .push_bind(club_id)
                .push(" OR m.away_club_id = ")
                .push_bind(club_id)
                .push(")");
        }
        if let Some(round) = self.playoff_round {
            qb.push(" AND m.playoff_round = ").push_bind(round);
        }
        if let Some(from) = self.from {
            qb.push(" AND m.match_date >= ").push_bind(from);
        }
        if let Some(to) = self.to {
            qb.push(" AND m.match_date < ").push_bind(to);
        }
    }
}

impl From<&MatchQuery> for MatchFilter {
    fn from(query: &MatchQuery) -> Self {
        Self {
            status: query.status,
            match_type: query.match_type,
            group_id: query.group_id,
            club_id: query.club_id,
            playoff_round: None,
            from: query.from,
            to: query.to,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn kickoff(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, day)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    pub(crate) fn game(
        id: i64,
        home: i64,
        away: i64,
        score: Option<(i64, i64)>,
        status: MatchStatus,
    ) -> Match {
        Match {
            id,
            home_club_id: home,
            away_club_id: away,
            group_id: Some(1),
            home_goals: score.map(|s| s.0),
            away_goals: score.map(|s| s.1),
            match_date: kickoff(1),
            match_type: MatchType::Group,
            playoff_round: None,
            status,
            minute: None,
            notes: None,
        }
    }

    #[test]
    fn draw_has_result_but_no_winner() {
        let draw = game(1, 10, 20, Some((2, 2)), MatchStatus::Completed);
        assert_eq!(match_result(&draw), Some("2 - 2".to_string()));
        assert_eq!(match_winner(&draw), None);
    }

    #[test]
    fn winner_is_the_club_with_more_goals() {
        let home_win = game(1, 10, 20, Some((3, 1)), MatchStatus::Completed);
        assert_eq!(match_winner(&home_win), Some(10));

        let away_win = game(2, 10, 20, Some((0, 1)), MatchStatus::Completed);
        assert_eq!(match_winner(&away_win), Some(20));
        assert_eq!(match_result(&away_win), Some("0 - 1".to_string()));
    }

    #[test]
    fn unfinished_match_has_no_result() {
        let live = game(1, 10, 20, Some((1, 0)), MatchStatus::Live);
        assert_eq!(match_result(&live), None);
        assert_eq!(match_winner(&live), None);

        let mut missing = game(2, 10, 20, Some((1, 0)), MatchStatus::Completed);
        missing.away_goals = None;
        assert_eq!(match_result(&missing), None);
        assert_eq!(match_winner(&missing), None);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = MatchFilter::default();
        assert!(filter.matches(&game(1, 10, 20, None, MatchStatus::Scheduled)));
        assert!(filter.matches(&game(2, 10, 20, Some((1, 1)), MatchStatus::Completed)));
    }

    #[test]
    fn status_and_club_predicates() {
        let filter = MatchFilter::completed().involving(20);
        assert!(filter.matches(&game(1, 10, 20, Some((0, 0)), MatchStatus::Completed)));
        assert!(!filter.matches(&game(2, 10, 30, Some((0, 0)), MatchStatus::Completed)));
        assert!(!filter.matches(&game(3, 10, 20, Some((0, 0)), MatchStatus::Live)));
    }

    #[test]
    fn date_range_is_half_open() {
        let filter = MatchFilter::default().between(kickoff(1), kickoff(2));
        let mut on_start = game(1, 10, 20, None, MatchStatus::Scheduled);
        on_start.match_date = kickoff(1);
        let mut on_end = on_start.clone();
        on_end.match_date = kickoff(2);

        assert!(filter.matches(&on_start));
        assert!(!filter.matches(&on_end));
    }

    #[test]
    fn playoff_filter_excludes_group_games() {
        let mut final_game = game(1, 10, 20, None, MatchStatus::Scheduled);
        final_game.match_type = MatchType::Playoff;
        final_game.group_id = None;
        final_game.playoff_round = Some(PlayoffRound::Final);

        assert!(MatchFilter::playoffs().matches(&final_game));
        assert!(!MatchFilter::group_phase().matches(&final_game));
        assert!(!MatchFilter::playoffs().matches(&game(2, 10, 20, None, MatchStatus::Scheduled)));
    }
}
