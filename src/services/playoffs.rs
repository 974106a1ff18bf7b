use tracing::warn;

use crate::dto::{
    league_dto::{PlayoffBracket, PlayoffRoundMatches},
    match_dto::{MatchResponse, PlayoffRound},
};

/// Folds playoff matches into quarter, semi and final buckets.
///
/// Every round is present even when empty. Matches keep their input order
/// within a round; matches without a round are dropped.
pub fn build_bracket(matches: Vec<MatchResponse>) -> PlayoffBracket {
    let rounds = PlayoffRound::ALL
        .iter()
        .map(|&round| PlayoffRoundMatches { round, matches: Vec::new() })
        .collect();

    matches.into_iter().fold(PlayoffBracket { rounds }, |mut bracket, game| {
        match game.details.game.playoff_round {
            Some(round) => {
                if let Some(bucket) = bracket.rounds.iter_mut().find(|r| r.round == round) {
                    bucket.matches.push(game);
                }
            }
            None => warn!("Playoff match {} has no round, leaving it out of the bracket.", game.details.game.id),
        }
        bracket
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::match_dto::{MatchStatus, MatchType, MatchWithClubs};
    use crate::services::match_rules::tests::game;

    fn playoff(id: i64, round: Option<PlayoffRound>) -> MatchResponse {
        let mut base = game(id, 1, 2, None, MatchStatus::Scheduled);
        base.group_id = None;
        base.match_type = MatchType::Playoff;
        base.playoff_round = round;
        MatchResponse::from(MatchWithClubs {
            game: base,
            home_club_name: "Ajax".to_string(),
            home_club_short_name: "AJA".to_string(),
            away_club_name: "Arsenal".to_string(),
            away_club_short_name: "ARS".to_string(),
            group_name: None,
        })
    }

    fn ids(round: &PlayoffRoundMatches) -> Vec<i64> {
        round.matches.iter().map(|m| m.details.game.id).collect()
    }

    #[test]
    fn rounds_follow_knockout_order() {
        let bracket = build_bracket(vec![
            playoff(1, Some(PlayoffRound::Final)),
            playoff(2, Some(PlayoffRound::Quarter)),
            playoff(3, Some(PlayoffRound::Semi)),
            playoff(4, Some(PlayoffRound::Quarter)),
        ]);

        let order: Vec<PlayoffRound> = bracket.rounds.iter().map(|r| r.round).collect();
        assert_eq!(order, vec![PlayoffRound::Quarter, PlayoffRound::Semi, PlayoffRound::Final]);
        assert_eq!(ids(&bracket.rounds[0]), vec![2, 4]);
        assert_eq!(ids(&bracket.rounds[1]), vec![3]);
        assert_eq!(ids(&bracket.rounds[2]), vec![1]);
    }

    #[test]
    fn empty_rounds_are_kept() {
        let bracket = build_bracket(vec![playoff(1, Some(PlayoffRound::Semi))]);
        assert_eq!(bracket.rounds.len(), 3);
        assert!(bracket.rounds[0].matches.is_empty());
        assert!(bracket.rounds[2].matches.is_empty());
    }

    #[test]
    fn matches_without_round_are_dropped() {
        let bracket = build_bracket(vec![playoff(1, None)]);
        assert!(bracket.rounds.iter().all(|r| r.matches.is_empty()));
    }
}
