use tracing::warn;

use super::super::domain::{Match, MatchKind, Play, TeamId, TournamentId};

/// True when `team` played `game` and its side is classified as official.
///
/// Classification is per side, so the same match may count for one team and
/// not for its opponent.
pub fn is_official_for(game: &Match, team: &TeamId) -> bool {
    (&game.home == team && game.classification.home == MatchKind::Official)
        || (&game.away == team && game.classification.away == MatchKind::Official)
}

/// Inconsistent input skipped during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("match {match_id} lists team {team} as both home and away")]
    SameTeamOnBothSides { match_id: String, team: TeamId },
    #[error("play {sequence} of match {match_id} is credited to {team}, which is not playing")]
    PlayOutsideMatch {
        match_id: String,
        sequence: u32,
        team: TeamId,
    },
}

/// Counts records dropped while aggregating so views can report them.
#[derive(Debug, Default)]
pub(crate) struct SkipLog {
    skipped: usize,
}

impl SkipLog {
    pub(crate) fn skip(&mut self, record: MalformedRecord) {
        warn!(%record, "skipping malformed record");
        self.skipped += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.skipped
    }
}

pub(crate) fn check_match(game: &Match) -> Result<(), MalformedRecord> {
    if game.home == game.away {
        return Err(MalformedRecord::SameTeamOnBothSides {
            match_id: game.id.0.clone(),
            team: game.home.clone(),
        });
    }
    Ok(())
}

/// Well-formed matches of `tournament`, reporting the others to `log`.
pub(crate) fn tournament_matches<'a>(
    matches: &'a [Match],
    tournament: &'a TournamentId,
    log: &mut SkipLog,
) -> Vec<&'a Match> {
    matches
        .iter()
        .filter(|game| &game.tournament == tournament)
        .filter(|game| match check_match(game) {
            Ok(()) => true,
            Err(record) => {
                log.skip(record);
                false
            }
        })
        .collect()
}

/// Finished and official for `team`.
pub(crate) fn counts_for(game: &Match, team: &TeamId) -> bool {
    game.is_finished() && is_official_for(game, team)
}

/// Team credited with a play: the defence for defensive plays, otherwise
/// the team in possession.
pub(crate) fn credited_team<'a>(game: &'a Match, play: &Play) -> Result<&'a TeamId, MalformedRecord> {
    let Some(opponent) = game.opponent_of(&play.team) else {
        return Err(MalformedRecord::PlayOutsideMatch {
            match_id: game.id.0.clone(),
            sequence: play.sequence,
            team: play.team.clone(),
        });
    };

    if play.kind.is_defensive() {
        Ok(opponent)
    } else if game.home == play.team {
        Ok(&game.home)
    } else {
        Ok(&game.away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::domain::{MatchId, MatchState, Score, SideClassification};
    use chrono::{TimeZone, Utc};

    fn game(home: MatchKind, away: MatchKind) -> Match {
        Match {
            id: MatchId("m-1".to_string()),
            home: TeamId("halcones".to_string()),
            away: TeamId("toros".to_string()),
            tournament: TournamentId("apertura".to_string()),
            category: crate::league::domain::CategoryCode::Mixgold,
            scheduled_at: Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
            state: MatchState::Finished,
            score: Score { home: 21, away: 14 },
            classification: SideClassification { home, away },
            plays: Vec::new(),
        }
    }

    #[test]
    fn classification_is_evaluated_per_side() {
        let mixed = game(MatchKind::Official, MatchKind::Friendly);
        assert!(is_official_for(&mixed, &TeamId("halcones".to_string())));
        assert!(!is_official_for(&mixed, &TeamId("toros".to_string())));
        assert!(!is_official_for(&mixed, &TeamId("lobos".to_string())));

        let reversed = game(MatchKind::Friendly, MatchKind::Official);
        assert!(!is_official_for(&reversed, &TeamId("halcones".to_string())));
        assert!(is_official_for(&reversed, &TeamId("toros".to_string())));
    }

    #[test]
    fn same_team_on_both_sides_is_malformed() {
        let mut broken = game(MatchKind::Official, MatchKind::Official);
        broken.away = broken.home.clone();
        let matches = vec![broken, game(MatchKind::Official, MatchKind::Official)];
        let mut log = SkipLog::default();
        let tournament = TournamentId("apertura".to_string());
        let kept = tournament_matches(&matches, &tournament, &mut log);
        assert_eq!(kept.len(), 1);
        assert_eq!(log.count(), 1);
    }
}
