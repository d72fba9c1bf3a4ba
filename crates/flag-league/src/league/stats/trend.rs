use super::super::domain::{Match, Team, TeamId, TournamentId};
use super::classification::{counts_for, tournament_matches, SkipLog};
use super::views::{MatchResult, OpponentView, ScoringTrend, TrendEntry, TrendSummary};

pub(crate) fn compute_trend(
    tournament: &TournamentId,
    team: &TeamId,
    teams: &[Team],
    matches: &[Match],
) -> ScoringTrend {
    let mut log = SkipLog::default();
    let mut games: Vec<&Match> = tournament_matches(matches, tournament, &mut log)
        .into_iter()
        .filter(|game| counts_for(game, team))
        .collect();
    games.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then_with(|| a.id.cmp(&b.id)));

    let entries: Vec<TrendEntry> = games
        .into_iter()
        .filter_map(|game| {
            let (scored, allowed) = game.points_for(team)?;
            let opponent = game.opponent_of(team)?;
            Some((game, scored, allowed, opponent))
        })
        .enumerate()
        .map(|(index, (game, scored, allowed, opponent))| TrendEntry {
            matchday: index + 1,
            match_id: game.id.clone(),
            date: game.scheduled_at,
            points_scored: scored,
            points_allowed: allowed,
            opponent: OpponentView {
                id: opponent.clone(),
                name: teams
                    .iter()
                    .find(|candidate| &candidate.id == opponent)
                    .map(|candidate| candidate.name.clone()),
            },
            result: MatchResult::from_points(scored, allowed),
        })
        .collect();

    let summary = summarize(&entries);

    ScoringTrend {
        tournament: tournament.clone(),
        team_id: team.clone(),
        entries,
        summary,
        skipped_records: log.count(),
    }
}

fn summarize(entries: &[TrendEntry]) -> TrendSummary {
    if entries.is_empty() {
        return TrendSummary::default();
    }

    let points = entries.iter().map(|entry| entry.points_scored);
    let total: u64 = points.clone().map(u64::from).sum();
    let mean = (total as f64 / entries.len() as f64).round() as u32;

    TrendSummary {
        matches: entries.len(),
        mean,
        max: points.clone().max().unwrap_or(0),
        min: points.min().unwrap_or(0),
    }
}
