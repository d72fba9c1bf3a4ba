use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::super::domain::{CategoryCode, Match, Team, TeamId, TournamentId};
use super::classification::{counts_for, tournament_matches, SkipLog};
use super::views::StandingRow;

#[derive(Debug, Default, Clone, Copy)]
struct TeamRecord {
    games_played: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    points_for: u64,
    points_against: u64,
}

impl TeamRecord {
    fn record(&mut self, scored: u32, allowed: u32) {
        self.games_played = self.games_played.saturating_add(1);
        self.points_for = self.points_for.saturating_add(u64::from(scored));
        self.points_against = self.points_against.saturating_add(u64::from(allowed));
        let tally = match scored.cmp(&allowed) {
            Ordering::Greater => &mut self.wins,
            Ordering::Less => &mut self.losses,
            Ordering::Equal => &mut self.draws,
        };
        *tally = tally.saturating_add(1);
    }

    fn differential(&self) -> i64 {
        let scored = i64::try_from(self.points_for).unwrap_or(i64::MAX);
        let allowed = i64::try_from(self.points_against).unwrap_or(i64::MAX);
        scored.saturating_sub(allowed)
    }

    fn average(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let average = self.points_for as f64 / f64::from(self.games_played);
        (average * 10.0).round() / 10.0
    }
}

/// Ranked standings rows plus the number of skipped records.
pub(crate) fn compute_standings(
    tournament: &TournamentId,
    category: CategoryCode,
    teams: &[Team],
    matches: &[Match],
) -> (Vec<StandingRow>, usize) {
    let mut log = SkipLog::default();
    let mut records: HashMap<&TeamId, TeamRecord> = teams
        .iter()
        .filter(|team| team.category == category)
        .map(|team| (&team.id, TeamRecord::default()))
        .collect();

    for game in tournament_matches(matches, tournament, &mut log) {
        if game.category != category || !game.is_finished() {
            continue;
        }

        for side in [&game.home, &game.away] {
            if !counts_for(game, side) {
                continue;
            }
            let Some(record) = records.get_mut(side) else {
                debug!(match_id = %game.id, team = %side, "team not listed for standings");
                continue;
            };
            if let Some((scored, allowed)) = game.points_for(side) {
                record.record(scored, allowed);
            }
        }
    }

    let mut listed = HashSet::new();
    let mut ranked: Vec<(&Team, TeamRecord)> = teams
        .iter()
        .filter(|team| listed.insert(&team.id))
        .filter_map(|team| records.get(&team.id).map(|record| (team, *record)))
        .collect();
    ranked.sort_by(|(team_a, a), (team_b, b)| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.differential().cmp(&a.differential()))
            .then_with(|| b.points_for.cmp(&a.points_for))
            .then_with(|| team_a.name.cmp(&team_b.name))
            .then_with(|| team_a.id.cmp(&team_b.id))
    });

    let rows = ranked
        .into_iter()
        .enumerate()
        .map(|(index, (team, record))| StandingRow {
            position: index + 1,
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            image: team.image.clone(),
            games_played: record.games_played,
            wins: record.wins,
            losses: record.losses,
            draws: record.draws,
            points_for: record.points_for,
            points_against: record.points_against,
            point_differential: record.differential(),
            average_points: record.average(),
        })
        .collect();

    (rows, log.count())
}
