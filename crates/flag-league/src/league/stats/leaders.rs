use std::collections::HashMap;

use super::super::domain::{Match, PlayActor, PlayKind, PlayerId, PlayerRef, TeamId, TournamentId};
use super::classification::{counts_for, credited_team, tournament_matches, SkipLog};
use super::rating::PassingTotals;
use super::views::{LeaderEntry, PasserRatingEntry, TeamLeaders};

#[derive(Debug, Default, Clone)]
struct PlayerTotals {
    name: String,
    points: u32,
    tackles: u32,
    interceptions: u32,
    sacks: u32,
    receptions: u32,
}

#[derive(Debug, Default, Clone)]
struct PasserTotals {
    name: String,
    passing: PassingTotals,
}

#[derive(Debug, Default)]
struct LeaderBoard<'a> {
    players: HashMap<&'a PlayerId, PlayerTotals>,
    passers: HashMap<&'a PlayerId, PasserTotals>,
}

impl<'a> LeaderBoard<'a> {
    fn player(&mut self, player: &'a PlayerRef) -> &mut PlayerTotals {
        self.players
            .entry(&player.id)
            .or_insert_with(|| PlayerTotals {
                name: player.name.clone(),
                ..PlayerTotals::default()
            })
    }

    fn passer(&mut self, passer: &'a PlayerRef) -> &mut PasserTotals {
        self.passers
            .entry(&passer.id)
            .or_insert_with(|| PasserTotals {
                name: passer.name.clone(),
                ..PasserTotals::default()
            })
    }

    fn ranked<F>(&self, limit: usize, value: F) -> Vec<LeaderEntry>
    where
        F: Fn(&PlayerTotals) -> u32,
    {
        let mut entries: Vec<(&PlayerId, &PlayerTotals, u32)> = self
            .players
            .iter()
            .map(|(id, totals)| (*id, totals, value(totals)))
            .filter(|(_, _, total)| *total > 0)
            .collect();
        entries.sort_by(|(id_a, a, total_a), (id_b, b, total_b)| {
            total_b
                .cmp(total_a)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| id_a.cmp(id_b))
        });

        entries
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, (id, totals, total))| LeaderEntry {
                position: index + 1,
                player_id: id.clone(),
                player_name: totals.name.clone(),
                total,
            })
            .collect()
    }

    fn passer_ratings(&self, limit: usize) -> Vec<PasserRatingEntry> {
        let mut entries: Vec<(&PlayerId, &PasserTotals, f64)> = self
            .passers
            .iter()
            .map(|(id, totals)| (*id, totals, totals.passing.rating()))
            .filter(|(_, totals, rating)| totals.passing.attempts > 0 && *rating > 0.0)
            .collect();
        entries.sort_by(|(id_a, a, rating_a), (id_b, b, rating_b)| {
            rating_b
                .total_cmp(rating_a)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| id_a.cmp(id_b))
        });

        entries
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, (id, totals, rating))| PasserRatingEntry {
                position: index + 1,
                player_id: id.clone(),
                player_name: totals.name.clone(),
                rating: (rating * 10.0).round() / 10.0,
                completions: totals.passing.completions,
                attempts: totals.passing.attempts,
                touchdowns: totals.passing.touchdowns,
                interceptions: totals.passing.interceptions,
            })
            .collect()
    }
}

pub(crate) fn compute_leaders(
    tournament: &TournamentId,
    team: &TeamId,
    matches: &[Match],
    limit: usize,
) -> TeamLeaders {
    let mut log = SkipLog::default();
    let mut board = LeaderBoard::default();
    let mut matches_considered = 0;

    for game in tournament_matches(matches, tournament, &mut log) {
        if !counts_for(game, team) {
            continue;
        }
        matches_considered += 1;

        for play in &game.plays {
            let credited = match credited_team(game, play) {
                Ok(credited) => credited,
                Err(record) => {
                    log.skip(record);
                    continue;
                }
            };

            if &play.team == team {
                if let Some(line) = &play.outcome.passing {
                    let totals = &mut board.passer(&line.passer).passing;
                    totals.completions = totals.completions.saturating_add(line.completions);
                    totals.attempts = totals.attempts.saturating_add(line.attempts);
                    totals.touchdowns = totals.touchdowns.saturating_add(line.touchdowns);
                    totals.interceptions = totals.interceptions.saturating_add(line.interceptions);
                }
            }

            let PlayActor::Player(player) = &play.actor else {
                continue;
            };
            if credited != team {
                continue;
            }

            let totals = board.player(player);
            totals.points = totals.points.saturating_add(play.outcome.points);
            let tally = match play.kind {
                PlayKind::Tackle => &mut totals.tackles,
                PlayKind::Interception => &mut totals.interceptions,
                PlayKind::Sack => &mut totals.sacks,
                PlayKind::CompletedPass => &mut totals.receptions,
                _ => continue,
            };
            *tally = tally.saturating_add(1);
        }
    }

    TeamLeaders {
        tournament: tournament.clone(),
        team_id: team.clone(),
        matches_considered,
        points: board.ranked(limit, |totals| totals.points),
        tackles: board.ranked(limit, |totals| totals.tackles),
        interceptions: board.ranked(limit, |totals| totals.interceptions),
        sacks: board.ranked(limit, |totals| totals.sacks),
        receptions: board.ranked(limit, |totals| totals.receptions),
        passer_rating: board.passer_ratings(limit),
        skipped_records: log.count(),
    }
}
