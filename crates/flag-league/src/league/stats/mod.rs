//! Derived statistics over finished matches: standings, leaders and
//! scoring trends.
//!
//! Every computation is a pure function of the supplied snapshot. Matches
//! only count for a team when they are finished and classified official for
//! that team's side; malformed records are logged, counted and skipped.

mod classification;
mod leaders;
mod rating;
mod standings;
mod trend;
pub mod views;

pub use classification::{is_official_for, MalformedRecord};
pub use rating::{passer_rating, PassingTotals};
pub use views::{
    LeaderEntry, MatchResult, OpponentView, PasserRatingEntry, ScoringTrend, StandingRow,
    StandingsTable, TeamDashboard, TeamLeaders, TeamSummary, TrendEntry, TrendSummary,
};

use super::domain::{CategoryCode, Match, Team, TeamId, TournamentId};
use super::eligibility::CategoryRuleBook;

pub const DEFAULT_LEADER_LIMIT: usize = 5;

/// Stateless aggregator; the rule book only supplies category labels.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    categories: CategoryRuleBook,
}

impl StatsAggregator {
    pub fn new(categories: CategoryRuleBook) -> Self {
        Self { categories }
    }

    pub fn standings(
        &self,
        tournament: &TournamentId,
        category: CategoryCode,
        teams: &[Team],
        matches: &[Match],
    ) -> StandingsTable {
        let (rows, skipped_records) =
            standings::compute_standings(tournament, category, teams, matches);
        StandingsTable {
            tournament: tournament.clone(),
            category,
            category_label: self.categories.label(category).to_string(),
            rows,
            skipped_records,
        }
    }

    pub fn leaders(
        &self,
        tournament: &TournamentId,
        team: &TeamId,
        matches: &[Match],
        limit: usize,
    ) -> TeamLeaders {
        leaders::compute_leaders(tournament, team, matches, limit)
    }

    pub fn trend(
        &self,
        tournament: &TournamentId,
        team: &TeamId,
        teams: &[Team],
        matches: &[Match],
    ) -> ScoringTrend {
        trend::compute_trend(tournament, team, teams, matches)
    }

    /// Standing row, leaders and trend for one team.
    ///
    /// `teams` should hold the team's category rivals so the standing
    /// position is meaningful.
    pub fn dashboard(
        &self,
        tournament: &TournamentId,
        team: &Team,
        teams: &[Team],
        matches: &[Match],
        limit: usize,
    ) -> TeamDashboard {
        let table = self.standings(tournament, team.category, teams, matches);
        let standing = table.row_for(&team.id).cloned();

        TeamDashboard {
            team: TeamSummary {
                id: team.id.clone(),
                name: team.name.clone(),
                image: team.image.clone(),
                category: team.category,
                category_label: self.categories.label(team.category).to_string(),
            },
            standing,
            leaders: self.leaders(tournament, &team.id, matches, limit),
            trend: self.trend(tournament, &team.id, teams, matches),
        }
    }
}
