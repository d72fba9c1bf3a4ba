use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::domain::{CategoryCode, MatchId, PlayerId, TeamId, TournamentId};

#[derive(Debug, Clone, Serialize)]
pub struct StandingRow {
    pub position: usize,
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_differential: i64,
    pub average_points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsTable {
    pub tournament: TournamentId,
    pub category: CategoryCode,
    pub category_label: String,
    pub rows: Vec<StandingRow>,
    pub skipped_records: usize,
}

impl StandingsTable {
    pub fn row_for(&self, team: &TeamId) -> Option<&StandingRow> {
        self.rows.iter().find(|row| &row.team_id == team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderEntry {
    pub position: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasserRatingEntry {
    pub position: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub rating: f64,
    pub completions: u32,
    pub attempts: u32,
    pub touchdowns: u32,
    pub interceptions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamLeaders {
    pub tournament: TournamentId,
    pub team_id: TeamId,
    pub matches_considered: usize,
    pub points: Vec<LeaderEntry>,
    pub tackles: Vec<LeaderEntry>,
    pub interceptions: Vec<LeaderEntry>,
    pub sacks: Vec<LeaderEntry>,
    pub receptions: Vec<LeaderEntry>,
    pub passer_rating: Vec<PasserRatingEntry>,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    pub fn from_points(scored: u32, allowed: u32) -> Self {
        match scored.cmp(&allowed) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchResult::Win => "W",
            MatchResult::Loss => "L",
            MatchResult::Draw => "D",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpponentView {
    pub id: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendEntry {
    pub matchday: usize,
    pub match_id: MatchId,
    pub date: DateTime<Utc>,
    pub points_scored: u32,
    pub points_allowed: u32,
    pub opponent: OpponentView,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub matches: usize,
    pub mean: u32,
    pub max: u32,
    pub min: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringTrend {
    pub tournament: TournamentId,
    pub team_id: TeamId,
    pub entries: Vec<TrendEntry>,
    pub summary: TrendSummary,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: CategoryCode,
    pub category_label: String,
}

/// Everything the team statistics page shows, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDashboard {
    pub team: TeamSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standing: Option<StandingRow>,
    pub leaders: TeamLeaders,
    pub trend: ScoringTrend,
}
