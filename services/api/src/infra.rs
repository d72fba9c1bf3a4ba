use chrono::NaiveDate;
use flag_league::error::AppError;
use flag_league::league::{
    LeagueRepository, LeagueSnapshot, Match, Player, PlayerId, RepositoryError, Team, TeamId,
    TournamentId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// League store backed by a snapshot loaded at startup.
#[derive(Default)]
pub(crate) struct InMemoryLeagueRepository {
    snapshot: RwLock<LeagueSnapshot>,
}

impl InMemoryLeagueRepository {
    pub(crate) fn from_snapshot(snapshot: LeagueSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LeagueSnapshot>, RepositoryError> {
        self.snapshot
            .read()
            .map_err(|_| RepositoryError::Unavailable("snapshot lock poisoned".to_string()))
    }
}

impl LeagueRepository for InMemoryLeagueRepository {
    fn team(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.teams.iter().find(|team| &team.id == id).cloned())
    }

    fn teams(&self) -> Result<Vec<Team>, RepositoryError> {
        Ok(self.read()?.teams.clone())
    }

    fn player(&self, id: &PlayerId) -> Result<Option<Player>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.players.iter().find(|player| &player.id == id).cloned())
    }

    fn players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .players
            .iter()
            .filter(|player| ids.contains(&player.id))
            .cloned()
            .collect())
    }

    fn roster(&self, team: &TeamId) -> Result<Vec<Player>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .players
            .iter()
            .filter(|player| player.membership_for(team).is_some())
            .cloned()
            .collect())
    }

    fn matches(&self, tournament: &TournamentId) -> Result<Vec<Match>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .matches
            .iter()
            .filter(|game| &game.tournament == tournament)
            .cloned()
            .collect())
    }
}

/// Snapshot at `path`, or an empty league when no path is configured.
pub(crate) fn load_snapshot(path: Option<&Path>) -> Result<LeagueSnapshot, AppError> {
    match path {
        Some(path) => Ok(LeagueSnapshot::from_path(path)?),
        None => {
            warn!("APP_LEAGUE_SNAPSHOT not set; serving an empty league");
            Ok(LeagueSnapshot::default())
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
