use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{CategoryCode, Match, Player, PlayerId, Team, TeamId, TournamentId};

/// Read-only access to the league documents kept by the external store.
pub trait LeagueRepository: Send + Sync {
    fn team(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError>;
    fn teams(&self) -> Result<Vec<Team>, RepositoryError>;
    fn player(&self, id: &PlayerId) -> Result<Option<Player>, RepositoryError>;
    fn players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, RepositoryError>;
    /// Players holding a membership on `team`.
    fn roster(&self, team: &TeamId) -> Result<Vec<Player>, RepositoryError>;
    fn matches(&self, tournament: &TournamentId) -> Result<Vec<Match>, RepositoryError>;

    fn teams_in_category(&self, category: CategoryCode) -> Result<Vec<Team>, RepositoryError> {
        Ok(self
            .teams()?
            .into_iter()
            .filter(|team| team.category == category)
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Serialized dump of the store, used to seed in-memory repositories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read league snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid league snapshot: {0}")]
    Format(#[from] serde_json::Error),
}

impl LeagueSnapshot {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
