use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::PlayerId;
use super::eligibility::RegistrationRequest;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingPlayerId { line: u64 },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingPlayerId { line } => {
                write!(f, "roster row on line {} has no player_id", line)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingPlayerId { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    player_id: String,
    #[serde(default)]
    jersey_number: Option<u8>,
}

/// Reads `player_id,jersey_number` rows into batch registration requests.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path(path: &Path) -> Result<Vec<RegistrationRequest>, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RegistrationRequest>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut requests = Vec::new();
        let mut rows = csv_reader.deserialize::<RosterRow>();
        while let Some(result) = rows.next() {
            let row = result?;
            if row.player_id.is_empty() {
                let line = rows.reader().position().line();
                return Err(RosterImportError::MissingPlayerId { line });
            }
            requests.push(RegistrationRequest {
                player_id: PlayerId(row.player_id),
                jersey_number: row.jersey_number,
            });
        }

        Ok(requests)
    }
}
