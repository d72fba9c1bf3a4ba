//! Flag-football league statistics and roster eligibility.
//!
//! `stats` and `eligibility` are pure functions over league documents;
//! `service` and `router` load those documents through a
//! [`LeagueRepository`] and expose the results over HTTP.

pub mod domain;
pub mod eligibility;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryCode, Match, MatchId, MatchKind, MatchState, Membership, Play, PlayActor, PlayKind,
    Player, PlayerId, PlayerRef, Score, Sex, SideClassification, Team, TeamId, TournamentId,
};
pub use eligibility::{
    CategoryRule, CategoryRuleBook, EligibilityEngine, EligibilityVerdict, RefusalReason,
    RegistrationRefusal, RegistrationRequest, RegistrationVerdict,
};
pub use import::{RosterImportError, RosterImporter};
pub use repository::{LeagueRepository, LeagueSnapshot, RepositoryError, SnapshotError};
pub use router::league_router;
pub use service::{LeagueService, LeagueServiceError};
pub use stats::StatsAggregator;
