use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::domain::{CategoryCode, Team, TeamId, TournamentId, UnknownCategoryCode};
use super::eligibility::{
    check_batch, check_registration, CategoryRuleBook, EligibilityEngine, EligibilityVerdict,
    RegistrationRequest, RegistrationVerdict, TeamCategoryIndex,
};
use super::repository::{LeagueRepository, RepositoryError};
use super::stats::{ScoringTrend, StandingsTable, StatsAggregator, TeamDashboard, TeamLeaders};

/// Service loading documents from the repository and running the pure
/// statistics and eligibility routines over them.
pub struct LeagueService<R> {
    repository: Arc<R>,
    engine: Arc<EligibilityEngine>,
    stats: Arc<StatsAggregator>,
    leader_limit: usize,
}

impl<R> LeagueService<R>
where
    R: LeagueRepository + 'static,
{
    pub fn new(repository: Arc<R>, rules: CategoryRuleBook, leader_limit: usize) -> Self {
        let stats = Arc::new(StatsAggregator::new(rules.clone()));
        let engine = Arc::new(EligibilityEngine::new(rules));

        Self {
            repository,
            engine,
            stats,
            leader_limit: leader_limit.max(1),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn leader_limit(&self) -> usize {
        self.leader_limit
    }

    pub fn standings(
        &self,
        tournament: &TournamentId,
        category: &str,
    ) -> Result<StandingsTable, LeagueServiceError> {
        let category: CategoryCode = category.parse()?;
        let teams = self.repository.teams_in_category(category)?;
        let matches = self.repository.matches(tournament)?;
        debug!(
            %tournament,
            %category,
            teams = teams.len(),
            matches = matches.len(),
            "computing standings"
        );
        Ok(self.stats.standings(tournament, category, &teams, &matches))
    }

    pub fn leaders(
        &self,
        tournament: &TournamentId,
        team_id: &TeamId,
        limit: Option<usize>,
    ) -> Result<TeamLeaders, LeagueServiceError> {
        let team = self.require_team(team_id)?;
        let matches = self.repository.matches(tournament)?;
        let limit = limit.unwrap_or(self.leader_limit).max(1);
        Ok(self.stats.leaders(tournament, &team.id, &matches, limit))
    }

    pub fn trend(
        &self,
        tournament: &TournamentId,
        team_id: &TeamId,
    ) -> Result<ScoringTrend, LeagueServiceError> {
        let team = self.require_team(team_id)?;
        let teams = self.repository.teams()?;
        let matches = self.repository.matches(tournament)?;
        Ok(self.stats.trend(tournament, &team.id, &teams, &matches))
    }

    pub fn dashboard(
        &self,
        tournament: &TournamentId,
        team_id: &TeamId,
        limit: Option<usize>,
    ) -> Result<TeamDashboard, LeagueServiceError> {
        let team = self.require_team(team_id)?;
        let teams = self.repository.teams()?;
        let matches = self.repository.matches(tournament)?;
        let limit = limit.unwrap_or(self.leader_limit).max(1);
        Ok(self
            .stats
            .dashboard(tournament, &team, &teams, &matches, limit))
    }

    /// Document-only check, without roster context.
    pub fn check_eligibility(
        &self,
        document: &str,
        category: &str,
        today: NaiveDate,
    ) -> EligibilityVerdict {
        self.engine.can_join_code(document, category, today)
    }

    pub fn check_registration(
        &self,
        team_id: &TeamId,
        request: &RegistrationRequest,
        today: NaiveDate,
    ) -> Result<RegistrationVerdict, LeagueServiceError> {
        let team = self.require_team(team_id)?;
        let player = self
            .repository
            .player(&request.player_id)?
            .ok_or_else(|| LeagueServiceError::PlayerNotFound(request.player_id.0.clone()))?;
        let roster = self.repository.roster(&team.id)?;
        let index = TeamCategoryIndex::from_teams(&self.repository.teams()?);

        let verdict = check_registration(
            &self.engine,
            &player,
            &team,
            request.jersey_number,
            &roster,
            &index,
            today,
        );
        info!(
            team = %team.id,
            player = %player.id,
            allowed = verdict.allowed,
            "registration checked"
        );
        Ok(verdict)
    }

    /// Check a whole roster submission; the team index is built once.
    pub fn check_batch(
        &self,
        team_id: &TeamId,
        requests: &[RegistrationRequest],
        today: NaiveDate,
    ) -> Result<Vec<RegistrationVerdict>, LeagueServiceError> {
        let team = self.require_team(team_id)?;
        let ids: Vec<_> = requests
            .iter()
            .map(|request| request.player_id.clone())
            .collect();
        let candidates = self.repository.players(&ids)?;
        let roster = self.repository.roster(&team.id)?;
        let index = TeamCategoryIndex::from_teams(&self.repository.teams()?);

        let verdicts = check_batch(
            &self.engine,
            &team,
            requests,
            &candidates,
            &roster,
            &index,
            today,
        );
        info!(
            team = %team.id,
            requested = requests.len(),
            accepted = verdicts.iter().filter(|verdict| verdict.allowed).count(),
            "batch registration checked"
        );
        Ok(verdicts)
    }

    fn require_team(&self, team_id: &TeamId) -> Result<Team, LeagueServiceError> {
        self.repository
            .team(team_id)?
            .ok_or_else(|| LeagueServiceError::TeamNotFound(team_id.0.clone()))
    }
}

/// Error raised by the league service.
#[derive(Debug, thiserror::Error)]
pub enum LeagueServiceError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryCode),
    #[error("team {0} not found")]
    TeamNotFound(String),
    #[error("player {0} not found")]
    PlayerNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
