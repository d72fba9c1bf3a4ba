use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{TeamId, TournamentId};
use super::eligibility::{EligibilityVerdict, RegistrationRequest, RegistrationVerdict};
use super::repository::LeagueRepository;
use super::service::LeagueService;
use super::stats::{ScoringTrend, StandingsTable, TeamDashboard, TeamLeaders};
use crate::error::AppError;

/// Router exposing the statistics and eligibility queries.
pub fn league_router<R>(service: Arc<LeagueService<R>>) -> Router
where
    R: LeagueRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/tournaments/:tournament_id/categories/:category/standings",
            get(standings_handler::<R>),
        )
        .route(
            "/api/v1/tournaments/:tournament_id/teams/:team_id/leaders",
            get(leaders_handler::<R>),
        )
        .route(
            "/api/v1/tournaments/:tournament_id/teams/:team_id/trend",
            get(trend_handler::<R>),
        )
        .route(
            "/api/v1/tournaments/:tournament_id/teams/:team_id/dashboard",
            get(dashboard_handler::<R>),
        )
        .route("/api/v1/eligibility", post(eligibility_handler::<R>))
        .route(
            "/api/v1/teams/:team_id/registrations/check",
            post(registration_check_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct LeadersQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub document: String,
    pub category: String,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegistrationCheckRequest {
    pub entries: Vec<RegistrationRequest>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationCheckResponse {
    pub team_id: TeamId,
    pub accepted: usize,
    pub refused: usize,
    pub verdicts: Vec<RegistrationVerdict>,
}

fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) async fn standings_handler<R>(
    State(service): State<Arc<LeagueService<R>>>,
    Path((tournament_id, category)): Path<(String, String)>,
) -> Result<Json<StandingsTable>, AppError>
where
    R: LeagueRepository + 'static,
{
    let table = service.standings(&TournamentId(tournament_id), &category)?;
    Ok(Json(table))
}

pub(crate) async fn leaders_handler<R>(
    State(service): State<Arc<LeagueService<R>>>,
    Path((tournament_id, team_id)): Path<(String, String)>,
    Query(query): Query<LeadersQuery>,
) -> Result<Json<TeamLeaders>, AppError>
where
    R: LeagueRepository + 'static,
{
    let leaders = service.leaders(
        &TournamentId(tournament_id),
        &TeamId(team_id),
        query.limit,
    )?;
    Ok(Json(leaders))
}

pub(crate) async fn trend_handler<R>(
    State(service): State<Arc<LeagueService<R>>>,
    Path((tournament_id, team_id)): Path<(String, String)>,
) -> Result<Json<ScoringTrend>, AppError>
where
    R: LeagueRepository + 'static,
{
    let trend = service.trend(&TournamentId(tournament_id), &TeamId(team_id))?;
    Ok(Json(trend))
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<LeagueService<R>>>,
    Path((tournament_id, team_id)): Path<(String, String)>,
    Query(query): Query<LeadersQuery>,
) -> Result<Json<TeamDashboard>, AppError>
where
    R: LeagueRepository + 'static,
{
    let dashboard = service.dashboard(
        &TournamentId(tournament_id),
        &TeamId(team_id),
        query.limit,
    )?;
    Ok(Json(dashboard))
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<LeagueService<R>>>,
    Json(request): Json<EligibilityRequest>,
) -> Json<EligibilityVerdict>
where
    R: LeagueRepository + 'static,
{
    Json(service.check_eligibility(
        &request.document,
        &request.category,
        today_or_local(request.today),
    ))
}

pub(crate) async fn registration_check_handler<R>(
    State(service): State<Arc<LeagueService<R>>>,
    Path(team_id): Path<String>,
    Json(request): Json<RegistrationCheckRequest>,
) -> Result<Json<RegistrationCheckResponse>, AppError>
where
    R: LeagueRepository + 'static,
{
    let team_id = TeamId(team_id);
    let verdicts = service.check_batch(&team_id, &request.entries, today_or_local(request.today))?;
    let accepted = verdicts.iter().filter(|verdict| verdict.allowed).count();
    Ok(Json(RegistrationCheckResponse {
        team_id,
        accepted,
        refused: verdicts.len() - accepted,
        verdicts,
    }))
}
