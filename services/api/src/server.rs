use crate::cli::ServeArgs;
use crate::infra::{load_snapshot, AppState, InMemoryLeagueRepository};
use crate::routes::with_league_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use flag_league::config::AppConfig;
use flag_league::error::AppError;
use flag_league::league::LeagueService;
use flag_league::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let snapshot = load_snapshot(config.league.snapshot_path.as_deref())?;
    let rules = config.league.rule_book()?;
    info!(
        teams = snapshot.teams.len(),
        players = snapshot.players.len(),
        matches = snapshot.matches.len(),
        categories = rules.len(),
        "league data loaded"
    );

    let repository = Arc::new(InMemoryLeagueRepository::from_snapshot(snapshot));
    let league_service = Arc::new(LeagueService::new(
        repository,
        rules,
        config.league.leader_limit,
    ));

    let app = with_league_routes(league_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "flag league service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
