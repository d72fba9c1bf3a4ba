use crate::infra::{load_snapshot, parse_date, InMemoryLeagueRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use flag_league::config::AppConfig;
use flag_league::error::AppError;
use flag_league::league::stats::{LeaderEntry, ScoringTrend, StandingsTable, TeamLeaders};
use flag_league::league::{
    EligibilityEngine, EligibilityVerdict, LeagueService, RegistrationVerdict, RosterImporter, TeamId, TournamentId,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct StandingsArgs {
    /// League snapshot JSON file
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Tournament identifier
    #[arg(long)]
    pub(crate) tournament: String,
    /// Category code, e.g. mixgold
    #[arg(long)]
    pub(crate) category: String,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LeadersArgs {
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    #[arg(long)]
    pub(crate) tournament: String,
    #[arg(long)]
    pub(crate) team: String,
    /// Entries per board (defaults to APP_LEADER_LIMIT)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrendArgs {
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    #[arg(long)]
    pub(crate) tournament: String,
    #[arg(long)]
    pub(crate) team: String,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Identity document carrying birth date and sex code
    #[arg(long)]
    pub(crate) document: String,
    #[arg(long)]
    pub(crate) category: String,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RosterCheckArgs {
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    #[arg(long)]
    pub(crate) team: String,
    /// CSV with a player_id,jersey_number header
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct RosterCheckReport<'a> {
    team_id: &'a TeamId,
    accepted: usize,
    refused: usize,
    verdicts: &'a [RegistrationVerdict],
}

fn league_service(
    snapshot: &std::path::Path,
) -> Result<LeagueService<InMemoryLeagueRepository>, AppError> {
    let config = AppConfig::load()?;
    let snapshot = load_snapshot(Some(snapshot))?;
    Ok(LeagueService::new(
        Arc::new(InMemoryLeagueRepository::from_snapshot(snapshot)),
        config.league.rule_book()?,
        config.league.leader_limit,
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_standings(args: StandingsArgs) -> Result<(), AppError> {
    let service = league_service(&args.snapshot)?;
    let table = service.standings(&TournamentId(args.tournament), &args.category)?;
    if args.json {
        return print_json(&table);
    }
    render_standings(&table);
    Ok(())
}

pub(crate) fn run_leaders(args: LeadersArgs) -> Result<(), AppError> {
    let service = league_service(&args.snapshot)?;
    let leaders = service.leaders(
        &TournamentId(args.tournament),
        &TeamId(args.team),
        args.limit,
    )?;
    if args.json {
        return print_json(&leaders);
    }
    render_leaders(&leaders);
    Ok(())
}

pub(crate) fn run_trend(args: TrendArgs) -> Result<(), AppError> {
    let service = league_service(&args.snapshot)?;
    let trend = service.trend(&TournamentId(args.tournament), &TeamId(args.team))?;
    if args.json {
        return print_json(&trend);
    }
    render_trend(&trend);
    Ok(())
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = EligibilityEngine::new(config.league.rule_book()?);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let verdict = engine.can_join_code(&args.document, &args.category, today);
    render_eligibility(&args.document, &args.category, today, &verdict);
    Ok(())
}

pub(crate) fn run_roster_check(args: RosterCheckArgs) -> Result<(), AppError> {
    let service = league_service(&args.snapshot)?;
    let requests = RosterImporter::from_path(&args.csv)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let team_id = TeamId(args.team);
    let verdicts = service.check_batch(&team_id, &requests, today)?;

    let accepted = verdicts.iter().filter(|verdict| verdict.allowed).count();
    let report = RosterCheckReport {
        team_id: &team_id,
        accepted,
        refused: verdicts.len() - accepted,
        verdicts: &verdicts,
    };
    if args.json {
        return print_json(&report);
    }
    render_roster_check(&report, today);
    Ok(())
}

fn render_standings(table: &StandingsTable) {
    println!(
        "{} standings ({})",
        table.category_label, table.tournament
    );
    if table.rows.is_empty() {
        println!("  No teams registered in this category.");
        return;
    }
    println!(
        "  {:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>5} {:>6}",
        "#", "Team", "GP", "W", "L", "D", "PF", "PA", "DIFF", "AVG"
    );
    for row in &table.rows {
        println!(
            "  {:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>+5} {:>6.1}",
            row.position,
            row.team_name,
            row.games_played,
            row.wins,
            row.losses,
            row.draws,
            row.points_for,
            row.points_against,
            row.point_differential,
            row.average_points
        );
    }
    render_skipped(table.skipped_records);
}

fn render_board(title: &str, entries: &[LeaderEntry]) {
    println!("{title}:");
    if entries.is_empty() {
        println!("  - none");
    }
    for entry in entries {
        println!(
            "  {}. {} ({})",
            entry.position, entry.player_name, entry.total
        );
    }
}

fn render_leaders(leaders: &TeamLeaders) {
    println!(
        "Leaders for {} in {} ({} official matches)",
        leaders.team_id, leaders.tournament, leaders.matches_considered
    );
    render_board("Points", &leaders.points);
    render_board("Tackles", &leaders.tackles);
    render_board("Interceptions", &leaders.interceptions);
    render_board("Sacks", &leaders.sacks);
    render_board("Receptions", &leaders.receptions);
    println!("Passer rating:");
    if leaders.passer_rating.is_empty() {
        println!("  - none");
    }
    for entry in &leaders.passer_rating {
        println!(
            "  {}. {} {:.1} ({}/{} | {} TD | {} INT)",
            entry.position,
            entry.player_name,
            entry.rating,
            entry.completions,
            entry.attempts,
            entry.touchdowns,
            entry.interceptions
        );
    }
    render_skipped(leaders.skipped_records);
}

fn render_trend(trend: &ScoringTrend) {
    println!("Scoring trend for {} in {}", trend.team_id, trend.tournament);
    for entry in &trend.entries {
        let opponent = entry
            .opponent
            .name
            .clone()
            .unwrap_or_else(|| entry.opponent.id.to_string());
        println!(
            "  J{:<2} {} vs {:<20} {:>3}-{:<3} {}",
            entry.matchday,
            entry.date.format("%Y-%m-%d"),
            opponent,
            entry.points_scored,
            entry.points_allowed,
            entry.result.label()
        );
    }
    let summary = &trend.summary;
    println!(
        "Summary: {} matches | mean {} | max {} | min {}",
        summary.matches, summary.mean, summary.max, summary.min
    );
    render_skipped(trend.skipped_records);
}

fn render_eligibility(document: &str, category: &str, today: NaiveDate, verdict: &EligibilityVerdict) {
    let status = if verdict.allowed { "ELIGIBLE" } else { "NOT ELIGIBLE" };
    println!("{document} -> {category} on {today}: {status}");
    if let Some(age) = verdict.age {
        println!("  Age: {age}");
    }
    if verdict.reason.is_some() {
        println!("  Reason: {}", verdict.summary());
    }
}

fn render_roster_check(report: &RosterCheckReport<'_>, today: NaiveDate) {
    println!(
        "Roster check for {} on {}: {} accepted, {} refused",
        report.team_id, today, report.accepted, report.refused
    );
    for verdict in report.verdicts {
        let number = verdict
            .jersey_number
            .map(|number| format!("#{number}"))
            .unwrap_or_else(|| "--".to_string());
        match &verdict.reason {
            None => println!("  [ok]   {:<16} {number}", verdict.player_id.0),
            Some(reason) => println!("  [no]   {:<16} {number} {reason}", verdict.player_id.0),
        }
    }
}

fn render_skipped(skipped: usize) {
    if skipped > 0 {
        println!("({skipped} malformed records skipped)");
    }
}
