use crate::report::{
    run_eligibility, run_leaders, run_roster_check, run_standings, run_trend, EligibilityArgs,
    LeadersArgs, RosterCheckArgs, StandingsArgs, TrendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use flag_league::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Flag League",
    about = "Serve or query flag-football league statistics and roster eligibility",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print category standings for a tournament
    Standings(StandingsArgs),
    /// Print a team's statistical leaders
    Leaders(LeadersArgs),
    /// Print a team's scoring trend
    Trend(TrendArgs),
    /// Check whether an identity document qualifies for a category
    Eligibility(EligibilityArgs),
    /// Roster submission tools
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Check a CSV roster submission against a team
    Check(RosterCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Standings(args) => run_standings(args),
        Command::Leaders(args) => run_leaders(args),
        Command::Trend(args) => run_trend(args),
        Command::Eligibility(args) => run_eligibility(args),
        Command::Roster {
            command: RosterCommand::Check(args),
        } => run_roster_check(args),
    }
}
