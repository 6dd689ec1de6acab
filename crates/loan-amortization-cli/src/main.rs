mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::export::ExportArgs;
use commands::goal_seek::GoalSeekArgs;
use commands::investment::{InvestArgs, PrepayVsInvestArgs};
use commands::prepayment::PrepayArgs;
use commands::schedule::{CompareArgs, ScheduleArgs};

/// Loan amortization schedules, prepayment simulation and opportunity cost
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules with decimal precision",
    long_about = "A CLI for Price (constant payment) and SAC (constant principal) loan \
                  schedules, extra-amortization simulation, prepay-vs-invest analysis and \
                  goal seeking. Fees, balance insurance and inflation-adjusted present \
                  values are included in every schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log re-amortization and residual corrections to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a full amortization schedule
    Schedule(ScheduleArgs),
    /// Compare Price and SAC total cost for the same loan
    Compare(CompareArgs),
    /// Simulate extra amortization (single or yearly) with re-amortization
    Prepay(PrepayArgs),
    /// Project compound growth of an investment
    Invest(InvestArgs),
    /// Compare a single prepayment against investing the same amount
    PrepayVsInvest(PrepayVsInvestArgs),
    /// Extra monthly payment needed to finish in a shorter term
    GoalSeek(GoalSeekArgs),
    /// Write schedules as one CSV file per named sheet
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Compare(args) => commands::schedule::run_compare(args),
        Commands::Prepay(args) => commands::prepayment::run_prepay(args),
        Commands::Invest(args) => commands::investment::run_invest(args),
        Commands::PrepayVsInvest(args) => commands::investment::run_prepay_vs_invest(args),
        Commands::GoalSeek(args) => commands::goal_seek::run_goal_seek(args),
        Commands::Export(args) => commands::export::run_export(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
