mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io;
use std::process;
use tracing::Level;

use commands::loan::{AmortizedArgs, BalanceArgs, InterestOnlyArgs, ScheduleArgs};

/// Monthly loan payment calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Monthly loan payment calculations",
    long_about = "Computes interest-only and conventional (amortized) monthly loan payments \
                  with decimal precision, plus amortization schedules and outstanding \
                  balances. Rates are annual percentages: 5 means 5%."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment covering interest only
    InterestOnly(InterestOnlyArgs),
    /// Level monthly payment repaying principal and interest over the term
    Amortized(AmortizedArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Outstanding balance after a number of payments
    Balance(BalanceArgs),
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

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // stdout carries the result; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::InterestOnly(args) => commands::loan::run_interest_only(args),
        Commands::Amortized(args) => commands::loan::run_amortized(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Balance(args) => commands::loan::run_balance(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
