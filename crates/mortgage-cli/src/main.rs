mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordArgs;
use commands::mortgage::{AmortizeArgs, CalculateArgs, PaymentArgs};
use commands::rates::RatesArgs;

/// Mortgage financing calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "mtg",
    version,
    about = "Mortgage financing calculations with decimal precision",
    long_about = "A CLI for mortgage financing calculations with decimal precision. \
                  Supports monthly payment computation, full amortization schedules, \
                  PITI aggregation, affordability analysis, and rate catalog lookups."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly principal-and-interest payment for a fixed-rate loan
    Payment(PaymentArgs),
    /// Full amortization schedule with calendar due dates
    Amortize(AmortizeArgs),
    /// Full PITI calculation: monthly breakdown, totals, and schedule
    Calculate(CalculateArgs),
    /// Maximum affordable loan given income and debt constraints
    Afford(AffordArgs),
    /// Inspect a market rate catalog
    Rates(RatesArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::mortgage::run_payment(args),
        Commands::Amortize(args) => commands::mortgage::run_amortize(args),
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Afford(args) => commands::affordability::run_afford(args),
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Version => {
            println!("mtg {}", env!("CARGO_PKG_VERSION"));
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
