use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::affordability::{self, AffordabilityInput};

use crate::input;

/// Arguments for affordability analysis
#[derive(Args)]
pub struct AffordArgs {
    /// Monthly gross income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Existing monthly debt payments
    #[arg(long, default_value = "0")]
    pub monthly_debt: Decimal,

    /// Annual rate in decimal form (e.g. 0.065 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Maximum payment-to-income ratio
    #[arg(long, default_value = "0.28")]
    pub ratio: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_afford(args: AffordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AffordabilityInput {
            monthly_gross_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            monthly_debt_payments: args.monthly_debt,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            max_payment_to_income_ratio: args.ratio,
        }
    };

    let result = affordability::analyze_affordability(&afford_input)?;
    Ok(serde_json::to_value(result)?)
}
