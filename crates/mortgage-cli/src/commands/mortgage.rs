use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization;
use mortgage_core::calculation::{self, MortgageInput};
use mortgage_core::payment;
use mortgage_core::terms::LoanTerms;

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in decimal form (e.g. 0.065 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct AmortizeArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in decimal form (e.g. 0.065 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Origination date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full PITI calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Appraised property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual rate as quoted (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub rate_percent: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual homeowner's insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,

    /// Annual PMI rate as quoted (e.g. 0.5 for 0.5%)
    #[arg(long, default_value = "0")]
    pub pmi_rate_percent: Decimal,

    /// Origination date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Path to JSON input file with a full MortgageInput (overrides flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(serde::Deserialize)]
struct PaymentRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
}

#[derive(serde::Deserialize)]
struct ScheduleRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    start_date: Option<NaiveDate>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: PaymentRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PaymentRequest {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
        }
    };

    let monthly = payment::monthly_payment(
        request.principal,
        request.annual_rate,
        request.term_years,
    )?;
    Ok(serde_json::json!({ "monthly_payment": monthly }))
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ScheduleRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleRequest {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            start_date: args.start_date,
        }
    };

    let start_date = request
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let schedule = amortization::build_schedule(
        request.principal,
        request.annual_rate,
        request.term_years,
        start_date,
    )?;
    Ok(serde_json::json!({ "schedule": schedule }))
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MortgageInput {
            terms: LoanTerms {
                principal: args.principal.ok_or("--principal is required (or provide --input)")?,
                property_value: args
                    .property_value
                    .ok_or("--property-value is required (or provide --input)")?,
                down_payment: args.down_payment,
                annual_rate_percent: args
                    .rate_percent
                    .ok_or("--rate-percent is required (or provide --input)")?,
                term_years: args
                    .term_years
                    .ok_or("--term-years is required (or provide --input)")?,
                annual_property_tax: args.property_tax,
                annual_insurance: args.insurance,
                monthly_hoa: args.hoa,
                pmi_annual_rate_percent: args.pmi_rate_percent,
            },
            start_date: args
                .start_date
                .unwrap_or_else(|| Local::now().date_naive()),
        }
    };

    let result = calculation::calculate_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
