use clap::Args;
use serde_json::Value;

use mortgage_core::rates::{LoanProduct, RateCatalog};

use crate::input;

/// Arguments for rate catalog inspection
#[derive(Args)]
pub struct RatesArgs {
    /// Path to a rate catalog JSON file
    #[arg(long)]
    pub input: Option<String>,

    /// Resolve a single product (e.g. thirty_year_fixed, arm5_1)
    #[arg(long)]
    pub product: Option<String>,
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog: RateCatalog = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <catalog.json> or stdin required for rates".into());
    };

    if let Some(ref name) = args.product {
        let product: LoanProduct = serde_json::from_value(Value::String(name.clone()))
            .map_err(|_| format!("Unknown loan product: {name}"))?;
        let quote = catalog
            .quote_for(product)
            .ok_or_else(|| format!("No quote for product: {name}"))?;
        return Ok(serde_json::json!({
            "as_of": catalog.as_of,
            "quote": quote,
            "annual_rate_decimal": catalog.rate_for(product),
        }));
    }

    Ok(serde_json::to_value(&catalog)?)
}
