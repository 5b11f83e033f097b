//! Market rate catalog: current rates by loan product, supplied by an
//! external rate source and consumed as opaque input. The engine performs
//! no validation of quote freshness.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Loan products a rate source quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanProduct {
    ThirtyYearFixed,
    TwentyYearFixed,
    FifteenYearFixed,
    TenYearFixed,
    Arm5_1,
    Arm7_1,
    Fha30Year,
    Va30Year,
    Jumbo30Year,
}

/// Qualitative direction of recent rate movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTrend {
    Rising,
    Falling,
    Stable,
}

/// A single quoted rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateQuote {
    pub product: LoanProduct,
    /// Rate as quoted (6.5 = 6.5%).
    pub annual_rate_percent: Rate,
    pub trend: RateTrend,
}

/// Current market rates by product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCatalog {
    pub as_of: NaiveDate,
    pub quotes: Vec<RateQuote>,
}

impl RateCatalog {
    pub fn quote_for(&self, product: LoanProduct) -> Option<&RateQuote> {
        self.quotes.iter().find(|q| q.product == product)
    }

    /// Quoted rate for a product in decimal form (0.065 for a 6.5% quote).
    pub fn rate_for(&self, product: LoanProduct) -> Option<Rate> {
        self.quote_for(product)
            .map(|q| q.annual_rate_percent / dec!(100))
    }
}
