//! Fixed monthly payment for a fully amortizing, fixed-rate loan.
//!
//! Principal and interest only; escrow components are layered on in
//! `calculation`. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Number of monthly periods in a term.
pub fn periods(term_years: u32) -> u32 {
    term_years * 12
}

/// Fixed monthly principal-and-interest payment.
///
/// `annual_rate` is in decimal form (0.065 = 6.5%). A rate of exactly zero
/// amortizes straight-line; the annuity formula is undefined there and is
/// never evaluated.
pub fn monthly_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> MortgageResult<Money> {
    validate_loan(principal, annual_rate, term_years)?;

    let n = periods(term_years);
    if annual_rate.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    let monthly_rate = annual_rate / dec!(12);
    let factor = compound_factor(monthly_rate, n)?;

    // payment = P * r * (1+r)^n / ((1+r)^n - 1); factor > 1 whenever r > 0.
    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| MortgageError::NumericOverflow {
            context: "monthly payment numerator".into(),
        })?;

    Ok(numerator / (factor - Decimal::ONE))
}

/// Compute (1 + monthly_rate)^periods by iterative checked multiplication.
///
/// The exponent is always a whole number of months, so repeated
/// multiplication is exact at Decimal precision and lets overflow surface
/// as an explicit error instead of a corrupted schedule.
pub(crate) fn compound_factor(monthly_rate: Rate, periods: u32) -> MortgageResult<Decimal> {
    let base = Decimal::ONE + monthly_rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor
            .checked_mul(base)
            .ok_or_else(|| MortgageError::NumericOverflow {
                context: format!("(1+r)^{periods} compounding factor"),
            })?;
    }
    Ok(factor)
}

pub(crate) fn validate_loan(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> MortgageResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if term_years < 1 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    Ok(())
}
