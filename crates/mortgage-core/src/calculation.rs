//! Presentation-ready aggregate: monthly PITI breakdown, lifetime totals,
//! payoff date, and the full amortization schedule.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, AmortizationEntry};
use crate::error::MortgageError;
use crate::payment;
use crate::terms::LoanTerms;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

/// Top-level calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub terms: LoanTerms,
    /// Origination date; the first payment falls one month later.
    pub start_date: NaiveDate,
}

/// Aggregate output of a mortgage calculation. Immutable once constructed;
/// every calculation is a pure function of its input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub monthly_principal_and_interest: Money,
    pub monthly_property_tax: Money,
    pub monthly_insurance: Money,
    /// Exactly zero when the loan-to-value ratio is at or below 80%.
    pub monthly_pmi: Money,
    pub monthly_hoa: Money,
    /// Sum of the five components above.
    pub total_monthly_payment: Money,
    pub loan_to_value_ratio: Decimal,
    pub pmi_required: bool,
    pub total_interest_paid: Money,
    pub total_amount_paid: Money,
    pub payoff_date: NaiveDate,
    pub schedule: Vec<AmortizationEntry>,
}

/// Run a full mortgage calculation.
pub fn calculate_mortgage(
    input: &MortgageInput,
) -> MortgageResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = &input.terms;
    terms.validate()?;

    if terms.principal > terms.property_value {
        warnings.push(format!(
            "Principal ({}) exceeds property value ({}); LTV is above 100%",
            terms.principal, terms.property_value
        ));
    }

    let annual_rate = terms.annual_rate();
    let monthly_pi = payment::monthly_payment(terms.principal, annual_rate, terms.term_years)?;
    let schedule = amortization::build_schedule(
        terms.principal,
        annual_rate,
        terms.term_years,
        input.start_date,
    )?;

    let monthly_property_tax = terms.annual_property_tax / dec!(12);
    let monthly_insurance = terms.annual_insurance / dec!(12);
    let loan_to_value_ratio = terms.loan_to_value_ratio();
    let pmi_required = terms.is_pmi_required();
    let monthly_pmi = if pmi_required {
        terms.principal * terms.pmi_annual_rate_percent / dec!(100) / dec!(12)
    } else {
        Decimal::ZERO
    };

    let total_monthly_payment = monthly_pi
        + monthly_property_tax
        + monthly_insurance
        + monthly_pmi
        + terms.monthly_hoa;

    let n = Decimal::from(payment::periods(terms.term_years));
    let total_interest_paid: Decimal = schedule.iter().map(|e| e.interest_portion).sum();
    let principal_and_interest_total: Decimal =
        schedule.iter().map(|e| e.total_payment).sum();
    let escrow_total =
        (monthly_property_tax + monthly_insurance + monthly_pmi + terms.monthly_hoa) * n;
    let total_amount_paid = principal_and_interest_total + escrow_total;

    let payoff_date = schedule
        .last()
        .map(|entry| entry.due_date)
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term produced an empty schedule".into(),
        })?;

    let result = CalculationResult {
        monthly_principal_and_interest: monthly_pi,
        monthly_property_tax,
        monthly_insurance,
        monthly_pmi,
        monthly_hoa: terms.monthly_hoa,
        total_monthly_payment,
        loan_to_value_ratio,
        pmi_required,
        total_interest_paid,
        total_amount_paid,
        payoff_date,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortizing Mortgage (PITI)",
        input,
        warnings,
        elapsed,
        result,
    ))
}
