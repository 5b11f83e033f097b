//! Inverse of the amortization formula: the largest loan a borrower's
//! income supports, given a payment-to-income cap and existing debt.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

/// Conventional front-end ratio used when the caller does not supply one.
const DEFAULT_PAYMENT_TO_INCOME_RATIO: Decimal = dec!(0.28);

fn default_ratio() -> Rate {
    DEFAULT_PAYMENT_TO_INCOME_RATIO
}

/// Affordability analysis input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub monthly_gross_income: Money,
    #[serde(default)]
    pub monthly_debt_payments: Money,
    /// Annual rate in decimal form (0.065 = 6.5%).
    pub annual_rate: Rate,
    pub term_years: u32,
    /// Share of gross income available for the mortgage payment.
    #[serde(default = "default_ratio")]
    pub max_payment_to_income_ratio: Rate,
}

/// Affordability analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    /// Income capacity left for a mortgage payment, floored at zero.
    pub max_monthly_payment: Money,
    /// Largest principal whose payment fits within `max_monthly_payment`.
    pub max_loan_amount: Money,
    /// Existing debt service as a percentage of gross income.
    pub debt_to_income_ratio: Decimal,
}

/// Bound the maximum loan size for a borrower.
///
/// A borrower whose debt service already consumes the payment capacity gets
/// a zero max loan with a warning, not an error.
pub fn analyze_affordability(
    input: &AffordabilityInput,
) -> MortgageResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    validate(input)?;

    let capacity =
        input.monthly_gross_income * input.max_payment_to_income_ratio - input.monthly_debt_payments;

    let debt_to_income_ratio =
        input.monthly_debt_payments / input.monthly_gross_income * dec!(100);

    let output = if capacity <= Decimal::ZERO {
        warnings.push(format!(
            "Existing debt payments ({}) consume the full payment capacity ({})",
            input.monthly_debt_payments,
            input.monthly_gross_income * input.max_payment_to_income_ratio
        ));
        AffordabilityOutput {
            max_monthly_payment: Decimal::ZERO,
            max_loan_amount: Decimal::ZERO,
            debt_to_income_ratio,
        }
    } else {
        let max_loan_amount = max_loan(capacity, input.annual_rate, input.term_years)?;
        AffordabilityOutput {
            max_monthly_payment: capacity,
            max_loan_amount,
            debt_to_income_ratio,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Payment-to-Income Affordability Inversion",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Invert the annuity formula for principal:
/// `P = pmt * ((1+r)^n - 1) / (r * (1+r)^n)`, straight-line at rate zero.
fn max_loan(max_payment: Money, annual_rate: Rate, term_years: u32) -> MortgageResult<Money> {
    let n = payment::periods(term_years);
    if annual_rate.is_zero() {
        return Ok(max_payment * Decimal::from(n));
    }

    let monthly_rate = annual_rate / dec!(12);
    let factor = payment::compound_factor(monthly_rate, n)?;
    let denominator = monthly_rate * factor;

    max_payment
        .checked_mul(factor - Decimal::ONE)
        .map(|v| v / denominator)
        .ok_or_else(|| MortgageError::NumericOverflow {
            context: "maximum loan inversion".into(),
        })
}

fn validate(input: &AffordabilityInput) -> MortgageResult<()> {
    if input.monthly_gross_income <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "monthly_gross_income".into(),
            reason: "Gross income must be positive".into(),
        });
    }
    if input.monthly_debt_payments < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "monthly_debt_payments".into(),
            reason: "Debt payments cannot be negative".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.term_years < 1 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if input.max_payment_to_income_ratio <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "max_payment_to_income_ratio".into(),
            reason: "Payment-to-income ratio must be positive".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_input() -> AffordabilityInput {
        AffordabilityInput {
            monthly_gross_income: dec!(8_000),
            monthly_debt_payments: dec!(500),
            annual_rate: dec!(0.065),
            term_years: 30,
            max_payment_to_income_ratio: dec!(0.28),
        }
    }

    // -----------------------------------------------------------------------
    // 1. Benchmark: $8k income, $500 debt, 28% ratio
    // -----------------------------------------------------------------------
    #[test]
    fn test_benchmark_scenario() {
        let out = analyze_affordability(&standard_input()).unwrap().result;
        assert_eq!(out.max_monthly_payment, dec!(1_740));
        // $1,740/month at 6.5% over 30 years supports ~$275.3k of principal.
        assert_close(
            out.max_loan_amount,
            dec!(275_287),
            dec!(100),
            "benchmark max loan",
        );
    }

    // -----------------------------------------------------------------------
    // 2. Inverse property: the max loan's payment fits the capacity
    // -----------------------------------------------------------------------
    #[test]
    fn test_inverse_property() {
        for (income, debt, rate, term) in [
            (dec!(8_000), dec!(500), dec!(0.065), 30u32),
            (dec!(12_345), dec!(0), dec!(0.031), 15),
            (dec!(4_000), dec!(200), dec!(0.089), 40),
        ] {
            let input = AffordabilityInput {
                monthly_gross_income: income,
                monthly_debt_payments: debt,
                annual_rate: rate,
                term_years: term,
                max_payment_to_income_ratio: dec!(0.28),
            };
            let out = analyze_affordability(&input).unwrap().result;
            let pmt =
                payment::monthly_payment(out.max_loan_amount, rate, term).unwrap();
            assert!(
                pmt <= out.max_monthly_payment + dec!(0.000001),
                "payment {} on max loan should fit capacity {}",
                pmt,
                out.max_monthly_payment
            );
        }
    }

    // -----------------------------------------------------------------------
    // 3. Zero rate: max loan is capacity * n
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_special_case() {
        let input = AffordabilityInput {
            annual_rate: dec!(0),
            ..standard_input()
        };
        let out = analyze_affordability(&input).unwrap().result;
        assert_eq!(out.max_loan_amount, dec!(1_740) * dec!(360));
    }

    // -----------------------------------------------------------------------
    // 4. Debt exceeding capacity yields zero, not an error
    // -----------------------------------------------------------------------
    #[test]
    fn test_overextended_borrower_gets_zero() {
        let input = AffordabilityInput {
            monthly_debt_payments: dec!(5_000),
            ..standard_input()
        };
        let result = analyze_affordability(&input).unwrap();
        assert_eq!(result.result.max_loan_amount, Decimal::ZERO);
        assert_eq!(result.result.max_monthly_payment, Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    // -----------------------------------------------------------------------
    // 5. Debt-to-income ratio in percent
    // -----------------------------------------------------------------------
    #[test]
    fn test_debt_to_income_ratio() {
        let out = analyze_affordability(&standard_input()).unwrap().result;
        assert_eq!(out.debt_to_income_ratio, dec!(6.25));
    }

    // -----------------------------------------------------------------------
    // 6. Validation: zero income
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_zero_income() {
        let input = AffordabilityInput {
            monthly_gross_income: dec!(0),
            ..standard_input()
        };
        assert!(matches!(
            analyze_affordability(&input),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // 7. Validation: negative debt and non-positive ratio
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_negative_debt_and_ratio() {
        let debt = AffordabilityInput {
            monthly_debt_payments: dec!(-1),
            ..standard_input()
        };
        assert!(analyze_affordability(&debt).is_err());

        let ratio = AffordabilityInput {
            max_payment_to_income_ratio: dec!(0),
            ..standard_input()
        };
        assert!(analyze_affordability(&ratio).is_err());
    }

    // -----------------------------------------------------------------------
    // 8. Ratio defaults to 0.28 when absent from the wire payload
    // -----------------------------------------------------------------------
    #[test]
    fn test_ratio_serde_default() {
        let json = r#"{
            "monthly_gross_income": 8000,
            "monthly_debt_payments": 500,
            "annual_rate": 0.065,
            "term_years": 30
        }"#;
        let input: AffordabilityInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.max_payment_to_income_ratio, dec!(0.28));
    }

    // -----------------------------------------------------------------------
    // 9. Envelope metadata is populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_metadata_populated() {
        let result = analyze_affordability(&standard_input()).unwrap();
        assert!(result.methodology.contains("Affordability"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    }
}
