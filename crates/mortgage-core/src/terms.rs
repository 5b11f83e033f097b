//! Validated representation of a borrower's requested loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// LTV above this threshold (strictly) requires private mortgage insurance.
const PMI_LTV_THRESHOLD: Decimal = dec!(80);

/// Inputs to a mortgage calculation.
///
/// Rate fields are carried as quoted percentages (6.5 = 6.5%) and converted
/// to decimal form at the engine boundary. Escrow fields absent from the
/// wire payload default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Loan amount.
    pub principal: Money,
    /// Appraised property value.
    pub property_value: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// Annual interest rate as quoted (e.g. 6.5 for 6.5%).
    pub annual_rate_percent: Rate,
    /// Loan term in whole years.
    pub term_years: u32,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
    /// Annual PMI rate as quoted (e.g. 0.5 for 0.5% of principal per year).
    #[serde(default)]
    pub pmi_annual_rate_percent: Rate,
}

impl LoanTerms {
    /// Annual rate in decimal form (0.065 for a 6.5% quote).
    pub fn annual_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(100)
    }

    /// Loan-to-value ratio in percent. Requires a validated (positive)
    /// property value.
    pub fn loan_to_value_ratio(&self) -> Decimal {
        self.principal / self.property_value * dec!(100)
    }

    /// PMI applies strictly above 80% LTV; exactly 80% does not require it.
    pub fn is_pmi_required(&self) -> bool {
        self.loan_to_value_ratio() > PMI_LTV_THRESHOLD
    }

    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "principal".into(),
                reason: "Loan amount must be positive".into(),
            });
        }
        if self.property_value <= Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "property_value".into(),
                reason: "Property value must be positive".into(),
            });
        }
        if self.down_payment < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "down_payment".into(),
                reason: "Down payment cannot be negative".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.term_years < 1 {
            return Err(MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be at least 1 year".into(),
            });
        }
        if self.annual_property_tax < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_property_tax".into(),
                reason: "Property tax cannot be negative".into(),
            });
        }
        if self.annual_insurance < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_insurance".into(),
                reason: "Insurance cannot be negative".into(),
            });
        }
        if self.monthly_hoa < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "monthly_hoa".into(),
                reason: "HOA dues cannot be negative".into(),
            });
        }
        if self.pmi_annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "pmi_annual_rate_percent".into(),
                reason: "PMI rate cannot be negative".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_terms() -> LoanTerms {
        LoanTerms {
            principal: dec!(400_000),
            property_value: dec!(500_000),
            down_payment: dec!(100_000),
            annual_rate_percent: dec!(6.5),
            term_years: 30,
            annual_property_tax: dec!(6_000),
            annual_insurance: dec!(1_800),
            monthly_hoa: dec!(50),
            pmi_annual_rate_percent: dec!(0.5),
        }
    }

    // -----------------------------------------------------------------------
    // 1. LTV computed in percent
    // -----------------------------------------------------------------------
    #[test]
    fn test_ltv_percent() {
        let terms = standard_terms();
        assert_eq!(terms.loan_to_value_ratio(), dec!(80));
    }

    // -----------------------------------------------------------------------
    // 2. PMI threshold: exactly 80% does not require PMI
    // -----------------------------------------------------------------------
    #[test]
    fn test_pmi_not_required_at_exactly_80() {
        let terms = standard_terms();
        assert_eq!(terms.loan_to_value_ratio(), dec!(80));
        assert!(!terms.is_pmi_required());
    }

    // -----------------------------------------------------------------------
    // 3. PMI threshold: 80.01% requires PMI
    // -----------------------------------------------------------------------
    #[test]
    fn test_pmi_required_just_above_80() {
        let terms = LoanTerms {
            principal: dec!(400_050),
            ..standard_terms()
        };
        assert!(terms.loan_to_value_ratio() > dec!(80));
        assert!(terms.is_pmi_required());
    }

    // -----------------------------------------------------------------------
    // 4. Rate conversion to decimal
    // -----------------------------------------------------------------------
    #[test]
    fn test_annual_rate_decimal() {
        let terms = standard_terms();
        assert_eq!(terms.annual_rate(), dec!(0.065));
    }

    // -----------------------------------------------------------------------
    // 5. Zero rate is valid
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_valid() {
        let terms = LoanTerms {
            annual_rate_percent: dec!(0),
            ..standard_terms()
        };
        assert!(terms.validate().is_ok());
    }

    // -----------------------------------------------------------------------
    // 6. Validation: non-positive principal
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_zero_principal() {
        let terms = LoanTerms {
            principal: dec!(0),
            ..standard_terms()
        };
        assert!(terms.validate().is_err());
    }

    // -----------------------------------------------------------------------
    // 7. Validation: negative rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_negative_rate() {
        let terms = LoanTerms {
            annual_rate_percent: dec!(-1),
            ..standard_terms()
        };
        assert!(terms.validate().is_err());
    }

    // -----------------------------------------------------------------------
    // 8. Validation: zero-year term
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_zero_term() {
        let terms = LoanTerms {
            term_years: 0,
            ..standard_terms()
        };
        assert!(terms.validate().is_err());
    }

    // -----------------------------------------------------------------------
    // 9. Validation: negative escrow inputs
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_negative_escrow() {
        let tax = LoanTerms {
            annual_property_tax: dec!(-1),
            ..standard_terms()
        };
        assert!(tax.validate().is_err());

        let hoa = LoanTerms {
            monthly_hoa: dec!(-1),
            ..standard_terms()
        };
        assert!(hoa.validate().is_err());
    }

    // -----------------------------------------------------------------------
    // 10. Missing escrow fields deserialize to zero
    // -----------------------------------------------------------------------
    #[test]
    fn test_missing_escrow_defaults_to_zero() {
        let json = r#"{
            "principal": 300000,
            "property_value": 400000,
            "annual_rate_percent": 6.0,
            "term_years": 15
        }"#;
        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.annual_property_tax, Decimal::ZERO);
        assert_eq!(terms.annual_insurance, Decimal::ZERO);
        assert_eq!(terms.monthly_hoa, Decimal::ZERO);
        assert_eq!(terms.pmi_annual_rate_percent, Decimal::ZERO);
        assert!(terms.validate().is_ok());
    }
}
