//! Payment-by-payment expansion of a loan into an amortization schedule.
//!
//! Interest accrues against the declining balance each period. Residual
//! floating drift from earlier periods is folded into the final payment so
//! the schedule always closes at a balance of exactly zero.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::payment;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// One scheduled payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based payment number.
    pub index: u32,
    pub due_date: NaiveDate,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total_payment: Money,
    /// Balance after this payment. Exactly zero on the final entry.
    pub remaining_balance: Money,
}

/// Expand a loan into its full schedule of `term_years * 12` entries.
///
/// Pure function of its inputs; safe to regenerate deterministically.
/// Due dates advance by calendar months from `start_date`, clamping to the
/// last valid day when the anchor day does not exist (Jan 31 + 1 month is
/// end of February).
pub fn build_schedule(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    start_date: NaiveDate,
) -> MortgageResult<Vec<AmortizationEntry>> {
    let monthly_payment = payment::monthly_payment(principal, annual_rate, term_years)?;
    let n = payment::periods(term_years);
    let monthly_rate = annual_rate / dec!(12);

    let mut balance = principal;
    let mut schedule = Vec::with_capacity(n as usize);

    for index in 1..=n {
        let interest = balance * monthly_rate;

        let (principal_portion, total_payment, next_balance) = if index == n {
            // Fold any residual drift into the last payment so the balance
            // closes at exactly zero: total = payment + residual.
            (balance, interest + balance, Decimal::ZERO)
        } else {
            let principal_portion = monthly_payment - interest;
            (principal_portion, monthly_payment, balance - principal_portion)
        };

        schedule.push(AmortizationEntry {
            index,
            due_date: due_date(start_date, index)?,
            principal_portion,
            interest_portion: interest,
            total_payment,
            remaining_balance: next_balance,
        });

        balance = next_balance;
    }

    Ok(schedule)
}

fn due_date(start_date: NaiveDate, months_ahead: u32) -> MortgageResult<NaiveDate> {
    start_date
        .checked_add_months(Months::new(months_ahead))
        .ok_or_else(|| {
            MortgageError::DateError(format!(
                "Due date {months_ahead} months after {start_date} is out of range"
            ))
        })
}
