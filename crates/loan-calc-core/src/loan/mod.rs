//! Monthly loan payment calculations.
//!
//! Two closed-form payments are supported: interest-only (the monthly interest
//! accrued on the principal) and amortized (the level payment that repays the
//! principal with interest over a fixed number of months). Rates on the inputs
//! are annual percentages; the monthly fractional rate is `percent / 1200`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Money, Percent, Rate};
use crate::LoanCalcResult;

pub mod amortized;
pub mod interest_only;

#[cfg(feature = "schedule")]
pub mod schedule;

/// Percent-per-year to fraction-per-month divisor (100 * 12).
pub const PERCENT_PER_YEAR_TO_MONTHLY: Decimal = dec!(1200);

/// Annual rates above this are almost certainly a data-entry error.
const RATE_SANITY_CEILING: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A loan on which only the accrued interest is paid each month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestOnlyLoan {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (5 = 5%).
    pub annual_interest_rate_percent: Percent,
}

/// A loan repaid by level monthly payments over a fixed term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizedLoan {
    #[serde(flatten)]
    pub loan: InterestOnlyLoan,
    /// Number of monthly payments.
    pub term_months: u32,
}

impl InterestOnlyLoan {
    pub fn new(principal: Money, annual_interest_rate_percent: Percent) -> Self {
        Self {
            principal,
            annual_interest_rate_percent,
        }
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        validate_principal(self.principal)?;
        validate_rate(self.annual_interest_rate_percent)
    }

    /// Monthly fractional rate.
    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_interest_rate_percent)
    }
}

impl AmortizedLoan {
    pub fn new(principal: Money, annual_interest_rate_percent: Percent, term_months: u32) -> Self {
        Self {
            loan: InterestOnlyLoan::new(principal, annual_interest_rate_percent),
            term_months,
        }
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        self.loan.validate()?;
        validate_term(self.term_months)
    }

    pub fn principal(&self) -> Money {
        self.loan.principal
    }

    pub fn annual_interest_rate_percent(&self) -> Percent {
        self.loan.annual_interest_rate_percent
    }

    pub fn monthly_rate(&self) -> Rate {
        self.loan.monthly_rate()
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate into a monthly fraction.
pub fn monthly_rate(annual_interest_rate_percent: Percent) -> Rate {
    annual_interest_rate_percent / PERCENT_PER_YEAR_TO_MONTHLY
}

pub(crate) fn validate_principal(principal: Money) -> LoanCalcResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "principal",
            "Principal must be greater than zero",
        ));
    }
    Ok(())
}

pub(crate) fn validate_rate(annual_interest_rate_percent: Percent) -> LoanCalcResult<()> {
    if annual_interest_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "annual_interest_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

pub(crate) fn validate_term(term_months: u32) -> LoanCalcResult<()> {
    if term_months == 0 {
        return Err(LoanCalcError::invalid(
            "term_months",
            "Term must be at least one month",
        ));
    }
    Ok(())
}

/// Non-fatal observations about the rate that callers should see.
pub(crate) fn rate_warnings(annual_interest_rate_percent: Percent) -> Vec<String> {
    let mut warnings = Vec::new();
    if annual_interest_rate_percent > RATE_SANITY_CEILING {
        warnings.push(format!(
            "Annual rate of {annual_interest_rate_percent}% exceeds 100%; check the input"
        ));
    } else if annual_interest_rate_percent > Decimal::ZERO
        && annual_interest_rate_percent < Decimal::ONE
    {
        warnings.push(format!(
            "Annual rate of {annual_interest_rate_percent}% is below 1%; rates are percentages \
             (5 = 5%), not fractions"
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_divides_percent_by_1200() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), dec!(0));
    }

    #[test]
    fn test_amortized_loan_json_is_flat() {
        let loan: AmortizedLoan = serde_json::from_str(
            r#"{"principal": "30000", "annual_interest_rate_percent": "5", "term_months": 180}"#,
        )
        .unwrap();
        assert_eq!(loan, AmortizedLoan::new(dec!(30000), dec!(5), 180));
    }

    #[test]
    fn test_validate_rejects_each_bad_field() {
        let cases = [
            (AmortizedLoan::new(dec!(0), dec!(5), 12), "principal"),
            (AmortizedLoan::new(dec!(-1), dec!(5), 12), "principal"),
            (
                AmortizedLoan::new(dec!(1000), dec!(-0.1), 12),
                "annual_interest_rate_percent",
            ),
            (AmortizedLoan::new(dec!(1000), dec!(5), 0), "term_months"),
        ];
        for (loan, expected) in cases {
            match loan.validate() {
                Err(LoanCalcError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidInput on {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rate_warnings() {
        assert!(rate_warnings(dec!(5)).is_empty());
        assert!(rate_warnings(dec!(0)).is_empty());
        assert_eq!(rate_warnings(dec!(0.05)).len(), 1);
        assert_eq!(rate_warnings(dec!(150)).len(), 1);
    }
}
