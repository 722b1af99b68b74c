use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{
    rate_warnings, validate_principal, validate_rate, InterestOnlyLoan, PERCENT_PER_YEAR_TO_MONTHLY,
};
use crate::time_value::{checked_product, checked_quotient};
use crate::types::*;
use crate::LoanCalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestOnlyOutput {
    /// Monthly fractional rate (annual percent / 1200).
    pub monthly_rate: Rate,
    /// Unrounded monthly payment.
    pub monthly_payment: Money,
    /// Monthly payment rounded to cents.
    pub rounded_payment: Money,
    /// Twelve months of interest.
    pub annual_interest: Money,
    /// e.g. "The interest only loan payment is 125.00"
    pub summary: String,
}

/// Monthly interest-only payment: `principal * rate / 1200`.
///
/// The product is taken before the division so the result is exact whenever
/// the quotient is representable.
pub fn compute_interest_only_payment(
    principal: Money,
    annual_interest_rate_percent: Percent,
) -> LoanCalcResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_interest_rate_percent)?;

    let annual = checked_product(principal, annual_interest_rate_percent, "interest-only principal x rate")?;
    let payment = checked_quotient(annual, PERCENT_PER_YEAR_TO_MONTHLY, "interest-only payment")?;
    tracing::debug!(%principal, %annual_interest_rate_percent, %payment, "interest-only payment");
    Ok(payment)
}

/// Interest-only payment wrapped in the standard envelope.
pub fn calculate_interest_only(
    input: &InterestOnlyLoan,
) -> LoanCalcResult<ComputationOutput<InterestOnlyOutput>> {
    let start = Instant::now();

    let monthly_payment =
        compute_interest_only_payment(input.principal, input.annual_interest_rate_percent)?;
    let warnings = rate_warnings(input.annual_interest_rate_percent);
    let annual_interest = checked_quotient(
        checked_product(input.principal, input.annual_interest_rate_percent, "annual interest")?,
        dec!(100),
        "annual interest",
    )?;

    let output = InterestOnlyOutput {
        monthly_rate: input.monthly_rate(),
        monthly_payment,
        rounded_payment: round_cents(monthly_payment),
        annual_interest,
        summary: format!(
            "The interest only loan payment is {}",
            format_cents(monthly_payment)
        ),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Interest-Only Payment (principal x annual% / 1200)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanCalcError;

    #[test]
    fn test_reference_loan() {
        let payment = compute_interest_only_payment(dec!(30000), dec!(5)).unwrap();
        assert_eq!(payment, dec!(125));
    }

    #[test]
    fn test_payment_is_unrounded() {
        // 1000 * 7 / 1200 = 5.8333...
        let payment = compute_interest_only_payment(dec!(1000), dec!(7)).unwrap();
        assert_eq!(payment, dec!(7000) / dec!(1200));
        assert_ne!(payment, dec!(5.83));
    }

    #[test]
    fn test_zero_rate_is_zero_payment() {
        let payment = compute_interest_only_payment(dec!(50000), dec!(0)).unwrap();
        assert_eq!(payment, dec!(0));
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        for principal in [dec!(0), dec!(-100)] {
            let err = compute_interest_only_payment(principal, dec!(5)).unwrap_err();
            assert!(matches!(err, LoanCalcError::InvalidInput { ref field, .. } if field == "principal"));
        }
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = compute_interest_only_payment(dec!(1000), dec!(-1)).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_envelope_summary_and_annual_interest() {
        let out = calculate_interest_only(&InterestOnlyLoan::new(dec!(30000), dec!(5))).unwrap();
        assert_eq!(out.result.summary, "The interest only loan payment is 125.00");
        assert_eq!(out.result.annual_interest, dec!(1500));
        assert_eq!(out.result.rounded_payment, dec!(125));
        assert!(out.warnings.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_principal_times_rate_overflow_is_reported() {
        let err = compute_interest_only_payment(rust_decimal::Decimal::MAX, dec!(5)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));

        let loan = InterestOnlyLoan::new(rust_decimal::Decimal::MAX, dec!(5));
        assert!(matches!(
            calculate_interest_only(&loan),
            Err(LoanCalcError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_largest_representable_payment() {
        // MAX * 1 still fits; the division then scales it down
        let payment = compute_interest_only_payment(rust_decimal::Decimal::MAX, dec!(1)).unwrap();
        assert_eq!(payment, rust_decimal::Decimal::MAX / dec!(1200));
    }

    #[test]
    fn test_fractional_rate_warns() {
        let out = calculate_interest_only(&InterestOnlyLoan::new(dec!(30000), dec!(0.05))).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
