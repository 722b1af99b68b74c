use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{monthly_rate, rate_warnings, validate_principal, validate_rate, validate_term, AmortizedLoan};
use crate::time_value::{self, checked_product};
use crate::types::*;
use crate::LoanCalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizedOutput {
    /// Monthly fractional rate (annual percent / 1200).
    pub monthly_rate: Rate,
    /// Unrounded level monthly payment.
    pub monthly_payment: Money,
    /// Monthly payment rounded to cents.
    pub rounded_payment: Money,
    /// Unrounded payment times the number of months.
    pub total_paid: Money,
    /// `total_paid - principal`.
    pub total_interest: Money,
    /// e.g. "The conventional loan payment is 237.24"
    pub summary: String,
}

/// Level monthly payment that retires `principal` over `term_months`:
///
/// `P * r / (1 - (1 + r)^-n)` with `r = rate / 1200`, or `P / n` when the rate
/// is zero.
pub fn compute_amortized_payment(
    principal: Money,
    annual_interest_rate_percent: Percent,
    term_months: u32,
) -> LoanCalcResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_interest_rate_percent)?;
    validate_term(term_months)?;

    let rate = monthly_rate(annual_interest_rate_percent);
    let payment = if rate.is_zero() {
        principal / Decimal::from(term_months)
    } else {
        // pmt() reports cash paid out as negative
        -time_value::pmt(rate, term_months, principal, Decimal::ZERO)?
    };

    tracing::debug!(
        %principal,
        %annual_interest_rate_percent,
        term_months,
        %payment,
        "amortized payment"
    );
    Ok(payment)
}

/// Amortized payment wrapped in the standard envelope.
pub fn calculate_amortized(
    input: &AmortizedLoan,
) -> LoanCalcResult<ComputationOutput<AmortizedOutput>> {
    let start = Instant::now();

    let monthly_payment = compute_amortized_payment(
        input.principal(),
        input.annual_interest_rate_percent(),
        input.term_months,
    )?;

    let mut warnings = rate_warnings(input.annual_interest_rate_percent());
    if input.annual_interest_rate_percent().is_zero() {
        warnings.push("Zero interest rate: straight-line repayment of principal".into());
    }

    let total_paid = checked_product(
        monthly_payment,
        Decimal::from(input.term_months),
        "total of amortized payments",
    )?;
    let output = AmortizedOutput {
        monthly_rate: input.monthly_rate(),
        monthly_payment,
        rounded_payment: round_cents(monthly_payment),
        total_paid,
        total_interest: total_paid - input.principal(),
        summary: format!(
            "The conventional loan payment is {}",
            format_cents(monthly_payment)
        ),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortized Payment (P*r / (1 - (1+r)^-n), r = annual% / 1200)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
