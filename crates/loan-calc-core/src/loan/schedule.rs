//! Month-by-month amortization schedule and outstanding balance.
//!
//! The schedule is built in cents: each row's interest is the opening balance
//! times the monthly rate rounded to cents, the payment is the amortized
//! payment rounded to cents, and the final row absorbs any rounding residue so
//! the loan closes at exactly zero.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortized::compute_amortized_payment;
use super::{rate_warnings, AmortizedLoan};
use crate::error::LoanCalcError;
use crate::time_value::{self, checked_product, checked_sum};
use crate::types::*;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub loan: AmortizedLoan,
    /// Date of the first payment; later payments fall on the same day of
    /// each following month (clamped to month end).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInput {
    #[serde(flatten)]
    pub loan: AmortizedLoan,
    pub payments_made: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Level payment in cents; the last row may differ.
    pub monthly_payment: Money,
    pub periods: Vec<SchedulePeriod>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceOutput {
    pub payments_made: u32,
    pub remaining_balance: Money,
    pub rounded_balance: Money,
    pub principal_repaid: Money,
    /// e.g. "The remaining balance after 60 payments is 22367.13"
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full amortization schedule for a loan.
pub fn build_schedule(input: &ScheduleInput) -> LoanCalcResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let loan = &input.loan;
    loan.validate()?;

    let mut warnings = rate_warnings(loan.annual_interest_rate_percent());
    let rate = loan.monthly_rate();
    let level_payment = round_cents(compute_amortized_payment(
        loan.principal(),
        loan.annual_interest_rate_percent(),
        loan.term_months,
    )?);

    let mut periods = Vec::with_capacity(loan.term_months as usize);
    let mut balance = loan.principal();
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut paid_off_early = None;

    for month in 1..=loan.term_months {
        let opening = balance;
        let interest = round_cents(checked_product(opening, rate, "schedule interest")?);

        let mut principal = level_payment - interest;
        if month == loan.term_months || principal > opening {
            principal = opening;
        }
        let payment = checked_sum(principal, interest, "schedule payment")?;
        balance = opening - principal;

        if balance.is_zero() && month < loan.term_months && paid_off_early.is_none() {
            paid_off_early = Some(month);
        }

        total_paid = checked_sum(total_paid, payment, "schedule total paid")?;
        total_interest = checked_sum(total_interest, interest, "schedule total interest")?;

        periods.push(SchedulePeriod {
            month,
            payment_date: payment_date(input.first_payment_date, month)?,
            opening_balance: opening,
            payment,
            interest,
            principal,
            remaining_balance: balance,
        });
    }

    if let Some(month) = paid_off_early {
        warnings.push(format!(
            "Cent rounding retires the loan in month {month} of {}",
            loan.term_months
        ));
    }

    let output = ScheduleOutput {
        monthly_payment: level_payment,
        periods,
        total_paid,
        total_interest,
        total_principal: loan.principal(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization Schedule (level payment, cent rounding, final-period true-up)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Outstanding principal after `payments_made` level (unrounded) payments.
///
/// Zero once every scheduled payment has been made.
pub fn remaining_balance(loan: &AmortizedLoan, payments_made: u32) -> LoanCalcResult<Money> {
    loan.validate()?;
    if payments_made >= loan.term_months {
        return Ok(Decimal::ZERO);
    }
    if payments_made == 0 {
        return Ok(loan.principal());
    }

    let payment = compute_amortized_payment(
        loan.principal(),
        loan.annual_interest_rate_percent(),
        loan.term_months,
    )?;
    // fv() of (borrowed +P, paid -pmt) is the negated balance still owed
    let owed = -time_value::fv(loan.monthly_rate(), payments_made, -payment, loan.principal())?;

    tracing::debug!(payments_made, %owed, "remaining balance");
    Ok(owed.max(Decimal::ZERO))
}

/// Outstanding balance wrapped in the standard envelope.
pub fn calculate_remaining_balance(
    input: &BalanceInput,
) -> LoanCalcResult<ComputationOutput<BalanceOutput>> {
    let start = Instant::now();

    let balance = remaining_balance(&input.loan, input.payments_made)?;
    let mut warnings = rate_warnings(input.loan.annual_interest_rate_percent());
    if input.payments_made > input.loan.term_months {
        warnings.push(format!(
            "{} payments exceeds the {}-month term; loan is fully repaid",
            input.payments_made, input.loan.term_months
        ));
    }

    let output = BalanceOutput {
        payments_made: input.payments_made,
        remaining_balance: balance,
        rounded_balance: round_cents(balance),
        principal_repaid: input.loan.principal() - balance,
        summary: format!(
            "The remaining balance after {} payments is {}",
            input.payments_made,
            format_cents(balance)
        ),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Remaining Balance (future value of principal less future value of payments)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn payment_date(first: Option<NaiveDate>, month: u32) -> LoanCalcResult<Option<NaiveDate>> {
    let Some(first) = first else {
        return Ok(None);
    };
    first
        .checked_add_months(Months::new(month - 1))
        .map(Some)
        .ok_or_else(|| {
            LoanCalcError::invalid(
                "first_payment_date",
                format!("payment {month} falls outside the supported date range"),
            )
        })
}
