use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// (1 + rate)^nper, failing instead of overflowing the 96-bit mantissa.
pub fn compound_factor(rate: Rate, nper: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            LoanCalcError::FinancialImpossibility(format!(
                "compounding factor (1 + {rate})^{nper} exceeds decimal range"
            ))
        })
}

/// Future Value
pub fn fv(rate: Rate, nper: u32, pmt: Money, present_value: Money) -> LoanCalcResult<Money> {
    if rate.is_zero() {
        let paid = checked_product(pmt, Decimal::from(nper), "FV payment total")?;
        return Ok(-checked_sum(present_value, paid, "FV balance")?);
    }

    let factor = compound_factor(rate, nper)?;
    let annuity_factor = checked_quotient(factor - Decimal::ONE, rate, "FV annuity factor")?;

    let grown = checked_product(present_value, factor, "FV present value growth")?;
    let accumulated = checked_product(pmt, annuity_factor, "FV annuity accumulation")?;
    Ok(-checked_sum(grown, accumulated, "FV balance")?)
}

/// Payment (PMT)
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        let total = checked_sum(present_value, future_value, "PMT principal")?;
        return Ok(-total / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let annuity_factor = checked_quotient(factor - Decimal::ONE, rate, "PMT annuity factor")?;

    if annuity_factor.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let grown = checked_product(present_value, factor, "PMT present value growth")?;
    let target = checked_sum(grown, future_value, "PMT target balance")?;
    Ok(-checked_quotient(target, annuity_factor, "PMT payment")?)
}

fn overflowed(context: &str) -> LoanCalcError {
    LoanCalcError::FinancialImpossibility(format!("{context} overflowed"))
}

pub(crate) fn checked_product(a: Decimal, b: Decimal, context: &str) -> LoanCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflowed(context))
}

pub(crate) fn checked_quotient(a: Decimal, b: Decimal, context: &str) -> LoanCalcResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflowed(context))
}

pub(crate) fn checked_sum(a: Decimal, b: Decimal, context: &str) -> LoanCalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflowed(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pmt_basic() {
        // 100k over 360 months at 0.5% per month ≈ 599.55
        let result = pmt(dec!(0.005), 360, dec!(100_000), dec!(0)).unwrap();
        assert!((result + dec!(599.55)).abs() < dec!(0.01));
    }

    #[test]
    fn test_pmt_zero_rate() {
        let result = pmt(dec!(0), 4, dec!(1000), dec!(0)).unwrap();
        assert_eq!(result, dec!(-250));
    }

    #[test]
    fn test_pmt_zero_periods_rejected() {
        let err = pmt(dec!(0.01), 0, dec!(1000), dec!(0)).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { ref field, .. } if field == "nper"));
    }

    #[test]
    fn test_fv_zero_rate() {
        let result = fv(dec!(0), 10, dec!(-50), dec!(1000)).unwrap();
        assert_eq!(result, dec!(-500));
    }

    #[test]
    fn test_fv_of_full_payment_stream_is_zero() {
        let payment = pmt(dec!(0.01), 24, dec!(5000), dec!(0)).unwrap();
        let result = fv(dec!(0.01), 24, payment, dec!(5000)).unwrap();
        assert!(result.abs() < dec!(0.0000001));
    }

    #[test]
    fn test_annuity_factor_overflow_is_reported() {
        // 1.1^690 fits in a Decimal, 1.1^690 / 0.1 does not
        assert!(compound_factor(dec!(0.1), 690).is_ok());
        let err = pmt(dec!(0.1), 690, dec!(1000), dec!(0)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
        let err = fv(dec!(0.1), 690, dec!(-1), dec!(1000)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_zero_rate_overflow_is_reported() {
        let err = pmt(dec!(0), 12, Decimal::MAX, Decimal::MAX).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
        let err = fv(dec!(0), 2, Decimal::MAX, dec!(0)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_compound_factor_overflow_is_reported() {
        let err = compound_factor(dec!(10), u32::MAX).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }
}
