use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use loan_calc_core::loan::amortized;
use loan_calc_core::loan::interest_only;
use loan_calc_core::loan::schedule::{self, BalanceInput, ScheduleInput};
use loan_calc_core::loan::{AmortizedLoan, InterestOnlyLoan};

use crate::input;

/// Arguments for the interest-only payment
#[derive(Args)]
pub struct InterestOnlyArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long, alias = "annual-interest-rate-percent", allow_hyphen_values = true)]
    pub rate: Option<Decimal>,
}

/// Arguments shared by the amortized payment, schedule, and balance commands
#[derive(Args)]
pub struct AmortizedArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long, alias = "annual-interest-rate-percent", allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: AmortizedArgs,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

/// Arguments for the outstanding balance
#[derive(Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub loan: AmortizedArgs,

    /// Number of payments already made
    #[arg(long)]
    pub payments_made: Option<u32>,
}

pub fn run_interest_only(args: InterestOnlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: InterestOnlyLoan = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if args.principal.is_some() || args.rate.is_some() {
        InterestOnlyLoan {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_percent: args.rate
                .ok_or("--rate is required (or provide --input)")?,
        }
    } else {
        from_stdin("interest-only payment")?
    };

    let result = interest_only::calculate_interest_only(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortized(args: AmortizedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = amortized_loan(&args)?;
    let result = amortized::calculate_amortized(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.loan.input {
        input::file::read_json(path)?
    } else if has_loan_flags(&args.loan) || args.first_payment_date.is_some() {
        ScheduleInput {
            loan: loan_from_flags(&args.loan)?,
            first_payment_date: args.first_payment_date,
        }
    } else {
        from_stdin("amortization schedule")?
    };

    let result = schedule::build_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let balance_input: BalanceInput = if let Some(ref path) = args.loan.input {
        input::file::read_json(path)?
    } else if has_loan_flags(&args.loan) || args.payments_made.is_some() {
        BalanceInput {
            loan: loan_from_flags(&args.loan)?,
            payments_made: args
                .payments_made
                .ok_or("--payments-made is required (or provide --input)")?,
        }
    } else {
        from_stdin("remaining balance")?
    };

    let result = schedule::calculate_remaining_balance(&balance_input)?;
    Ok(serde_json::to_value(result)?)
}

fn has_loan_flags(args: &AmortizedArgs) -> bool {
    args.principal.is_some() || args.rate.is_some() || args.term_months.is_some()
}

fn amortized_loan(args: &AmortizedArgs) -> Result<AmortizedLoan, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if !has_loan_flags(args) {
        return from_stdin("amortized loan");
    }
    loan_from_flags(args)
}

fn loan_from_flags(args: &AmortizedArgs) -> Result<AmortizedLoan, Box<dyn std::error::Error>> {
    Ok(AmortizedLoan::new(
        args.principal
            .ok_or("--principal is required (or provide --input)")?,
        args.rate
            .ok_or("--rate is required (or provide --input)")?,
        args.term_months
            .ok_or("--term-months is required (or provide --input)")?,
    ))
}

fn from_stdin<T: DeserializeOwned>(what: &str) -> Result<T, Box<dyn std::error::Error>> {
    input::stdin::read_stdin()?
        .ok_or_else(|| format!("flags, --input <file.json>, or stdin required for {what}").into())
}
