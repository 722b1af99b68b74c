use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use loan_calc_core::loan::{amortized, interest_only, schedule};
use loan_calc_core::LoanCalcResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse `input_json`, run `calc`, and serialise the envelope back to JSON.
fn json_call<I, O>(input_json: &str, calc: impl FnOnce(&I) -> LoanCalcResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calc(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `{ principal, annual_interest_rate_percent }` → interest-only envelope.
#[napi]
pub fn interest_only_payment(input_json: String) -> NapiResult<String> {
    json_call(&input_json, interest_only::calculate_interest_only)
}

/// `{ principal, annual_interest_rate_percent, term_months }` → amortized envelope.
#[napi]
pub fn amortized_payment(input_json: String) -> NapiResult<String> {
    json_call(&input_json, amortized::calculate_amortized)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    json_call(&input_json, schedule::build_schedule)
}

#[napi]
pub fn remaining_balance(input_json: String) -> NapiResult<String> {
    json_call(&input_json, schedule::calculate_remaining_balance)
}
