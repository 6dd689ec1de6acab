use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use loan_amortization_core::LoanResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse the JSON input, run `op`, and serialize its output back to JSON.
fn call_json<I, O>(input_json: &str, op: impl FnOnce(&I) -> LoanResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = op(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_amortization_core::amortization::schedule::generate_schedule,
    )
}

#[napi]
pub fn compare_methods(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_amortization_core::amortization::schedule::compare_methods,
    )
}

#[napi]
pub fn simulate_prepayment(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_amortization_core::amortization::prepayment::simulate_prepayment,
    )
}

// ---------------------------------------------------------------------------
// Investment and analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn project_investment(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_amortization_core::investment::projection::project_investment,
    )
}

#[napi]
pub fn compare_prepay_vs_invest(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_amortization_core::analysis::opportunity_cost::compare_prepay_vs_invest,
    )
}

// ---------------------------------------------------------------------------
// Goal seek
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_extra_payment(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_amortization_core::goal_seek::extra_payment::solve_extra_payment,
    )
}
