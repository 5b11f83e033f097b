use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct PaymentRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
}

#[derive(Deserialize)]
struct ScheduleRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    start_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Payment and amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let request: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = mortgage_core::payment::monthly_payment(
        request.principal,
        request.annual_rate,
        request.term_years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let request: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = mortgage_core::amortization::build_schedule(
        request.principal,
        request.annual_rate,
        request.term_years,
        request.start_date,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Full calculation and affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::calculation::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::calculation::calculate_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_affordability(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::affordability::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::affordability::analyze_affordability(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
