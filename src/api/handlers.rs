//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Serialize;

use super::AppState;
use super::types::{ApiError, ApiResponse, HealthResponse};
use crate::calc::{self, CalcError};
use crate::tables::standards::{self, StandardDefinition, StandardsCatalogue};

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Unwraps a JSON body, turning malformed input into a 400 envelope.
fn body<T>(
    operation: &'static str,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    payload.map(|Json(p)| p).map_err(|rejection| {
        tracing::warn!(operation, error = %rejection.body_text(), "rejected request body");
        ApiError::bad_request(rejection.body_text())
    })
}

/// Wraps a calculator outcome in the response envelope.
fn respond<T: Serialize>(
    state: &AppState,
    operation: &'static str,
    success_message: &'static str,
    outcome: Result<T, CalcError>,
) -> ApiResult<T> {
    match outcome {
        Ok(data) => {
            tracing::info!(operation, "calculation served");
            Ok(Json(ApiResponse::ok(success_message, data)))
        }
        Err(err) => {
            tracing::warn!(operation, error = %err, "calculation rejected");
            Err(ApiError::from_calc(
                &err,
                state.config.api.legacy_error_status,
            ))
        }
    }
}

/// `POST /voltage-drop`
pub async fn voltage_drop(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::CircuitParameters>, JsonRejection>,
) -> ApiResult<calc::VoltageDropResult> {
    let params = body("voltage_drop", payload)?;
    respond(
        &state,
        "voltage_drop",
        "Voltage drop calculated successfully",
        calc::calculate_voltage_drop(&params),
    )
}

/// `POST /cable-sizing`
pub async fn cable_sizing(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::CableSizingParameters>, JsonRejection>,
) -> ApiResult<calc::CableSizingResult> {
    let params = body("cable_sizing", payload)?;
    respond(
        &state,
        "cable_sizing",
        "Cable sizing calculated successfully",
        calc::calculate_cable_sizing(&params),
    )
}

/// `POST /transformer-sizing`
pub async fn transformer_sizing(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::TransformerParameters>, JsonRejection>,
) -> ApiResult<calc::TransformerSizingResult> {
    let params = body("transformer_sizing", payload)?;
    respond(
        &state,
        "transformer_sizing",
        "Transformer sizing calculated successfully",
        calc::calculate_transformer_sizing(&params),
    )
}

/// `POST /check-compliance`
pub async fn check_compliance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::ElectricalDesign>, JsonRejection>,
) -> ApiResult<calc::ComplianceReport> {
    let design = body("check_compliance", payload)?;
    respond(
        &state,
        "check_compliance",
        "Electrical compliance check completed",
        calc::check_electrical_compliance(&design),
    )
}

/// `POST /power-quality`
pub async fn power_quality(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::PowerQualityParameters>, JsonRejection>,
) -> ApiResult<calc::PowerQualityResult> {
    let params = body("power_quality", payload)?;
    respond(
        &state,
        "power_quality",
        "Power quality calculated successfully",
        calc::calculate_power_quality(&params, state.config.calculation.power_quality_seed),
    )
}

/// `POST /cable-derating`
pub async fn cable_derating(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::DeratingParameters>, JsonRejection>,
) -> ApiResult<calc::DeratedCableResult> {
    let params = body("cable_derating", payload)?;
    respond(
        &state,
        "cable_derating",
        "Derated cable selection completed",
        calc::select_derated_cable(&params),
    )
}

/// `POST /electrical-load`
pub async fn electrical_load(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<calc::LoadParameters>, JsonRejection>,
) -> ApiResult<calc::LoadEstimate> {
    let params = body("electrical_load", payload)?;
    respond(
        &state,
        "electrical_load",
        "Electrical load estimated successfully",
        calc::estimate_electrical_load(&params),
    )
}

/// `GET /standards` → every known standard keyed by code, in publication order.
pub async fn get_standards() -> Json<ApiResponse<&'static StandardsCatalogue>> {
    Json(ApiResponse::ok(
        "TNB standards retrieved successfully",
        standards::tnb_standards(),
    ))
}

/// `GET /standards/{standard_code}` → 200, or 404 for an unknown code.
pub async fn get_standard(Path(code): Path<String>) -> ApiResult<&'static StandardDefinition> {
    if code.trim().is_empty() {
        return Err(missing_code());
    }
    match standards::standard_requirements(&code) {
        Some(def) => Ok(Json(ApiResponse::ok(
            "Standard requirements retrieved successfully",
            def,
        ))),
        None => {
            tracing::info!(code = %code, "unknown standard requested");
            Err(ApiError::not_found("Standard not found"))
        }
    }
}

/// `GET /standards/` → 400.
pub async fn standard_code_missing() -> ApiError {
    missing_code()
}

fn missing_code() -> ApiError {
    ApiError::bad_request("Standard code is required")
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
