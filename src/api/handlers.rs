//! HTTP request handlers for the Salary Engine API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router that mounts them under `/api/v1`.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_salary;
use crate::models::{
    CalculationRequest, CalculationResult, NewTaxExemption, NewTaxRate, TaxExemption,
    TaxExemptionUpdate, TaxRate, TaxRateUpdate,
};

use super::request::TaxListQuery;
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Text served at `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to Salary API! Endpoints are served under /api/v1.";

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/salary/calculate", post(calculate_handler))
        .route("/taxes", post(create_tax_rate).get(list_tax_rates))
        .route(
            "/taxes/:id",
            get(get_tax_rate).put(update_tax_rate).delete(delete_tax_rate),
        )
        .route("/taxes/code/:code", get(get_tax_rate_by_code))
        .route("/exemptions", post(create_exemption).get(list_exemptions))
        .route(
            "/exemptions/:id",
            get(get_exemption)
                .put(update_exemption)
                .delete(delete_exemption),
        )
        .route("/exemptions/code/:code", get(get_exemption_by_code));

    Router::new()
        .route("/", get(welcome_handler))
        .nest("/api/v1", api)
        .with_state(state)
}

async fn welcome_handler() -> &'static str {
    WELCOME_MESSAGE
}

/// Handler for POST /api/v1/salary/calculate.
///
/// Reads the calculation parameters from the query string and returns the
/// salary breakdown computed against the current rates and exemptions.
async fn calculate_handler(
    State(state): State<AppState>,
    query: Result<Query<CalculationRequest>, QueryRejection>,
) -> ApiResult<Json<CalculationResult>> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let Query(request) = query?;

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Calculation request rejected"
        );
        return Err(err.into());
    }

    let start_time = Instant::now();
    let result = {
        let session = state.store().read().await;
        calculate_salary(&session, &request)
    };
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        gross_salary = %result.gross_salary,
        net_salary = %result.net_salary,
        total_salary = %result.total_salary,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );
    Ok(Json(result))
}

async fn create_tax_rate(
    State(state): State<AppState>,
    payload: Result<Json<NewTaxRate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaxRate>)> {
    let Json(new) = payload?;
    let rate = state.store().write().await.create_rate(new)?;
    info!(id = rate.id, code = %rate.code, "Tax rate created");
    Ok((StatusCode::CREATED, Json(rate)))
}

async fn list_tax_rates(
    State(state): State<AppState>,
    query: Result<Query<TaxListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TaxRate>>> {
    let Query(query) = query?;
    let rates = state.store().read().await.list_rates(query.tax_type);
    Ok(Json(rates))
}

async fn get_tax_rate(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TaxRate>> {
    let Path(id) = id?;
    let session = state.store().read().await;
    Ok(Json(session.rate(id)?.clone()))
}

async fn get_tax_rate_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<TaxRate>> {
    let session = state.store().read().await;
    Ok(Json(session.rate_with_code(&code)?.clone()))
}

async fn update_tax_rate(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaxRateUpdate>, JsonRejection>,
) -> ApiResult<Json<TaxRate>> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let rate = state.store().write().await.update_rate(id, update)?;
    info!(id = rate.id, code = %rate.code, "Tax rate updated");
    Ok(Json(rate))
}

async fn delete_tax_rate(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.store().write().await.delete_rate(id)?;
    info!(id, "Tax rate deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn create_exemption(
    State(state): State<AppState>,
    payload: Result<Json<NewTaxExemption>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaxExemption>)> {
    let Json(new) = payload?;
    let exemption = state.store().write().await.create_exemption(new)?;
    info!(id = exemption.id, code = %exemption.code, "Tax exemption created");
    Ok((StatusCode::CREATED, Json(exemption)))
}

async fn list_exemptions(State(state): State<AppState>) -> Json<Vec<TaxExemption>> {
    Json(state.store().read().await.list_exemptions())
}

async fn get_exemption(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TaxExemption>> {
    let Path(id) = id?;
    let session = state.store().read().await;
    Ok(Json(session.exemption(id)?.clone()))
}

async fn get_exemption_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<TaxExemption>> {
    let session = state.store().read().await;
    Ok(Json(session.exemption_with_code(&code)?.clone()))
}

async fn update_exemption(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaxExemptionUpdate>, JsonRejection>,
) -> ApiResult<Json<TaxExemption>> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let exemption = state.store().write().await.update_exemption(id, update)?;
    info!(id = exemption.id, code = %exemption.code, "Tax exemption updated");
    Ok(Json(exemption))
}

async fn delete_exemption(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.store().write().await.delete_exemption(id)?;
    info!(id, "Tax exemption deleted");
    Ok(StatusCode::NO_CONTENT)
}
