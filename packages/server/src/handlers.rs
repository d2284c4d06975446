//! HTTP handler functions for the incident stats API.

use actix_web::{HttpResponse, http::StatusCode, web};
use incident_stats_analytics::{AnalyticsError, format, tools};
use incident_stats_analytics_models::QueryKind;
use incident_stats_dataset::Dataset;
use incident_stats_server_models::{
    ApiError, ApiHealth, LimitParams, StateParams, YearParams, YearStateParams,
};
use serde::Serialize;

use crate::AppState;

/// Formats a query result, or maps its error to a status code and
/// [`ApiError`] body.
fn respond<T: Serialize>(kind: QueryKind, result: Result<Vec<T>, AnalyticsError>) -> HttpResponse {
    match result.and_then(|rows| format::to_response(kind, &rows)) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => error_response(kind, &e),
    }
}

fn error_response(kind: QueryKind, e: &AnalyticsError) -> HttpResponse {
    let status = match e {
        AnalyticsError::DatasetNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
        AnalyticsError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
        AnalyticsError::UnknownState(_)
        | AnalyticsError::UnknownMonth(_)
        | AnalyticsError::Format { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
        log::error!("Failed to run {kind}: {e}");
    } else {
        log::warn!("Rejected {kind}: {e}");
    }

    HttpResponse::build(status).json(ApiError {
        error: e.kind().to_string(),
        message: e.to_string(),
    })
}

/// `GET /health`
///
/// Always `200`; `ready` tells whether queries can be served.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let dataset = state.store.get();
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        ready: dataset.is_some(),
        records: dataset.map_or(0, Dataset::len),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /getstates`
pub async fn list_states(state: web::Data<AppState>) -> HttpResponse {
    respond(QueryKind::ListStates, tools::list_states(&state.store))
}

/// `GET /getyears`
pub async fn list_years(state: web::Data<AppState>) -> HttpResponse {
    respond(QueryKind::ListYears, tools::list_years(&state.store))
}

/// `GET /deaths/monthly?year=&state=`
pub async fn monthly_deaths(
    state: web::Data<AppState>,
    params: web::Query<YearStateParams>,
) -> HttpResponse {
    respond(
        QueryKind::MonthlyDeaths,
        tools::monthly_deaths(&state.store, params.year, &params.state),
    )
}

/// `GET /deaths/yearly?state=`
pub async fn yearly_deaths(
    state: web::Data<AppState>,
    params: web::Query<StateParams>,
) -> HttpResponse {
    respond(
        QueryKind::YearlyDeaths,
        tools::yearly_deaths(&state.store, &params.state),
    )
}

/// `GET /deaths/age-group?year=&state=`
pub async fn age_group_deaths(
    state: web::Data<AppState>,
    params: web::Query<YearStateParams>,
) -> HttpResponse {
    respond(
        QueryKind::AgeGroupDeaths,
        tools::age_group_deaths(&state.store, params.year, &params.state),
    )
}

/// `GET /deaths/police-involved?year=`
pub async fn police_involved_by_state(
    state: web::Data<AppState>,
    params: web::Query<YearParams>,
) -> HttpResponse {
    respond(
        QueryKind::PoliceInvolvedByState,
        tools::police_involved_by_state(&state.store, params.year),
    )
}

/// `GET /deaths/top-states?limit=`
///
/// `limit` defaults to 5.
pub async fn top_states_by_incidents(
    state: web::Data<AppState>,
    params: web::Query<LimitParams>,
) -> HttpResponse {
    respond(
        QueryKind::TopStatesByIncidents,
        tools::top_states_by_incidents(&state.store, params.limit),
    )
}

/// `GET /deaths/type-of-deaths?year=&state=`
pub async fn deaths_by_type(
    state: web::Data<AppState>,
    params: web::Query<YearStateParams>,
) -> HttpResponse {
    respond(
        QueryKind::DeathsByType,
        tools::deaths_by_type(&state.store, params.year, &params.state),
    )
}
