//! Report handlers: list and request generation.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::listing::list_response;
use crate::api::dto::{DataResponse, ListQuery, QuerySchema};
use crate::app_state::AppState;
use crate::client::reports::GenerateReportRequest;
use crate::domain::Report;
use crate::error::{ConsoleError, ErrorResponse};

const REPORT_STATUSES: &[&str] = &["queued", "running", "completed", "failed"];

const REPORT_TYPES: &[&str] = &["transactions", "balances", "compliance", "staking", "audit"];

const REPORTS: QuerySchema = QuerySchema {
    status: REPORT_STATUSES,
    kind: REPORT_TYPES,
    chain: &[],
};

/// `GET /reports`: Generated reports.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    summary = "List reports",
    params(ListQuery),
    responses(
        (status = 200, description = "Report page", body = serde_json::Value),
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&REPORTS);
    let page = state.service.list_reports(&request.params).await?;
    Ok(Json(list_response(&page, &request, Report::clone)))
}

/// `POST /reports`: Ask the backend to generate a report.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidRequest`] when `report_type` is blank.
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "Reports",
    summary = "Generate report",
    request_body = GenerateReportRequest,
    responses(
        (status = 202, description = "Report queued", body = serde_json::Value),
        (status = 400, description = "Missing report type", body = ErrorResponse),
    )
)]
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    if request.report_type.trim().is_empty() {
        return Err(ConsoleError::InvalidRequest(
            "report_type must not be empty".to_string(),
        ));
    }
    let data = state.service.generate_report(&request).await?;
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data })))
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports", get(list_reports).post(generate_report))
}
