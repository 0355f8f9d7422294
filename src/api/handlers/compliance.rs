//! Compliance handlers: KYC, SAR, CTR, GDPR, and case management.
//!
//! Every row carries its deadline flag computed against the gateway clock
//! at request time.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;

use super::listing::{csv_response, list_response, require_one_of};
use crate::api::dto::{DataResponse, DeadlineRow, KycRow, ListQuery, QuerySchema};
use crate::app_state::AppState;
use crate::client::compliance::CaseStatusUpdate;
use crate::domain::{
    CaseStatus, CtrStatus, GdprStatus, KycStatus, Resource, SarStatus, WireEnum,
};
use crate::error::{ConsoleError, ErrorResponse};
use crate::export;

/// GDPR request kinds accepted by the `type` query filter.
const GDPR_REQUEST_TYPES: &[&str] = &[
    "access",
    "erasure",
    "rectification",
    "portability",
    "restriction",
];

const KYC: QuerySchema = QuerySchema {
    status: KycStatus::VARIANTS,
    kind: &[],
    chain: &[],
};

const SAR: QuerySchema = QuerySchema {
    status: SarStatus::VARIANTS,
    kind: &[],
    chain: &[],
};

const CTR: QuerySchema = QuerySchema {
    status: CtrStatus::VARIANTS,
    kind: &[],
    chain: &[],
};

const GDPR: QuerySchema = QuerySchema {
    status: GdprStatus::VARIANTS,
    kind: GDPR_REQUEST_TYPES,
    chain: &[],
};

const CASES: QuerySchema = QuerySchema {
    status: CaseStatus::VARIANTS,
    kind: &[],
    chain: &[],
};

/// `GET /compliance/kyc`: KYC verifications with expiry flags.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/kyc",
    tag = "Compliance",
    summary = "List KYC verifications",
    params(ListQuery),
    responses(
        (status = 200, description = "KYC page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_kyc(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&KYC);
    let page = state.service.list_kyc(&request.params).await?;
    let now = Utc::now();
    Ok(Json(list_response(&page, &request, |k| KycRow::new(k, now))))
}

/// `GET /compliance/kyc/export`: Export the filtered KYC page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/kyc/export",
    tag = "Compliance",
    summary = "Export KYC verifications",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_kyc(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&KYC);
    let page = state.service.list_kyc(&request.params).await?;
    csv_response(Resource::Kyc, &page, &request, &export::kyc_columns())
}

/// `GET /compliance/sar`: Suspicious activity reports with overdue flags.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/sar",
    tag = "Compliance",
    summary = "List SARs",
    params(ListQuery),
    responses(
        (status = 200, description = "SAR page", body = serde_json::Value),
    )
)]
pub async fn list_sar(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&SAR);
    let page = state.service.list_sar(&request.params).await?;
    let now = Utc::now();
    Ok(Json(list_response(&page, &request, |s| DeadlineRow::sar(s, now))))
}

/// `GET /compliance/sar/export`: Export the filtered SAR page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/sar/export",
    tag = "Compliance",
    summary = "Export SARs",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_sar(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&SAR);
    let page = state.service.list_sar(&request.params).await?;
    csv_response(Resource::Sar, &page, &request, &export::sar_columns())
}

/// `POST /compliance/sar/{id}/file`: File a SAR with the regulator.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    post,
    path = "/api/v1/compliance/sar/{id}/file",
    tag = "Compliance",
    summary = "File SAR",
    params(("id" = String, Path, description = "SAR identifier")),
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 404, description = "SAR not found", body = ErrorResponse),
    )
)]
pub async fn file_sar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let data = state.service.file_sar(&id).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /compliance/ctr`: Currency transaction reports with overdue flags.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/ctr",
    tag = "Compliance",
    summary = "List CTRs",
    params(ListQuery),
    responses(
        (status = 200, description = "CTR page", body = serde_json::Value),
    )
)]
pub async fn list_ctr(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&CTR);
    let page = state.service.list_ctr(&request.params).await?;
    let now = Utc::now();
    Ok(Json(list_response(&page, &request, |c| DeadlineRow::ctr(c, now))))
}

/// `GET /compliance/gdpr`: GDPR data requests with overdue flags.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/gdpr",
    tag = "Compliance",
    summary = "List GDPR requests",
    params(ListQuery),
    responses(
        (status = 200, description = "GDPR page", body = serde_json::Value),
    )
)]
pub async fn list_gdpr(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&GDPR);
    let page = state.service.list_gdpr(&request.params).await?;
    let now = Utc::now();
    Ok(Json(list_response(&page, &request, |g| DeadlineRow::gdpr(g, now))))
}

/// `POST /compliance/gdpr/{id}/complete`: Mark a GDPR request completed.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    post,
    path = "/api/v1/compliance/gdpr/{id}/complete",
    tag = "Compliance",
    summary = "Complete GDPR request",
    params(("id" = String, Path, description = "GDPR request identifier")),
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 404, description = "Request not found", body = ErrorResponse),
    )
)]
pub async fn complete_gdpr(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let data = state.service.complete_gdpr(&id).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /compliance/cases`: Compliance cases with overdue flags.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/cases",
    tag = "Compliance",
    summary = "List compliance cases",
    params(ListQuery),
    responses(
        (status = 200, description = "Case page", body = serde_json::Value),
    )
)]
pub async fn list_cases(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&CASES);
    let page = state.service.list_cases(&request.params).await?;
    let now = Utc::now();
    Ok(Json(list_response(&page, &request, |c| DeadlineRow::case(c, now))))
}

/// `PATCH /compliance/cases/{id}/status`: Move a case through its workflow.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidRequest`] for an unknown status.
#[utoipa::path(
    patch,
    path = "/api/v1/compliance/cases/{id}/status",
    tag = "Compliance",
    summary = "Update case status",
    params(("id" = String, Path, description = "Case identifier")),
    request_body = CaseStatusUpdate,
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 400, description = "Invalid status", body = ErrorResponse),
    )
)]
pub async fn update_case_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CaseStatusUpdate>,
) -> Result<impl IntoResponse, ConsoleError> {
    require_one_of("status", &update.status, CaseStatus::VARIANTS)?;
    let data = state.service.update_case_status(&id, &update).await?;
    Ok(Json(DataResponse { data }))
}

/// Compliance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/compliance/kyc", get(list_kyc))
        .route("/compliance/kyc/export", get(export_kyc))
        .route("/compliance/sar", get(list_sar))
        .route("/compliance/sar/export", get(export_sar))
        .route("/compliance/sar/{id}/file", post(file_sar))
        .route("/compliance/ctr", get(list_ctr))
        .route("/compliance/gdpr", get(list_gdpr))
        .route("/compliance/gdpr/{id}/complete", post(complete_gdpr))
        .route("/compliance/cases", get(list_cases))
        .route("/compliance/cases/{id}/status", patch(update_case_status))
}
