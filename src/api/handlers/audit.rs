//! Audit log handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::listing::{csv_response, list_response};
use crate::api::dto::{ListQuery, QuerySchema};
use crate::app_state::AppState;
use crate::domain::{AuditLog, Resource};
use crate::error::{ConsoleError, ErrorResponse};
use crate::export;

/// Resource kinds accepted by the `type` query filter.
const AUDIT_RESOURCE_TYPES: &[&str] = &[
    "user",
    "wallet",
    "deposit",
    "withdrawal",
    "proposal",
    "staking_pool",
    "staking_position",
    "kyc",
    "sar",
    "ctr",
    "gdpr",
    "case",
    "report",
];

const AUDIT_LOGS: QuerySchema = QuerySchema {
    status: &[],
    kind: AUDIT_RESOURCE_TYPES,
    chain: &[],
};

/// `GET /audit-logs`: Audit trail.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    tag = "Audit",
    summary = "List audit logs",
    description = "Paginated audit entries, searchable by action, resource type and IP address and filterable by result.",
    params(ListQuery),
    responses(
        (status = 200, description = "Audit page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&AUDIT_LOGS);
    let page = state.service.list_audit_logs(&request.params).await?;
    Ok(Json(list_response(&page, &request, AuditLog::clone)))
}

/// `GET /audit-logs/export`: Export the filtered audit page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/export",
    tag = "Audit",
    summary = "Export audit logs",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&AUDIT_LOGS);
    let page = state.service.list_audit_logs(&request.params).await?;
    csv_response(Resource::AuditLogs, &page, &request, &export::audit_log_columns())
}

/// Audit routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/audit-logs", get(list_audit_logs))
        .route("/audit-logs/export", get(export_audit_logs))
}
