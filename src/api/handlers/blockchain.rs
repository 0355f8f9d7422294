//! Blockchain handlers: deposits, withdrawals, retry, node health.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::listing::{csv_response, list_response};
use crate::api::dto::{
    DataResponse, DepositRow, ListQuery, NetworksResponse, QuerySchema, WithdrawalRow,
};
use crate::app_state::AppState;
use crate::domain::{
    DepositStatus, NetworkHealth, Resource, SUPPORTED_CHAINS, WireEnum, WithdrawalStatus,
};
use crate::error::{ConsoleError, ErrorResponse};
use crate::export;
use crate::filter::apply_filters;

const DEPOSITS: QuerySchema = QuerySchema {
    status: DepositStatus::VARIANTS,
    kind: &[],
    chain: SUPPORTED_CHAINS,
};

const WITHDRAWALS: QuerySchema = QuerySchema {
    status: WithdrawalStatus::VARIANTS,
    kind: &[],
    chain: SUPPORTED_CHAINS,
};

const NETWORKS: QuerySchema = QuerySchema {
    status: NetworkHealth::VARIANTS,
    kind: &[],
    chain: SUPPORTED_CHAINS,
};

/// `GET /blockchain/deposits`: Detected deposits with confirmation progress.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/blockchain/deposits",
    tag = "Blockchain",
    summary = "List deposits",
    params(ListQuery),
    responses(
        (status = 200, description = "Deposit page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_deposits(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&DEPOSITS);
    let page = state.service.list_deposits(&request.params).await?;
    Ok(Json(list_response(&page, &request, |d| DepositRow::from(d))))
}

/// `GET /blockchain/deposits/export`: Export the filtered deposit page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/blockchain/deposits/export",
    tag = "Blockchain",
    summary = "Export deposits",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_deposits(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&DEPOSITS);
    let page = state.service.list_deposits(&request.params).await?;
    csv_response(Resource::Deposits, &page, &request, &export::deposit_columns())
}

/// `GET /blockchain/withdrawals`: Broadcast withdrawals with retry availability.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/blockchain/withdrawals",
    tag = "Blockchain",
    summary = "List withdrawals",
    params(ListQuery),
    responses(
        (status = 200, description = "Withdrawal page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_withdrawals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&WITHDRAWALS);
    let page = state.service.list_withdrawals(&request.params).await?;
    Ok(Json(list_response(&page, &request, |w| WithdrawalRow::from(w))))
}

/// `GET /blockchain/withdrawals/export`: Export the filtered withdrawal page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/blockchain/withdrawals/export",
    tag = "Blockchain",
    summary = "Export withdrawals",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_withdrawals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&WITHDRAWALS);
    let page = state.service.list_withdrawals(&request.params).await?;
    csv_response(
        Resource::Withdrawals,
        &page,
        &request,
        &export::withdrawal_columns(),
    )
}

/// `POST /blockchain/withdrawals/{id}/retry`: Re-broadcast a failed withdrawal.
///
/// # Errors
///
/// Returns [`ConsoleError::Conflict`] when the withdrawal is known not to
/// be `failed`.
#[utoipa::path(
    post,
    path = "/api/v1/blockchain/withdrawals/{id}/retry",
    tag = "Blockchain",
    summary = "Retry withdrawal",
    params(("id" = String, Path, description = "Withdrawal identifier")),
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 409, description = "Withdrawal is not failed", body = ErrorResponse),
    )
)]
pub async fn retry_withdrawal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let data = state.service.retry_withdrawal(&id).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /blockchain/networks`: Node health per chain.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/blockchain/networks",
    tag = "Blockchain",
    summary = "Node health",
    params(ListQuery),
    responses(
        (status = 200, description = "Per-chain status with aggregate counts", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_networks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&NETWORKS);
    let page = state.service.list_networks().await?;
    Ok(Json(NetworksResponse::new(apply_filters(
        &page.items,
        &request.filters,
    ))))
}

/// Blockchain routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/blockchain/deposits", get(list_deposits))
        .route("/blockchain/deposits/export", get(export_deposits))
        .route("/blockchain/withdrawals", get(list_withdrawals))
        .route("/blockchain/withdrawals/export", get(export_withdrawals))
        .route("/blockchain/withdrawals/{id}/retry", post(retry_withdrawal))
        .route("/blockchain/networks", get(list_networks))
}
