//! Wallet handlers: list, export, detail, freeze, unfreeze.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::listing::{csv_response, list_response};
use crate::api::dto::{DataResponse, ListQuery, QuerySchema, WalletRow};
use crate::app_state::AppState;
use crate::client::wallets::WalletFreezeRequest;
use crate::domain::{Resource, SUPPORTED_CHAINS, WalletStatus, WalletType, WireEnum};
use crate::error::{ConsoleError, ErrorResponse};
use crate::export;

const WALLETS: QuerySchema = QuerySchema {
    status: WalletStatus::VARIANTS,
    kind: WalletType::VARIANTS,
    chain: SUPPORTED_CHAINS,
};

/// `GET /wallets`: List wallets.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/wallets",
    tag = "Wallets",
    summary = "List wallets",
    description = "Paginated wallets with utilisation, filterable by status, type, chain and currency.",
    params(ListQuery),
    responses(
        (status = 200, description = "Wallet page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_wallets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&WALLETS);
    let page = state.service.list_wallets(&request.params).await?;
    Ok(Json(list_response(&page, &request, |w| WalletRow::from(w))))
}

/// `GET /wallets/export`: Export the filtered wallet page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/wallets/export",
    tag = "Wallets",
    summary = "Export wallets",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_wallets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&WALLETS);
    let page = state.service.list_wallets(&request.params).await?;
    csv_response(Resource::Wallets, &page, &request, &export::wallet_columns())
}

/// `GET /wallets/{id}`: Wallet detail.
///
/// # Errors
///
/// Returns [`ConsoleError::NotFound`] if the backend has no such wallet.
#[utoipa::path(
    get,
    path = "/api/v1/wallets/{id}",
    tag = "Wallets",
    summary = "Get wallet",
    params(("id" = String, Path, description = "Wallet identifier")),
    responses(
        (status = 200, description = "Wallet record", body = serde_json::Value),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
    )
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let wallet = state.service.get_wallet(&id).await?;
    Ok(Json(DataResponse {
        data: WalletRow::from(wallet.as_ref()),
    }))
}

/// `POST /wallets/{id}/freeze`: Freeze a wallet.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    post,
    path = "/api/v1/wallets/{id}/freeze",
    tag = "Wallets",
    summary = "Freeze wallet",
    params(("id" = String, Path, description = "Wallet identifier")),
    request_body = WalletFreezeRequest,
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
    )
)]
pub async fn freeze_wallet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<WalletFreezeRequest>>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let data = state.service.freeze_wallet(&id, &request).await?;
    Ok(Json(DataResponse { data }))
}

/// `POST /wallets/{id}/unfreeze`: Unfreeze a wallet.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    post,
    path = "/api/v1/wallets/{id}/unfreeze",
    tag = "Wallets",
    summary = "Unfreeze wallet",
    params(("id" = String, Path, description = "Wallet identifier")),
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
    )
)]
pub async fn unfreeze_wallet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let data = state.service.unfreeze_wallet(&id).await?;
    Ok(Json(DataResponse { data }))
}

/// Wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallets", get(list_wallets))
        .route("/wallets/export", get(export_wallets))
        .route("/wallets/{id}", get(get_wallet))
        .route("/wallets/{id}/freeze", post(freeze_wallet))
        .route("/wallets/{id}/unfreeze", post(unfreeze_wallet))
}
