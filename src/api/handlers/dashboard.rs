//! Dashboard overview handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::DataResponse;
use crate::app_state::AppState;
use crate::error::{ConsoleError, ErrorResponse};
use crate::service::DashboardSummary;

/// `GET /dashboard`: Aggregated console overview.
///
/// # Errors
///
/// Returns [`ConsoleError`] if any source read fails.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Console overview",
    description = "Counts and attention flags folded from users, wallets, deposits, withdrawals, node health, proposals and compliance records.",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ConsoleError> {
    let summary = state.service.dashboard().await?;
    Ok(Json(DataResponse {
        data: summary.as_ref().clone(),
    }))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}
