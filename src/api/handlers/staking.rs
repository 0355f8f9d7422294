//! Staking handlers: pools, positions, rewards.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::listing::list_response;
use crate::api::dto::{
    DataResponse, ListQuery, ListResponse, POOL_STATUSES, POSITION_STATUSES, PaginationMeta,
    PoolRow, QuerySchema,
};
use crate::app_state::AppState;
use crate::domain::{StakingPosition, StakingReward};
use crate::error::{ConsoleError, ErrorResponse};
use crate::filter::apply_filters;
use crate::metrics;

const POOLS: QuerySchema = QuerySchema {
    status: POOL_STATUSES,
    kind: &[],
    chain: &[],
};

const POSITIONS: QuerySchema = QuerySchema {
    status: POSITION_STATUSES,
    kind: &[],
    chain: &[],
};

/// `GET /staking/pools`: Pools with normalised APY.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/staking/pools",
    tag = "Staking",
    summary = "List staking pools",
    params(ListQuery),
    responses(
        (status = 200, description = "Pool page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&POOLS);
    let page = state.service.list_pools(&request.params).await?;
    let pools = apply_filters(&page.items, &request.filters);
    let radar = metrics::apy_radar(&pools);
    let data = PoolRow::rows(&pools, &radar);
    Ok(Json(ListResponse {
        pagination: PaginationMeta {
            page: request.pagination.page,
            page_size: request.pagination.page_size,
            total: page.total_or_len(),
            returned: data.len(),
        },
        data,
    }))
}

/// `POST /staking/pools/{id}/distribute`: Trigger reward distribution.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    post,
    path = "/api/v1/staking/pools/{id}/distribute",
    tag = "Staking",
    summary = "Distribute rewards",
    params(("id" = String, Path, description = "Pool identifier")),
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn distribute_rewards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let data = state.service.distribute_rewards(&id).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /staking/positions`: Staking positions.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/staking/positions",
    tag = "Staking",
    summary = "List staking positions",
    params(ListQuery),
    responses(
        (status = 200, description = "Position page", body = serde_json::Value),
    )
)]
pub async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&POSITIONS);
    let page = state.service.list_positions(&request.params).await?;
    Ok(Json(list_response(&page, &request, StakingPosition::clone)))
}

/// `POST /staking/positions/{id}/unstake`: Unstake a position.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    post,
    path = "/api/v1/staking/positions/{id}/unstake",
    tag = "Staking",
    summary = "Unstake position",
    params(("id" = String, Path, description = "Position identifier")),
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 404, description = "Position not found", body = ErrorResponse),
    )
)]
pub async fn unstake(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let data = state.service.unstake(&id).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /staking/rewards`: Distributed rewards.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/staking/rewards",
    tag = "Staking",
    summary = "List staking rewards",
    params(ListQuery),
    responses(
        (status = 200, description = "Reward page", body = serde_json::Value),
    )
)]
pub async fn list_rewards(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&QuerySchema::default());
    let page = state.service.list_rewards(&request.params).await?;
    Ok(Json(list_response(&page, &request, StakingReward::clone)))
}

/// Staking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staking/pools", get(list_pools))
        .route("/staking/pools/{id}/distribute", post(distribute_rewards))
        .route("/staking/positions", get(list_positions))
        .route("/staking/positions/{id}/unstake", post(unstake))
        .route("/staking/rewards", get(list_rewards))
}
