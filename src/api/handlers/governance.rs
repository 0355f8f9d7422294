//! Governance handlers: proposals, votes, delegations.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::listing::{list_response, require_one_of};
use crate::api::dto::{DataResponse, ListQuery, PROPOSAL_STATUSES, ProposalRow, QuerySchema};
use crate::app_state::AppState;
use crate::client::governance::CastVoteRequest;
use crate::domain::{Delegation, Vote, VoteChoice, WireEnum};
use crate::error::{ConsoleError, ErrorResponse};

const PROPOSALS: QuerySchema = QuerySchema {
    status: PROPOSAL_STATUSES,
    kind: &[],
    chain: &[],
};

/// `GET /governance/proposals`: Proposals with vote shares.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/governance/proposals",
    tag = "Governance",
    summary = "List proposals",
    params(ListQuery),
    responses(
        (status = 200, description = "Proposal page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_proposals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&PROPOSALS);
    let page = state.service.list_proposals(&request.params).await?;
    Ok(Json(list_response(&page, &request, |p| ProposalRow::from(p))))
}

/// `GET /governance/proposals/{id}`: Proposal detail.
///
/// # Errors
///
/// Returns [`ConsoleError::NotFound`] if the backend has no such proposal.
#[utoipa::path(
    get,
    path = "/api/v1/governance/proposals/{id}",
    tag = "Governance",
    summary = "Get proposal",
    params(("id" = String, Path, description = "Proposal identifier")),
    responses(
        (status = 200, description = "Proposal with vote shares", body = serde_json::Value),
        (status = 404, description = "Proposal not found", body = ErrorResponse),
    )
)]
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let proposal = state.service.get_proposal(&id).await?;
    Ok(Json(DataResponse {
        data: ProposalRow::from(proposal.as_ref()),
    }))
}

/// `GET /governance/proposals/{id}/votes`: Votes cast on a proposal.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/governance/proposals/{id}/votes",
    tag = "Governance",
    summary = "List votes",
    params(("id" = String, Path, description = "Proposal identifier"), ListQuery),
    responses(
        (status = 200, description = "Vote page", body = serde_json::Value),
    )
)]
pub async fn list_votes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&QuerySchema::default());
    let page = state.service.list_votes(&id, &request.params).await?;
    Ok(Json(list_response(&page, &request, Vote::clone)))
}

/// `POST /governance/proposals/{id}/votes`: Cast a vote.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidRequest`] for an unknown choice.
#[utoipa::path(
    post,
    path = "/api/v1/governance/proposals/{id}/votes",
    tag = "Governance",
    summary = "Cast vote",
    params(("id" = String, Path, description = "Proposal identifier")),
    request_body = CastVoteRequest,
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 400, description = "Invalid choice", body = ErrorResponse),
    )
)]
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    require_one_of("choice", &request.choice, VoteChoice::VARIANTS)?;
    let data = state.service.cast_vote(&id, &request).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /governance/delegations`: Voting power delegations.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/governance/delegations",
    tag = "Governance",
    summary = "List delegations",
    params(ListQuery),
    responses(
        (status = 200, description = "Delegation page", body = serde_json::Value),
    )
)]
pub async fn list_delegations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&QuerySchema::default());
    let page = state.service.list_delegations(&request.params).await?;
    Ok(Json(list_response(&page, &request, Delegation::clone)))
}

/// Governance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/governance/proposals", get(list_proposals))
        .route("/governance/proposals/{id}", get(get_proposal))
        .route(
            "/governance/proposals/{id}/votes",
            get(list_votes).post(cast_vote),
        )
        .route("/governance/delegations", get(list_delegations))
}
