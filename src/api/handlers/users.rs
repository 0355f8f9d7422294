//! User account handlers: list, export, detail, status, soft delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};

use super::listing::{csv_response, list_response, require_one_of};
use crate::api::dto::{DataResponse, ListQuery, QuerySchema};
use crate::app_state::AppState;
use crate::client::users::UserStatusUpdate;
use crate::domain::{Resource, User, UserStatus, WireEnum};
use crate::error::{ConsoleError, ErrorResponse};
use crate::export;

const USERS: QuerySchema = QuerySchema {
    status: UserStatus::VARIANTS,
    kind: &[],
    chain: &[],
};

/// `GET /users`: List user accounts.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    summary = "List users",
    description = "Paginated user accounts, searchable by email and organization and filterable by status and role.",
    params(ListQuery),
    responses(
        (status = 200, description = "User page", body = serde_json::Value),
        (status = 502, description = "Backend error", body = ErrorResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&USERS);
    let page = state.service.list_users(&request.params).await?;
    Ok(Json(list_response(&page, &request, User::clone)))
}

/// `GET /users/export`: Export the filtered user page as CSV.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend or export failures.
#[utoipa::path(
    get,
    path = "/api/v1/users/export",
    tag = "Users",
    summary = "Export users",
    params(ListQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConsoleError> {
    let request = query.resolve(&USERS);
    let page = state.service.list_users(&request.params).await?;
    csv_response(Resource::Users, &page, &request, &export::user_columns())
}

/// `GET /users/{id}`: User detail.
///
/// # Errors
///
/// Returns [`ConsoleError::NotFound`] if the backend has no such user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Get user",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User record", body = serde_json::Value),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let user = state.service.get_user(&id).await?;
    Ok(Json(DataResponse {
        data: user.as_ref().clone(),
    }))
}

/// `PATCH /users/{id}/status`: Change an account's status.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidRequest`] for an unknown status.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/status",
    tag = "Users",
    summary = "Update user status",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserStatusUpdate,
    responses(
        (status = 200, description = "Backend result", body = serde_json::Value),
        (status = 400, description = "Invalid status", body = ErrorResponse),
    )
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UserStatusUpdate>,
) -> Result<impl IntoResponse, ConsoleError> {
    require_one_of("status", &update.status, UserStatus::VARIANTS)?;
    let data = state.service.update_user_status(&id, &update).await?;
    Ok(Json(DataResponse { data }))
}

/// `DELETE /users/{id}`: Soft-delete an account.
///
/// # Errors
///
/// Returns [`ConsoleError`] on backend failures.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Delete user",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    state.service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/export", get(export_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/status", patch(update_user_status))
}
