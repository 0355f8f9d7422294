//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! All console endpoints are mounted under `/api/v1`; `/health` sits at the
//! root.

pub mod docs;
pub mod dto;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the full application: REST routes, `/ws`, OpenAPI docs, and the
/// tracing and CORS layers, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let router = Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::cache::{CachePolicies, QueryCache};
    use crate::client::BackendClient;
    use crate::domain::EventBus;
    use crate::service::ConsoleService;

    fn app() -> Router {
        let Ok(client) = BackendClient::new("http://127.0.0.1:9/api/v1", None) else {
            panic!("valid url");
        };
        let event_bus = EventBus::new(8);
        let cache = Arc::new(QueryCache::new(event_bus.clone()));
        let service = Arc::new(ConsoleService::new(
            &client,
            cache,
            CachePolicies::default(),
            event_bus,
        ));
        build_app(AppState::new(service, "http://127.0.0.1:9/api/v1"))
    }

    async fn status_of(method: &str, uri: &str, body: &str) -> StatusCode {
        let Ok(request) = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("valid request");
        };
        let Ok(response) = app().oneshot(request).await;
        response.status()
    }

    #[tokio::test]
    async fn health_needs_no_backend() {
        assert_eq!(status_of("GET", "/health", "").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        assert_eq!(
            status_of("GET", "/api/v1/ledger/entries", "").await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of("GET", "/admin", "").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_bodies_are_rejected_before_the_backend() {
        assert_eq!(
            status_of("PATCH", "/api/v1/compliance/cases/c-1/status", r#"{"status":"lost"}"#).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of("POST", "/api/v1/reports", r#"{"report_type":"  "}"#).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of("POST", "/api/v1/governance/proposals/p-1/votes", r#"{"choice":"maybe"}"#)
                .await,
            StatusCode::BAD_REQUEST
        );
    }
}
