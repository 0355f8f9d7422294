//! Remote data accessors for the platform backend.
//!
//! [`BackendClient`] is a thin wrapper over `reqwest`: it forwards
//! parameters as a query string or JSON body, returns the parsed response,
//! and turns every non-2xx answer into [`ConsoleError::Upstream`]. It never
//! retries, backs off, or batches. Per-resource accessors build on it and
//! pass every body through the [`normalize`] boundary.

pub mod audit;
pub mod blockchain;
pub mod compliance;
pub mod governance;
pub mod normalize;
pub mod params;
pub mod reports;
pub mod staking;
pub mod users;
pub mod wallets;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;

pub use audit::AuditLogsApi;
pub use blockchain::BlockchainApi;
pub use compliance::ComplianceApi;
pub use governance::GovernanceApi;
pub use normalize::{Page, normalize_list, normalize_one};
pub use params::ListParams;
pub use reports::ReportsApi;
pub use staking::StakingApi;
pub use users::UsersApi;
pub use wallets::WalletsApi;

/// Longest backend error body that is copied into an error message.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client bound to the backend base URL.
///
/// Cheap to clone: `reqwest::Client` is internally reference counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl BackendClient {
    /// Creates a client for `base_url` with an optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if `base_url` is not an absolute URL
    /// that can carry path segments.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ConsoleError> {
        Self::with_http(Client::new(), base_url, token)
    }

    /// Creates a client from the console configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] on an invalid base URL or if the
    /// HTTP client cannot be built.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.backend_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConsoleError::Config(format!("cannot build http client: {e}")))?;
        Self::with_http(http, &config.backend_url, config.backend_token.clone())
    }

    fn with_http(http: Client, base_url: &str, token: Option<String>) -> Result<Self, ConsoleError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConsoleError::Config(format!("invalid backend url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ConsoleError::Config(format!(
                "backend url cannot be a base: {base_url}"
            )));
        }
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for `segments` below the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers taken from request
    /// paths cannot escape their position.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Internal`] if the base URL cannot carry path
    /// segments (ruled out at construction).
    pub fn url(&self, segments: &[&str]) -> Result<Url, ConsoleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConsoleError::Internal("backend url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` with query parameters, returning the raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Upstream`] on a non-2xx status,
    /// [`ConsoleError::Transport`] / [`ConsoleError::Timeout`] on network
    /// failure, and [`ConsoleError::Decode`] on a non-JSON body.
    pub async fn get_value<Q>(&self, segments: &[&str], query: &Q) -> Result<Value, ConsoleError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, segments)?.query(query);
        self.send(request).await
    }

    /// `POST` with a JSON body, returning the raw JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::get_value`].
    pub async fn post_value<B>(&self, segments: &[&str], body: &B) -> Result<Value, ConsoleError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, segments)?.json(body);
        self.send(request).await
    }

    /// `PATCH` with a JSON body, returning the raw JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::get_value`].
    pub async fn patch_value<B>(&self, segments: &[&str], body: &B) -> Result<Value, ConsoleError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PATCH, segments)?.json(body);
        self.send(request).await
    }

    /// `DELETE`, returning the raw JSON body (`null` when empty).
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::get_value`].
    pub async fn delete_value(&self, segments: &[&str]) -> Result<Value, ConsoleError> {
        let request = self.request(Method::DELETE, segments)?;
        self.send(request).await
    }

    /// `GET` a list endpoint and normalize it into a [`Page`].
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::get_value`], plus [`ConsoleError::Decode`]
    /// when the body has no recognisable list shape.
    pub async fn get_page<T, Q>(&self, segments: &[&str], query: &Q) -> Result<Page<T>, ConsoleError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let value = self.get_value(segments, query).await?;
        normalize_list(value)
    }

    /// `GET` a single entity.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::get_value`].
    pub async fn get_one<T>(&self, segments: &[&str]) -> Result<T, ConsoleError>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, segments)?;
        let value = self.send(request).await?;
        normalize_one(value)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ConsoleError> {
        let url = self.url(segments)?;
        debug!(%method, %url, "backend request");
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ConsoleError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ConsoleError::Upstream {
                status: status.as_u16(),
                message: error_message(&text, status.canonical_reason()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Extracts a human-readable message from a backend error body.
///
/// Recognises `{"message"}`, `{"error": "..."}`, `{"error": {"message"}}`
/// and `{"detail"}`; otherwise falls back to the (truncated) raw text or the
/// status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let candidates = [
            value.get("message"),
            value.get("error").and_then(|e| e.get("message")),
            value.get("error"),
            value.get("detail"),
        ];
        if let Some(msg) = candidates.into_iter().flatten().find_map(Value::as_str) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return reason.unwrap_or("unknown error").to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        let Ok(client) = BackendClient::new(base, None) else {
            panic!("valid base url");
        };
        client
    }

    #[test]
    fn url_appends_segments_to_base_path() {
        let client = client("http://backend:8080/api/v1/");
        let Ok(url) = client.url(&["blockchain", "withdrawals", "w-1", "retry"]) else {
            panic!("url should build");
        };
        assert_eq!(
            url.as_str(),
            "http://backend:8080/api/v1/blockchain/withdrawals/w-1/retry"
        );
    }

    #[test]
    fn url_encodes_path_segments() {
        let client = client("http://backend/api");
        let Ok(url) = client.url(&["users", "../admin"]) else {
            panic!("url should build");
        };
        assert_eq!(url.as_str(), "http://backend/api/users/..%2Fadmin");
    }

    #[test]
    fn relative_base_is_rejected() {
        assert!(BackendClient::new("api/v1", None).is_err());
        assert!(BackendClient::new("mailto:ops@example.com", None).is_err());
    }

    #[test]
    fn error_message_prefers_structured_fields() {
        assert_eq!(error_message(r#"{"message":"nope"}"#, None), "nope");
        assert_eq!(
            error_message(r#"{"error":{"message":"frozen"}}"#, None),
            "frozen"
        );
        assert_eq!(error_message(r#"{"error":"denied"}"#, None), "denied");
        assert_eq!(error_message("plain failure", None), "plain failure");
        assert_eq!(error_message("", Some("Bad Gateway")), "Bad Gateway");
    }
}
