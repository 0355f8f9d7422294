//! `users` endpoint accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::User;
use crate::error::ConsoleError;

/// Body of `PATCH users/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStatusUpdate {
    /// Target status (`active`, `inactive`, `suspended`, `locked`).
    pub status: String,
    /// Free-text justification recorded in the audit trail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Accessor for platform users.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: BackendClient,
}

impl UsersApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET users`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list(&self, params: &ListParams) -> Result<Page<User>, ConsoleError> {
        self.client.get_page(&["users"], params).await
    }

    /// `GET users/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn get(&self, id: &str) -> Result<User, ConsoleError> {
        self.client.get_one(&["users", id]).await
    }

    /// `PATCH users/{id}/status`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn update_status(
        &self,
        id: &str,
        update: &UserStatusUpdate,
    ) -> Result<Value, ConsoleError> {
        let value = self.client.patch_value(&["users", id, "status"], update).await?;
        normalize_one(value)
    }

    /// `DELETE users/{id}` (soft delete on the backend).
    ///
    /// # Errors
    ///
    /// Propagates backend and transport failures.
    pub async fn soft_delete(&self, id: &str) -> Result<(), ConsoleError> {
        self.client.delete_value(&["users", id]).await?;
        Ok(())
    }
}
