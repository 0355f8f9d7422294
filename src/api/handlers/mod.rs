//! REST endpoint handlers organized by console section.

pub mod audit;
pub mod blockchain;
pub mod compliance;
pub mod dashboard;
pub mod governance;
pub(crate) mod listing;
pub mod reports;
pub mod staking;
pub mod system;
pub mod users;
pub mod wallets;

use axum::Router;

use crate::app_state::AppState;

/// Composes all console routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(users::routes())
        .merge(wallets::routes())
        .merge(blockchain::routes())
        .merge(governance::routes())
        .merge(staking::routes())
        .merge(compliance::routes())
        .merge(audit::routes())
        .merge(reports::routes())
}
