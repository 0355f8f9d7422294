//! Service layer: cached reads, mutations, and background polling.
//!
//! [`ConsoleService`] composes the backend accessors with the
//! [`crate::cache::QueryCache`] and invalidates cache entries after
//! successful mutations. [`poller`] keeps polled widgets fresh.

pub mod console_service;
pub mod dashboard;
pub mod poller;

pub use console_service::{ConsoleService, OVERVIEW_LIMIT, overview_params};
pub use dashboard::DashboardSummary;
pub use poller::spawn_pollers;
