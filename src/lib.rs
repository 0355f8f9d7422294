//! # custody-console
//!
//! Admin console gateway for a custodial crypto-asset platform.
//!
//! The gateway sits between the admin front end and the platform backend.
//! It reads the backend through typed accessors, keeps an injectable query
//! cache with per-resource staleness windows, applies client-side search and
//! filters, derives display metrics, renders CSV exports, and pushes cache
//! refresh notifications over WebSocket. Every balance, tally, score and
//! state transition stays owned by the backend.
//!
//! ## Architecture
//!
//! ```text
//! Admin front end (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)       filter/  metrics/  export/
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ConsoleService (service/)  ── pollers
//!     ├── QueryCache (cache/) ──────── EventBus (domain/)
//!     │
//!     ├── BackendClient (client/)    normalize → Page<T>
//!     │
//!     └── Platform backend REST API
//! ```

pub mod api;
pub mod app_state;
pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod service;
pub mod ws;
