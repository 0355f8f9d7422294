//! WebSocket layer: live cache notifications.
//!
//! Clients connected to `/ws` subscribe to resources and receive a message
//! whenever a poller refreshes one of them or a mutation invalidates it.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
