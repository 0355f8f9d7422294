//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding matching cache events.

use std::str::FromStr;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{CacheEvent, Resource};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers each one.
/// - Forwards events from the [`broadcast::Receiver`] whose resource the
///   client subscribed to.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<CacheEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs);
                        if ws_tx.send(Message::text(reply.to_json())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        if subs.matches(event.resource()) {
                            let json = WsMessage::event(&event).to_json();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Resource names split into recognised resources, the wildcard flag, and
/// the names that matched nothing.
fn parse_resources(names: &[String]) -> (Vec<Resource>, bool, Vec<String>) {
    let mut resources = Vec::new();
    let mut wildcard = false;
    let mut rejected = Vec::new();
    for name in names {
        if name == "*" {
            wildcard = true;
        } else if let Ok(resource) = Resource::from_str(name) {
            resources.push(resource);
        } else {
            rejected.push(name.clone());
        }
    }
    (resources, wildcard, rejected)
}

/// Handles a text frame from the client and builds the reply.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }
    let command = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(command) => command,
        Err(e) => return WsMessage::error(msg.id, 404, format!("unknown command: {e}")),
    };

    match command {
        WsCommand::Subscribe { resources } => {
            let (resources, wildcard, rejected) = parse_resources(&resources);
            subs.subscribe(&resources, wildcard);
            WsMessage::response(
                msg.id,
                serde_json::json!({
                    "subscribed": resources,
                    "rejected": rejected,
                    "active": subs.resources(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { resources } => {
            let (resources, wildcard, rejected) = parse_resources(&resources);
            subs.unsubscribe(&resources, wildcard);
            WsMessage::response(
                msg.id,
                serde_json::json!({
                    "unsubscribed": resources,
                    "rejected": rejected,
                    "active": subs.resources(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
    }
}
