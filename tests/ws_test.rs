//! WebSocket subscription flow: subscribe, then receive the invalidation
//! published by a mutation.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

type Socket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let Ok(Some(frame)) = tokio::time::timeout(Duration::from_secs(5), socket.next()).await
        else {
            panic!("no frame within timeout");
        };
        let Ok(Message::Text(text)) = frame else {
            continue;
        };
        let Ok(value) = serde_json::from_str::<Value>(text.as_str()) else {
            panic!("server sent invalid JSON: {}", text.as_str());
        };
        return value;
    }
}

async fn connect(harness: &common::Harness) -> Socket {
    let url = format!("ws://{}/ws", harness.gateway);
    let Ok((socket, _)) = connect_async(url.as_str()).await else {
        panic!("cannot connect to {url}");
    };
    socket
}

#[tokio::test]
async fn subscriber_receives_invalidation_after_retry() {
    let harness = common::start().await;
    let mut socket = connect(&harness).await;

    let subscribe = json!({
        "id": "sub-1",
        "type": "command",
        "payload": {"command": "subscribe", "resources": ["withdrawals", "bogus"]}
    });
    let Ok(()) = socket.send(Message::text(subscribe.to_string())).await else {
        panic!("send failed");
    };
    let reply = next_json(&mut socket).await;
    assert_eq!(reply.get("type"), Some(&json!("response")));
    assert_eq!(reply.get("id"), Some(&json!("sub-1")));
    assert_eq!(reply.pointer("/payload/subscribed"), Some(&json!(["withdrawals"])));
    assert_eq!(reply.pointer("/payload/rejected"), Some(&json!(["bogus"])));

    let _ = harness.get_json("/api/v1/blockchain/withdrawals").await;
    let response = tokio_test::assert_ok!(
        harness
            .http
            .post(harness.url("/api/v1/blockchain/withdrawals/w-1/retry"))
            .send()
            .await
    );
    assert!(response.status().is_success());

    let event = next_json(&mut socket).await;
    assert_eq!(event.get("type"), Some(&json!("event")));
    assert_eq!(event.pointer("/payload/event_type"), Some(&json!("invalidated")));
    assert_eq!(event.pointer("/payload/resource"), Some(&json!("withdrawals")));
}

#[tokio::test]
async fn malformed_frames_get_error_replies() {
    let harness = common::start().await;
    let mut socket = connect(&harness).await;

    let Ok(()) = socket.send(Message::text("not json")).await else {
        panic!("send failed");
    };
    let reply = next_json(&mut socket).await;
    assert_eq!(reply.get("type"), Some(&json!("error")));
    assert_eq!(reply.pointer("/payload/code"), Some(&json!(400)));

    let unknown = json!({"id": "x", "type": "command", "payload": {"command": "explode"}});
    let Ok(()) = socket.send(Message::text(unknown.to_string())).await else {
        panic!("send failed");
    };
    let reply = next_json(&mut socket).await;
    assert_eq!(reply.pointer("/payload/code"), Some(&json!(404)));
}
