//! End-to-end tests of the REST surface against an in-process fake backend.

#![allow(clippy::panic)]

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::Hits;

fn rows(body: &Value) -> Vec<Value> {
    body.get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn ids(body: &Value) -> Vec<String> {
    rows(body)
        .iter()
        .filter_map(|row| row.get("id").and_then(Value::as_str).map(str::to_string))
        .collect()
}

#[tokio::test]
async fn health_reports_backend() {
    let harness = common::start().await;
    let (status, body) = harness.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status"), Some(&json!("healthy")));
}

#[tokio::test]
async fn users_search_and_status_filter_combine() {
    let harness = common::start().await;
    let (status, body) = harness
        .get_json("/api/v1/users?search=ACME&status=active")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["u-1".to_string(), "u-3".to_string()]);
    assert_eq!(
        body.get("pagination"),
        Some(&json!({"page": 1, "page_size": 20, "total": 3, "returned": 2}))
    );
}

#[tokio::test]
async fn invalid_query_values_fall_back_to_defaults() {
    let harness = common::start().await;
    let (status, body) = harness
        .get_json("/api/v1/users?page=abc&pageSize=-4&status=exploded")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 3);
    let pagination = body.get("pagination").cloned().unwrap_or_default();
    assert_eq!(pagination.get("page"), Some(&json!(1)));
    assert_eq!(pagination.get("page_size"), Some(&json!(20)));
}

#[tokio::test]
async fn reads_are_cached_until_a_mutation_invalidates() {
    let harness = common::start().await;

    let _ = harness.get_json("/api/v1/users").await;
    let _ = harness.get_json("/api/v1/users").await;
    assert_eq!(Hits::get(&harness.hits.user_lists), 1);

    let response = tokio_test::assert_ok!(
        harness
            .http
            .patch(harness.url("/api/v1/users/u-2/status"))
            .json(&json!({"status": "active", "reason": "appeal accepted"}))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Hits::get(&harness.hits.status_updates), 1);

    let _ = harness.get_json("/api/v1/users").await;
    assert_eq!(Hits::get(&harness.hits.user_lists), 2);
}

#[tokio::test]
async fn unknown_user_status_is_rejected_locally() {
    let harness = common::start().await;
    let response = tokio_test::assert_ok!(
        harness
            .http
            .patch(harness.url("/api/v1/users/u-1/status"))
            .json(&json!({"status": "banished"}))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(Hits::get(&harness.hits.status_updates), 0);
}

#[tokio::test]
async fn withdrawal_rows_carry_retry_flag() {
    let harness = common::start().await;
    let (_, body) = harness.get_json("/api/v1/blockchain/withdrawals").await;
    let flags: Vec<(String, bool)> = rows(&body)
        .iter()
        .filter_map(|row| {
            Some((
                row.get("id")?.as_str()?.to_string(),
                row.get("can_retry")?.as_bool()?,
            ))
        })
        .collect();
    assert_eq!(
        flags,
        vec![("w-1".to_string(), true), ("w-2".to_string(), false)]
    );
}

#[tokio::test]
async fn retry_is_gated_on_failed_status() {
    let harness = common::start().await;
    let _ = harness.get_json("/api/v1/blockchain/withdrawals").await;

    let response = tokio_test::assert_ok!(
        harness
            .http
            .post(harness.url("/api/v1/blockchain/withdrawals/w-2/retry"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(Hits::get(&harness.hits.retries), 0);

    let response = tokio_test::assert_ok!(
        harness
            .http
            .post(harness.url("/api/v1/blockchain/withdrawals/w-1/retry"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Hits::get(&harness.hits.retries), 1);
}

#[tokio::test]
async fn audit_export_is_a_quoted_csv_attachment() {
    let harness = common::start().await;
    let response = tokio_test::assert_ok!(
        harness
            .http
            .get(harness.url("/api/v1/audit-logs/export"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::OK);
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_default()
    };
    assert_eq!(header("content-type"), "text/csv; charset=utf-8");
    assert!(header("content-disposition").starts_with("attachment; filename=\"audit-logs-"));

    let body = tokio_test::assert_ok!(response.text().await);
    assert!(body.starts_with(
        "\"Timestamp\",\"User ID\",\"Action\",\"Resource Type\",\"Resource ID\",\"Result\",\"IP Address\"\n"
    ));
    assert!(body.contains(
        "\"2024-01-15T10:30:00Z\",\"u-1\",\"login\",\"session\",\"s-1\",\"success\",\"10.0.0.1\"\n"
    ));

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let actions: Vec<String> = reader
        .records()
        .filter_map(Result::ok)
        .filter_map(|record| record.get(2).map(str::to_string))
        .collect();
    assert_eq!(
        actions,
        vec!["login".to_string(), "note, \"flagged\"".to_string()]
    );
}

#[tokio::test]
async fn audit_search_matches_ip_address() {
    let harness = common::start().await;
    let (_, body) = harness.get_json("/api/v1/audit-logs?search=10.0.0.2").await;
    assert_eq!(ids(&body), vec!["a-2".to_string()]);
}

#[tokio::test]
async fn networks_include_health_summary() {
    let harness = common::start().await;
    let (status, body) = harness.get_json("/api/v1/blockchain/networks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.get("summary"),
        Some(&json!({"healthy": 1, "degraded": 0, "down": 1, "total": 2}))
    );
    assert_eq!(body.get("healthy_percent"), Some(&json!(50.0)));
}

#[tokio::test]
async fn backend_not_found_is_mirrored() {
    let harness = common::start().await;
    let (status, body) = harness.get_json("/api/v1/wallets/w-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    assert!(message.contains("wallet not found"));
}

#[tokio::test]
async fn dashboard_folds_every_source() {
    let harness = common::start().await;
    let (status, body) = harness.get_json("/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let data = body.get("data").cloned().unwrap_or_default();
    assert_eq!(data.pointer("/users/total"), Some(&json!(3)));
    assert_eq!(data.pointer("/users/restricted"), Some(&json!(1)));
    assert_eq!(data.pointer("/withdrawals/failed"), Some(&json!(1)));
    assert_eq!(data.pointer("/networks/down"), Some(&json!(1)));
    assert_eq!(data.get("needs_attention"), Some(&json!(true)));
}
