//! API Integration Tests
//!
//! Full router (auth, context, logging layers) over in-memory stores.

use axum::{body::Body, http::{Request, StatusCode}};
use serde_json::{json, Value};

use transfer_ledger::store::{MemoryLedgerStore, MemoryUserDirectory};

mod common;

use common::{get, post_transfer, token_for, TestApp};

fn error(message: &str) -> Value {
    json!({ "error": message })
}

// =========================================================================
// POST /api/transfers/user/:id
// =========================================================================

#[tokio::test]
async fn test_transfer_created() {
    let app = TestApp::standard();

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": "40"}"#))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "sender": 5, "receiver": 9, "amount": 40}));
    assert_eq!(app.io(), (1, 1));
}

#[tokio::test]
async fn test_store_assigned_id_is_returned() {
    let app = TestApp::standard();
    app.send(post_transfer("9", 9, r#"{"receiver": "alice", "amount": 1}"#)).await;

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": 7}"#))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 2);
    assert_eq!(body["receiver"], 9);
}

#[tokio::test]
async fn test_path_id_not_a_number() {
    let app = TestApp::standard();

    let (status, body) = app
        .send(post_transfer("abc", 5, r#"{"receiver": "bob", "amount": 1}"#))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error("Id must be a number"));
    assert_eq!(app.io(), (0, 0));
}

#[tokio::test]
async fn test_token_for_other_user() {
    let app = TestApp::standard();

    let (status, body) = app
        .send(post_transfer("5", 9, r#"{"receiver": "bob", "amount": 1}"#))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error("Token doesn't match ID provided"));
    assert_eq!(app.io(), (0, 0));
}

#[tokio::test]
async fn test_missing_fields() {
    let app = TestApp::standard();

    let (status, body) = app.send(post_transfer("5", 5, r#"{"amount": 1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Missing receiver in request body"));

    let (status, body) = app.send(post_transfer("5", 5, r#"{"receiver": "bob"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Missing amount in request body"));

    assert_eq!(app.io(), (0, 0));
}

#[tokio::test]
async fn test_amount_not_a_number() {
    let app = TestApp::standard();

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": "forty"}"#))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Amount should be a number"));
}

#[tokio::test]
async fn test_receiver_equals_sender() {
    let app = TestApp::standard();

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "5", "amount": 1}"#))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("User and receiver cannot match"));
    assert_eq!(app.io(), (0, 0));
}

#[tokio::test]
async fn test_receiver_not_found() {
    let app = TestApp::standard();

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "carol", "amount": 1}"#))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Receiver not found"));
    assert_eq!(app.io(), (1, 0));
}

#[tokio::test]
async fn test_store_rejects_write() {
    let app = TestApp::new(
        MemoryUserDirectory::new().with_user(9, "bob"),
        MemoryLedgerStore::new().rejecting_writes(),
    );

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": 1}"#))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Transfer not completed"));
}

#[tokio::test]
async fn test_directory_fault_is_generic_500() {
    let app = TestApp::new(
        MemoryUserDirectory::new().unavailable(),
        MemoryLedgerStore::new(),
    );

    let (status, body) = app
        .send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": 1}"#))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error("Internal server error"));
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::standard();

    let (status, body) = app.send(post_transfer("5", 5, "receiver=bob")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Request body must be a JSON object"));
}

#[tokio::test]
async fn test_identical_resubmission_is_not_deduplicated() {
    let app = TestApp::standard();
    let body = r#"{"receiver": "bob", "amount": 3}"#;

    let (first, _) = app.send(post_transfer("5", 5, body)).await;
    let (second, _) = app.send(post_transfer("5", 5, body)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    assert_eq!(app.ledger.rows().len(), 2);
}

// =========================================================================
// Authentication
// =========================================================================

#[tokio::test]
async fn test_missing_token() {
    let app = TestApp::standard();
    let req = Request::builder()
        .method("POST")
        .uri("/api/transfers/user/5")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"receiver": "bob", "amount": 1}"#))
        .unwrap();

    let (status, body) = app.send(req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error("Unauthorized request"));
    assert_eq!(app.io(), (0, 0));
}

#[tokio::test]
async fn test_tampered_token() {
    let app = TestApp::standard();
    let token = format!("{}x", token_for(5));
    let req = Request::builder()
        .method("GET")
        .uri("/api/transfers/user/5")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, _) = app.send(req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =========================================================================
// Reporting
// =========================================================================

#[tokio::test]
async fn test_totals() {
    let app = TestApp::standard();

    let (status, body) = app.send(get("/api/transfers", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total": 0, "count": 0}));

    app.send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": 40}"#)).await;
    app.send(post_transfer("9", 9, r#"{"receiver": "alice", "amount": 2}"#)).await;

    let (_, body) = app.send(get("/api/transfers", None)).await;
    assert_eq!(body, json!({"total": 42, "count": 2}));
}

#[tokio::test]
async fn test_totals_overflow_is_generic_500() {
    let app = TestApp::standard();
    let body = r#"{"receiver": "bob", "amount": "9223372036854775807"}"#;

    let (first, _) = app.send(post_transfer("5", 5, body)).await;
    let (second, _) = app.send(post_transfer("5", 5, body)).await;
    assert_eq!((first, second), (StatusCode::CREATED, StatusCode::CREATED));

    let (status, body) = app.send(get("/api/transfers", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error("Internal server error"));
}

#[tokio::test]
async fn test_user_history() {
    let app = TestApp::standard();
    app.send(post_transfer("5", 5, r#"{"receiver": "bob", "amount": 40}"#)).await;
    app.send(post_transfer("9", 9, r#"{"receiver": "alice", "amount": 2}"#)).await;

    let (status, body) = app.send(get("/api/transfers/user/5", Some(5))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "sender": 5, "receiver": 9, "amount": 40},
            {"id": 2, "sender": 9, "receiver": 5, "amount": 2}
        ])
    );
}

#[tokio::test]
async fn test_history_of_someone_else() {
    let app = TestApp::standard();

    let (status, body) = app.send(get("/api/transfers/user/9", Some(5))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error("Token doesn't match ID provided"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::standard();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, _) = app.send(req).await;

    assert_eq!(status, StatusCode::OK);
}
