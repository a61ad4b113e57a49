//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::util::ServiceExt;

use transfer_ledger::api::{routes::build_router, AppState};
use transfer_ledger::auth::{Claims, JwtVerifier};
use transfer_ledger::store::{MemoryLedgerStore, MemoryUserDirectory};

pub const SECRET: &str = "integration-secret";

/// App wired to in-memory stores, with handles kept for inspection
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserDirectory>,
    pub ledger: Arc<MemoryLedgerStore>,
}

impl TestApp {
    pub fn new(users: MemoryUserDirectory, ledger: MemoryLedgerStore) -> Self {
        let users = Arc::new(users);
        let ledger = Arc::new(ledger);
        let state = AppState::new(
            users.clone(),
            ledger.clone(),
            Arc::new(JwtVerifier::new(SECRET)),
        );

        Self {
            router: build_router(state),
            users,
            ledger,
        }
    }

    /// alice = 5, bob = 9
    pub fn standard() -> Self {
        Self::new(
            MemoryUserDirectory::new()
                .with_user(5, "alice")
                .with_user(9, "bob"),
            MemoryLedgerStore::new(),
        )
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub fn io(&self) -> (usize, usize) {
        (self.users.lookups(), self.ledger.writes())
    }
}

/// Signed HS256 token for `user_id`, valid far into the future
pub fn token_for(user_id: i64) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: 4_102_444_800,
        iat: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn post_transfer(path_id: &str, caller: i64, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/transfers/user/{}", path_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token_for(caller)))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str, caller: Option<i64>) -> Request<Body> {
    let builder = Request::builder().method("GET").uri(uri);
    let builder = match caller {
        Some(id) => builder.header("authorization", format!("Bearer {}", token_for(id))),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}
