//! Shared helpers for API integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use bookwell_api::api::{create_router, AppContext};
use bookwell_api::store::{catalog, memberships, Store};
use bookwell_common::db::models::{Community, Local, Plan, Professional, User};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// A router bound to a throwaway database.
pub struct TestServer {
    pub app: axum::Router,
    pub store: Store,
    _dir: tempfile::TempDir,
}

pub async fn setup_test_server() -> TestServer {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = bookwell_common::db::init_database(&dir.path().join("test.db"))
        .await
        .expect("Failed to initialize test database");
    let store = Store::new(pool);
    let app = create_router(AppContext::new(store.clone()));

    TestServer {
        app,
        store,
        _dir: dir,
    }
}

/// Make an HTTP request against the in-process router.
pub async fn make_request(
    app: &axum::Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Option<Value>) {
    let method = match method {
        "GET" => Method::GET,
        "POST" => Method::POST,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        other => panic!("Unsupported method: {other}"),
    };

    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };

    (status, json_body)
}

// ============================================================================
// Seed helpers (catalog entities are out of the API surface)
// ============================================================================

pub async fn seed_professional(store: &Store) -> Uuid {
    let professional = Professional {
        id: Uuid::new_v4(),
        name: "Test Professional".to_string(),
        specialty: Some("Yoga".to_string()),
        email: None,
    };
    let mut conn = store.acquire().await.unwrap();
    catalog::insert_professional(&mut conn, &professional)
        .await
        .unwrap();
    professional.id
}

pub async fn seed_local(store: &Store) -> Uuid {
    let local = Local {
        id: Uuid::new_v4(),
        name: "Studio A".to_string(),
        address: Some("123 Main St".to_string()),
        capacity: Some(30),
    };
    let mut conn = store.acquire().await.unwrap();
    catalog::insert_local(&mut conn, &local).await.unwrap();
    local.id
}

pub async fn seed_user(store: &Store) -> Uuid {
    let user = User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", Uuid::new_v4()),
        name: "Test User".to_string(),
    };
    let mut conn = store.acquire().await.unwrap();
    catalog::insert_user(&mut conn, &user).await.unwrap();
    user.id
}

pub async fn seed_community(store: &Store) -> Uuid {
    let community = Community {
        id: Uuid::new_v4(),
        name: "Wellness Club".to_string(),
    };
    let mut conn = store.acquire().await.unwrap();
    catalog::insert_community(&mut conn, &community).await.unwrap();
    community.id
}

pub async fn seed_plan(store: &Store) -> Uuid {
    let plan = Plan {
        id: Uuid::new_v4(),
        name: "Monthly".to_string(),
        fee: 49.0,
    };
    let mut conn = store.acquire().await.unwrap();
    catalog::insert_plan(&mut conn, &plan).await.unwrap();
    plan.id
}

pub async fn membership_count(store: &Store) -> i64 {
    let mut conn = store.acquire().await.unwrap();
    memberships::count_memberships(&mut conn).await.unwrap()
}
