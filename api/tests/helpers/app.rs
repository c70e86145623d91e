use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::{
    AttendanceSessionManager, attendance_store::AttendanceStore, card_directory::DbCardDirectory,
    roster::DbRosterResolver,
};
use std::sync::Arc;
use tower::ServiceExt;
use util::{state::AppState, ws::WebSocketManager};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Fresh in-memory database, fully migrated, behind the real router.
pub async fn make_test_app() -> TestApp {
    let db = setup_test_db().await;
    let state = AppState::new(db, WebSocketManager::new());
    TestApp {
        router: api::app(state.clone()),
        state,
    }
}

/// Same as [`make_test_app`], but sessions are persisted through `store`.
pub async fn make_test_app_with_store(store: Arc<dyn AttendanceStore>) -> TestApp {
    let db = setup_test_db().await;
    let manager = AttendanceSessionManager::new(
        Arc::new(DbRosterResolver::new(db.clone())),
        Arc::new(DbCardDirectory::new(db.clone())),
        store,
    );
    let state = AppState::with_manager(db, WebSocketManager::new(), manager);
    TestApp {
        router: api::app(state.clone()),
        state,
    }
}

/// Sends one request through the router and decodes the JSON envelope.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
