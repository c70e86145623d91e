#[allow(dead_code)]
mod helpers;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use helpers::{make_test_app_with_store, seed_algebra, send};
use sea_orm::{DbErr, RuntimeErr};
use serde_json::json;
use services::attendance_store::{
    AttendanceSession, AttendanceStore, CloseOutcome, HistoryEntry, MarkOutcome, NewSession,
    SessionFilter, SessionState, SessionSummary,
};
use services::roster::RosterEntry;
use std::sync::Arc;

fn outage() -> DbErr {
    DbErr::Conn(RuntimeErr::Internal("connection refused".into()))
}

/// A store whose database has gone away.
struct UnreachableStore;

#[async_trait]
impl AttendanceStore for UnreachableStore {
    async fn create_session(
        &self,
        _: NewSession,
        _: &[RosterEntry],
    ) -> Result<AttendanceSession, DbErr> {
        Err(outage())
    }
    async fn session_state(&self, _: &str) -> Result<Option<SessionState>, DbErr> {
        Err(outage())
    }
    async fn find_session(&self, _: &str) -> Result<Option<AttendanceSession>, DbErr> {
        Err(outage())
    }
    async fn mark_present(&self, _: &str, _: &str, _: DateTime<Utc>) -> Result<MarkOutcome, DbErr> {
        Err(outage())
    }
    async fn close_session(&self, _: &str, _: DateTime<Utc>) -> Result<CloseOutcome, DbErr> {
        Err(outage())
    }
    async fn list_sessions(&self, _: &SessionFilter) -> Result<Vec<SessionSummary>, DbErr> {
        Err(outage())
    }
    async fn student_history(&self, _: &str) -> Result<Vec<HistoryEntry>, DbErr> {
        Err(outage())
    }
}

#[tokio::test]
async fn store_outage_is_reported_as_503_without_details() {
    let app = make_test_app_with_store(Arc::new(UnreachableStore)).await;
    seed_algebra(app.state.db()).await;

    let requests = [
        (
            Method::POST,
            "/api/attendance/sessions".to_owned(),
            Some(json!({ "course_name": "Algebra II", "teacher_name": "Mr. Davis" })),
        ),
        (Method::GET, "/api/attendance/sessions/s1".to_owned(), None),
        (
            Method::POST,
            "/api/attendance/sessions/s1/scan".to_owned(),
            Some(json!({ "card_id": "CARD-A" })),
        ),
        (Method::POST, "/api/attendance/sessions/s1/end".to_owned(), None),
        (Method::GET, "/api/students/S001/attendance".to_owned(), None),
    ];

    for (method, uri, body) in requests {
        let (status, json) = send(&app.router, method, &uri, body).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
        assert!(!json["message"].as_str().unwrap().contains("connection refused"));
    }
}
