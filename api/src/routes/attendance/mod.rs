use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use common::{
    ScanResponse, SessionResponse, SessionSummaryResponse, StudentAttendanceResponse,
    attendance_error,
};
pub use get::{get_session, list_sessions};
pub use post::{end_session, scan_card, start_session};

/// Routes mounted at `/api/attendance`.
pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sessions", get(list_sessions).post(start_session))
        .route("/sessions/{session_id}", get(get_session))
        .route("/sessions/{session_id}/scan", post(scan_card))
        .route("/sessions/{session_id}/end", post(end_session))
        .with_state(app_state)
}
