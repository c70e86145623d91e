//! Push channel for attendance sessions.
//!
//! Subscribers of `attendance:session:{id}` get `attendance.marked` for every
//! real ABSENT→PRESENT transition and a final `attendance.session_ended`.
//! Polling `GET /api/attendance/sessions/{id}` keeps working alongside.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod emit;
pub mod handlers;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

use handlers::attendance_session_ws_handler;

pub fn ws_attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sessions/{session_id}", get(attendance_session_ws_handler))
        .with_state(app_state)
}
