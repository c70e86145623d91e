use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use util::config;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::attendance_session_topic;
use super::ws_handlers::AttendanceWsHandler;
use crate::routes::attendance::attendance_error;

/// GET `/ws/attendance/sessions/{session_id}`
///
/// Unknown sessions are refused with `404` before the upgrade.
pub async fn attendance_session_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match app_state.attendance().get_session(&session_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return attendance_error(services::AttendanceError::SessionNotFound(session_id));
        }
        Err(e) => return attendance_error(e),
    }

    let handler = Arc::new(AttendanceWsHandler {
        manager: app_state.attendance().clone(),
        session_id: session_id.clone(),
    });
    let opts = WsServerOptions {
        ws_ping_sec: config::ws_ping_seconds(),
        ..WsServerOptions::default()
    };

    ws_route(
        ws,
        &app_state,
        attendance_session_topic(&session_id),
        handler,
        opts,
    )
}
