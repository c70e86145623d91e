use axum::Router;
use util::state::AppState;

use crate::ws::attendance::ws_attendance_routes;

pub mod attendance;
pub mod core;

/// WebSocket routes mounted at `/ws`.
pub fn ws_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/attendance", ws_attendance_routes(app_state.clone()))
        .with_state(app_state)
}
