use axum::{Router, routing::get};
use util::state::AppState;

mod get;

pub use get::get_student_attendance;

/// Routes mounted at `/api/students`.
pub fn students_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{student_id}/attendance", get(get_student_attendance))
        .with_state(app_state)
}
