//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/attendance` → attendance sessions: start, poll, scan, end, list
//! - `/students` → per-student attendance reporting

use crate::routes::{
    attendance::attendance_routes, health::health_routes, students::students_routes,
};
use axum::Router;
use util::state::AppState;

pub mod attendance;
pub mod health;
pub mod students;

/// Builds the router for every HTTP endpoint mounted under `/api`.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/attendance", attendance_routes(app_state.clone()))
        .nest("/students", students_routes(app_state.clone()))
        .with_state(app_state)
}
