//! HTTP and WebSocket transport for the attendance service.

use axum::{
    Router,
    middleware::from_fn,
};
use tower_http::cors::CorsLayer;
use util::state::AppState;

pub mod middleware;
pub mod response;
pub mod routes;
pub mod ws;

/// Full application router: `/api` routes, `/ws` push channels, request logging and CORS.
pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::very_permissive();

    Router::new()
        .nest("/api", routes::routes(app_state.clone()))
        .nest("/ws", ws::ws_routes(app_state.clone()))
        .layer(from_fn(middleware::log_request))
        .layer(cors)
        .with_state(app_state)
}
