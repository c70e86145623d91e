// util/ws/axum_adapter.rs
use super::handler_trait::WsHandler;
use super::serve::{WsServerOptions, serve_topic};
use crate::state::AppState;
use axum::{
    extract::{WebSocketUpgrade, ws::WebSocket},
    response::Response,
};
use std::sync::Arc;

/// Upgrades the request and serves `topic` with `handler` on the new socket.
pub fn ws_route<H: WsHandler>(
    ws: WebSocketUpgrade,
    state: &AppState,
    topic: String,
    handler: Arc<H>,
    opts: WsServerOptions,
) -> Response {
    let manager = state.ws_clone();
    ws.on_upgrade(move |socket: WebSocket| async move {
        serve_topic(socket, manager, topic, handler, opts).await;
    })
}
