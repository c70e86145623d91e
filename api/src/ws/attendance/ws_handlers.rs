use super::common::AttendanceIncoming;
use crate::routes::attendance::SessionResponse;
use services::AttendanceSessionManager;
use util::config;
use util::ws::event_json;
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

/// Per-connection handler for `attendance:session:{id}`.
pub struct AttendanceWsHandler {
    pub manager: AttendanceSessionManager,
    pub session_id: String,
}

impl AttendanceWsHandler {
    /// Sends the current session state to this client only.
    async fn send_snapshot(&self, ctx: &WsContext) {
        let session = match self.manager.get_session(&self.session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => return,
            Err(e) => {
                tracing::error!(session_id = %self.session_id, error = %e, "WS snapshot failed");
                return;
            }
        };
        let data = SessionResponse::new(session, config::poll_interval_seconds());
        match event_json(&ctx.topic, "attendance.snapshot", &data) {
            Ok(json) => {
                ctx.reply_text(json).await;
            }
            Err(e) => tracing::error!("Failed to serialize attendance snapshot: {e}"),
        }
    }
}

impl WsHandler for AttendanceWsHandler {
    type In = AttendanceIncoming;

    async fn on_open(&self, ctx: &WsContext) {
        self.send_snapshot(ctx).await;
    }

    async fn on_message(&self, ctx: &WsContext, msg: Self::In) {
        match msg {
            AttendanceIncoming::Snapshot => self.send_snapshot(ctx).await,
        }
    }
}
