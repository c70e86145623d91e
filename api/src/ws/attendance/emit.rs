use serde::Serialize;
use util::ws::WebSocketManager;

use super::payload;
use super::topics::attendance_session_topic;
use crate::ws::core::{envelope, event::Event};

#[derive(Debug, Serialize)]
pub struct AttendanceMarkedEvent {
    #[serde(flatten)]
    pub payload: payload::AttendanceMarked,
}
impl Event for AttendanceMarkedEvent {
    const NAME: &'static str = "attendance.marked";
    fn topic_path(&self) -> String {
        attendance_session_topic(&self.payload.session_id)
    }
}

#[derive(Debug, Serialize)]
pub struct SessionEndedEvent {
    #[serde(flatten)]
    pub payload: payload::SessionEnded,
}
impl Event for SessionEndedEvent {
    const NAME: &'static str = "attendance.session_ended";
    fn topic_path(&self) -> String {
        attendance_session_topic(&self.payload.session_id)
    }
}

/* ---------- one-liner helpers ---------- */

pub async fn attendance_marked(ws: &WebSocketManager, p: payload::AttendanceMarked) {
    envelope::emit(ws, &AttendanceMarkedEvent { payload: p }).await;
}

pub async fn session_ended(ws: &WebSocketManager, p: payload::SessionEnded) {
    envelope::emit(ws, &SessionEndedEvent { payload: p }).await;
}
