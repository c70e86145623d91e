use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttendanceIncoming {
    /// Ask for the current session state, e.g. after a reconnect.
    Snapshot,
}
