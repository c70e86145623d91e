pub fn attendance_session_topic(session_id: &str) -> String {
    format!("attendance:session:{session_id}")
}
