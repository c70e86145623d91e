use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceMarked {
    pub session_id: String,
    pub student_id: String,
    pub student_name: String,
    pub avatar: Option<String>,
    pub marked_at: Option<String>, // RFC3339
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionEnded {
    pub session_id: String,
    pub end_time: Option<String>, // RFC3339
    pub present_count: usize,
    pub absent_count: usize,
}
