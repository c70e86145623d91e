use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use services::{
    AttendanceError,
    attendance_session::{AttendanceSession, MarkPresent},
    attendance_store::{SessionSummary, StudentAttendance},
};

use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct StartSessionReq {
    pub course_name: String,
    pub teacher_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ScanReq {
    pub card_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Course name or id.
    pub course: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StudentAttendanceResponse {
    pub student_id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub status: String,
    pub marked_at: Option<String>,
}

impl From<StudentAttendance> for StudentAttendanceResponse {
    fn from(s: StudentAttendance) -> Self {
        Self {
            student_id: s.student_id,
            name: s.name,
            avatar: s.avatar,
            status: s.status.to_string(),
            marked_at: s.marked_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub teacher_name: String,
    pub class_label: String,
    pub is_active: bool,
    pub start_time: String,
    pub end_time: Option<String>,
    pub present_count: usize,
    pub absent_count: usize,
    pub students: Vec<StudentAttendanceResponse>,
    /// How often polling clients should re-fetch this session.
    pub poll_interval_seconds: u64,
}

impl SessionResponse {
    pub fn new(s: AttendanceSession, poll_interval_seconds: u64) -> Self {
        Self {
            present_count: s.present_count(),
            absent_count: s.absent_count(),
            id: s.id,
            course_id: s.course_id,
            course_name: s.course_name,
            teacher_name: s.teacher_name,
            class_label: s.class_label,
            is_active: s.is_active,
            start_time: s.start_time.to_rfc3339(),
            end_time: s.end_time.map(|t| t.to_rfc3339()),
            students: s.students.into_iter().map(Into::into).collect(),
            poll_interval_seconds,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSummaryResponse {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub teacher_name: String,
    pub class_label: String,
    pub is_active: bool,
    pub start_time: String,
    pub end_time: Option<String>,
    pub present_count: u64,
    pub total_count: u64,
}

impl From<SessionSummary> for SessionSummaryResponse {
    fn from(s: SessionSummary) -> Self {
        Self {
            id: s.id,
            course_id: s.course_id,
            course_name: s.course_name,
            teacher_name: s.teacher_name,
            class_label: s.class_label,
            is_active: s.is_active,
            start_time: s.start_time.to_rfc3339(),
            end_time: s.end_time.map(|t| t.to_rfc3339()),
            present_count: s.present_count,
            total_count: s.total_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub session_id: String,
    pub student_id: String,
    pub student_name: String,
    pub avatar: Option<String>,
    pub status: String,
    pub marked_at: Option<String>,
    /// The card had already been scanned in this session; nothing changed.
    pub already_present: bool,
}

impl From<MarkPresent> for ScanResponse {
    fn from(m: MarkPresent) -> Self {
        Self {
            session_id: m.session_id,
            student_id: m.attendance.student_id,
            student_name: m.attendance.name,
            avatar: m.attendance.avatar,
            status: m.attendance.status.to_string(),
            marked_at: m.attendance.marked_at.map(|t| t.to_rfc3339()),
            already_present: !m.newly_marked,
        }
    }
}

/// HTTP status for each manager failure.
pub fn status_for(err: &AttendanceError) -> StatusCode {
    match err {
        AttendanceError::CourseNotFound(_)
        | AttendanceError::SessionNotFound(_)
        | AttendanceError::UnknownCard(_) => StatusCode::NOT_FOUND,
        AttendanceError::SessionClosed(_) | AttendanceError::SessionAlreadyClosed(_) => {
            StatusCode::CONFLICT
        }
        AttendanceError::EmptyRoster(_) | AttendanceError::StudentNotInSession { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AttendanceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Renders a manager failure as an error envelope. Store details are logged, not returned.
pub fn attendance_error(err: AttendanceError) -> Response {
    let status = status_for(&err);
    let message = if err.is_storage() {
        tracing::error!(error = %err, "Attendance storage failure");
        "Attendance storage is unavailable, try again shortly".to_owned()
    } else {
        err.to_string()
    };
    (
        status,
        Json(ApiResponse::<()>::error_with_code(err.code(), message)),
    )
        .into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error_with_code("VALIDATION_ERROR", message)),
    )
        .into_response()
}
