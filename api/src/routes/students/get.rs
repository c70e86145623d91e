use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::attendance::attendance_error;

/// GET `/api/students/{student_id}/attendance`
///
/// Attendance over the student's ended sessions:
///
/// ```json
/// {
///   "student_id": "S001",
///   "sessions_total": 4,
///   "sessions_attended": 3,
///   "sessions_missed": 1,
///   "attendance_rate": 75.0
/// }
/// ```
pub async fn get_student_attendance(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Response {
    match state
        .attendance()
        .student_attendance_summary(&student_id)
        .await
    {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::success(summary, "Attendance summary retrieved")),
        )
            .into_response(),
        Err(e) => attendance_error(e),
    }
}
