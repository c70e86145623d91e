use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::{config, state::AppState};

use super::common::{
    ScanReq, ScanResponse, SessionResponse, StartSessionReq, attendance_error, bad_request,
};
use crate::response::ApiResponse;
use crate::ws::attendance::{emit, payload};

/// POST `/api/attendance/sessions`
///
/// Starts a session for a course, snapshotting its roster with everyone ABSENT.
///
/// ```json
/// { "course_name": "Algebra II", "teacher_name": "Mr. Davis" }
/// ```
///
/// - `201 Created` with the session
/// - `400` when a field is blank
/// - `404 COURSE_NOT_FOUND`, `422 EMPTY_ROSTER`
pub async fn start_session(
    State(state): State<AppState>,
    Json(body): Json<StartSessionReq>,
) -> Response {
    if body.course_name.trim().is_empty() {
        return bad_request("course_name is required");
    }
    if body.teacher_name.trim().is_empty() {
        return bad_request("teacher_name is required");
    }

    match state
        .attendance()
        .start_session(body.course_name.trim(), &body.teacher_name)
        .await
    {
        Ok(session) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SessionResponse::new(session, config::poll_interval_seconds()),
                "Attendance session started",
            )),
        )
            .into_response(),
        Err(e) => attendance_error(e),
    }
}

/// POST `/api/attendance/sessions/{session_id}/scan`
///
/// Records a card tap. Repeat taps succeed with `already_present: true`.
///
/// - `200 OK` with the student's attendance entry
/// - `404 SESSION_NOT_FOUND` / `UNKNOWN_CARD`
/// - `409 SESSION_CLOSED`
/// - `422 STUDENT_NOT_IN_SESSION`
pub async fn scan_card(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<ScanReq>,
) -> Response {
    // Card ids are opaque: blank ones are rejected, anything else is matched verbatim.
    if body.card_id.trim().is_empty() {
        return bad_request("card_id is required");
    }

    let marked = match state.attendance().mark_present(&session_id, &body.card_id).await {
        Ok(marked) => marked,
        Err(e) => return attendance_error(e),
    };

    if marked.newly_marked {
        emit::attendance_marked(
            state.ws(),
            payload::AttendanceMarked {
                session_id: marked.session_id.clone(),
                student_id: marked.attendance.student_id.clone(),
                student_name: marked.attendance.name.clone(),
                avatar: marked.attendance.avatar.clone(),
                marked_at: marked.attendance.marked_at.map(|t| t.to_rfc3339()),
            },
        )
        .await;
    }

    let message = if marked.newly_marked {
        format!("{} marked present", marked.attendance.name)
    } else {
        format!("{} was already marked present", marked.attendance.name)
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(ScanResponse::from(marked), message)),
    )
        .into_response()
}

/// POST `/api/attendance/sessions/{session_id}/end`
///
/// Closes the session. Students still ABSENT stay absent for good.
///
/// - `200 OK` with the final session
/// - `404 SESSION_NOT_FOUND`
/// - `409 SESSION_ALREADY_CLOSED` on a second call
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session = match state.attendance().end_session(&session_id).await {
        Ok(session) => session,
        Err(e) => return attendance_error(e),
    };

    emit::session_ended(
        state.ws(),
        payload::SessionEnded {
            session_id: session.id.clone(),
            end_time: session.end_time.map(|t| t.to_rfc3339()),
            present_count: session.present_count(),
            absent_count: session.absent_count(),
        },
    )
    .await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SessionResponse::new(session, config::poll_interval_seconds()),
            "Attendance session ended",
        )),
    )
        .into_response()
}
