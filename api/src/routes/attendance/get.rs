//! Read-only attendance routes: session polling and listing.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::attendance_session::SessionQuery;
use util::{config, state::AppState};

use super::common::{ListQuery, SessionResponse, SessionSummaryResponse, attendance_error};
use crate::response::ApiResponse;

/// GET `/api/attendance/sessions/{session_id}`
///
/// Current state of a session with every roster student's status. This is the
/// polling target; `data.poll_interval_seconds` tells clients how often to call it.
///
/// - `200 OK` with the session
/// - `404 Not Found` (`SESSION_NOT_FOUND`)
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.attendance().get_session(&session_id).await {
        Ok(Some(session)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SessionResponse::new(session, config::poll_interval_seconds()),
                "Attendance session retrieved",
            )),
        )
            .into_response(),
        Ok(None) => attendance_error(services::AttendanceError::SessionNotFound(session_id)),
        Err(e) => attendance_error(e),
    }
}

/// GET `/api/attendance/sessions?course=&active=&limit=`
///
/// Session summaries, newest first, with present/total counts.
///
/// - `course` *(optional)*: course name or id; unknown courses yield `404 COURSE_NOT_FOUND`
/// - `active` *(optional bool)*
/// - `limit` *(optional, max 500)*
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Response {
    let query = SessionQuery {
        course: q.course.filter(|c| !c.trim().is_empty()),
        active: q.active,
        limit: q.limit.map(|l| l.clamp(1, 500)),
    };

    match state.attendance().list_sessions(query).await {
        Ok(sessions) => {
            let data: Vec<SessionSummaryResponse> = sessions.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Attendance sessions retrieved")),
            )
                .into_response()
        }
        Err(e) => attendance_error(e),
    }
}
