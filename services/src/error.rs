use sea_orm::DbErr;

pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Failures surfaced by the attendance session manager.
///
/// Every variant except `StorageUnavailable` is an expected, user-facing
/// outcome. Store failures are fatal to the current operation only.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Course '{0}' not found")]
    CourseNotFound(String),

    #[error("No students are enrolled in course '{0}'")]
    EmptyRoster(String),

    #[error("Attendance session '{0}' not found")]
    SessionNotFound(String),

    #[error("Attendance session '{0}' is closed")]
    SessionClosed(String),

    #[error("Attendance session '{0}' has already been ended")]
    SessionAlreadyClosed(String),

    #[error("No student owns card '{0}'")]
    UnknownCard(String),

    #[error("Student '{student_id}' is not on the roster of session '{session_id}'")]
    StudentNotInSession {
        session_id: String,
        student_id: String,
    },

    #[error("Attendance storage unavailable: {0}")]
    StorageUnavailable(#[from] DbErr),
}

impl AttendanceError {
    /// Stable machine-readable code for transports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CourseNotFound(_) => "COURSE_NOT_FOUND",
            Self::EmptyRoster(_) => "EMPTY_ROSTER",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::SessionClosed(_) => "SESSION_CLOSED",
            Self::SessionAlreadyClosed(_) => "SESSION_ALREADY_CLOSED",
            Self::UnknownCard(_) => "UNKNOWN_CARD",
            Self::StudentNotInSession { .. } => "STUDENT_NOT_IN_SESSION",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// True for failures of the backing store rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
