use serde::Serialize;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Attendance session started"
/// }
/// ```
///
/// Error responses carry `data: null` and a stable machine-readable `code`:
///
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Attendance session 'abc' is closed",
///   "code": "SESSION_CLOSED"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            code: None,
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
            code: None,
        }
    }

    /// Like [`ApiResponse::error`], tagged with a machine-readable code.
    pub fn error_with_code(code: &'static str, message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            code: Some(code),
            ..Self::error(message)
        }
    }
}
