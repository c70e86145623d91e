pub mod attendance_session;
pub mod attendance_store;
pub mod card_directory;
pub mod error;
pub mod roster;

pub use attendance_session::AttendanceSessionManager;
pub use error::{AttendanceError, AttendanceResult};
