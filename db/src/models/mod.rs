pub mod attendance_record;
pub mod attendance_session;
pub mod course;
pub mod student;
pub mod student_enrollment;
