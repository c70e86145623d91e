use crate::models::{
    course::Model as CourseModel,
    student::{Model as StudentModel, NewStudent},
    student_enrollment::Model as EnrollmentModel,
};
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Fresh, fully migrated in-memory SQLite database.
///
/// The pool is pinned to a single connection: every connection to
/// `sqlite::memory:` would otherwise see its own empty database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Rows created by [`seed_algebra`].
pub struct Fixture {
    pub course: CourseModel,
    pub empty_course: CourseModel,
    pub a: StudentModel,
    pub b: StudentModel,
    pub c: StudentModel,
    /// Has a card, enrolled elsewhere.
    pub outsider: StudentModel,
}

async fn student(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    class_label: &str,
    card: &str,
) -> StudentModel {
    StudentModel::create(
        db,
        NewStudent {
            id,
            name,
            email: &format!("{}@school.test", id.to_lowercase()),
            class_label,
            avatar: Some("student-1"),
            nfc_card_id: Some(card),
        },
    )
    .await
    .expect("create student")
}

/// "Algebra II" (C101) with S001..S003 on cards CARD-A..CARD-C, an empty
/// "Study Hall" (C900), and S004 (CARD-D) enrolled only in "Biology" (C104).
pub async fn seed_algebra(db: &DatabaseConnection) -> Fixture {
    let course = CourseModel::create(db, "C101", "Algebra II", "Mr. Davis", Some("Mon-Wed-Fri 9-10"))
        .await
        .expect("create course");
    let empty_course = CourseModel::create(db, "C900", "Study Hall", "Ms. Lane", None)
        .await
        .expect("create empty course");
    let biology = CourseModel::create(db, "C104", "Biology", "Dr. Green", None)
        .await
        .expect("create biology");

    let a = student(db, "S001", "Ava Adams", "Grade 10", "CARD-A").await;
    let b = student(db, "S002", "Ben Brooks", "Grade 10", "CARD-B").await;
    let c = student(db, "S003", "Cleo Chen", "Grade 11", "CARD-C").await;
    let outsider = student(db, "S004", "Dan Diaz", "Grade 11", "CARD-D").await;

    for s in [&a, &b, &c] {
        EnrollmentModel::enroll(db, &s.id, &course.id)
            .await
            .expect("enroll");
    }
    EnrollmentModel::enroll(db, &outsider.id, &biology.id)
        .await
        .expect("enroll outsider");

    Fixture {
        course,
        empty_course,
        a,
        b,
        c,
        outsider,
    }
}
