//! Roster Resolver: course lookup and the list of students enrolled in it.
//!
//! The session manager only reads through this trait; it snapshots the roster
//! once when a session starts.

use async_trait::async_trait;
use db::models::{course, student, student_enrollment};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

/// The course a session is started for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRef {
    pub id: String,
    pub name: String,
}

/// One enrolled student as seen at session start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub name: String,
    pub class_label: String,
    pub avatar: Option<String>,
}

#[async_trait]
pub trait RosterResolver: Send + Sync {
    /// Resolves a course by its identifier (name or id).
    async fn find_course(&self, identifier: &str) -> Result<Option<CourseRef>, DbErr>;

    /// Students currently enrolled in `course_id`. Ordering is implementation-defined.
    async fn enrolled_students(&self, course_id: &str) -> Result<Vec<RosterEntry>, DbErr>;
}

/// Reads courses and enrollments from the relational schema.
#[derive(Clone)]
pub struct DbRosterResolver {
    db: DatabaseConnection,
}

impl DbRosterResolver {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RosterResolver for DbRosterResolver {
    async fn find_course(&self, identifier: &str) -> Result<Option<CourseRef>, DbErr> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        // Exact name wins over an id that happens to look the same.
        let found = course::Entity::find()
            .filter(
                Condition::any()
                    .add(course::Column::Name.eq(identifier))
                    .add(course::Column::Id.eq(identifier)),
            )
            .all(&self.db)
            .await?;

        let best = found
            .iter()
            .find(|c| c.name == identifier)
            .or_else(|| found.first())
            .map(|c| CourseRef {
                id: c.id.clone(),
                name: c.name.clone(),
            });
        Ok(best)
    }

    async fn enrolled_students(&self, course_id: &str) -> Result<Vec<RosterEntry>, DbErr> {
        let rows = student_enrollment::Entity::find()
            .filter(student_enrollment::Column::CourseId.eq(course_id))
            .find_also_related(student::Entity)
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, s)| s)
            .map(|s| RosterEntry {
                student_id: s.id,
                name: s.name,
                class_label: s.class_label,
                avatar: s.avatar,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::test_utils::{seed_algebra, setup_test_db};

    #[tokio::test]
    async fn finds_course_by_name_or_id() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let roster = DbRosterResolver::new(db);

        let by_name = roster.find_course("Algebra II").await.unwrap().unwrap();
        assert_eq!(by_name.id, fx.course.id);

        let by_id = roster.find_course(&fx.course.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Algebra II");

        assert!(roster.find_course("Astrology").await.unwrap().is_none());
        assert!(roster.find_course("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_only_students_enrolled_in_the_course() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let roster = DbRosterResolver::new(db);

        let students = roster.enrolled_students(&fx.course.id).await.unwrap();
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ava Adams", "Ben Brooks", "Cleo Chen"]);

        let empty = roster.enrolled_students(&fx.empty_course.id).await.unwrap();
        assert!(empty.is_empty());
    }
}
