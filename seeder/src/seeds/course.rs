use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::course::{Entity as CourseEntity, Model as CourseModel};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

/// (id, name, teacher, schedule)
pub const COURSES: [(&str, &str, &str, &str); 5] = [
    ("C101", "Algebra II", "Mr. Davis", "Mon-Wed-Fri 9-10"),
    ("C102", "World History", "Ms. Smith", "Tue-Thu 10-11:30"),
    ("C103", "English Literature", "Mr. Allen", "Mon-Wed-Fri 11-12"),
    ("C104", "Biology", "Dr. Green", "Tue-Thu 13-14:30"),
    ("C105", "Chemistry", "Ms. White", "Mon-Wed-Fri 14-15"),
];

pub struct CourseSeeder;

#[async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for (id, name, teacher, schedule) in COURSES {
            if CourseEntity::find_by_id(id).one(db).await?.is_some() {
                continue;
            }
            CourseModel::create(db, id, name, teacher, Some(schedule)).await?;
        }
        Ok(())
    }
}
