use crate::seed::Seeder;
use crate::seeds::student::STUDENTS;
use async_trait::async_trait;
use db::models::student_enrollment::{Entity as EnrollmentEntity, Model as EnrollmentModel};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

pub struct EnrollmentSeeder;

#[async_trait]
impl Seeder for EnrollmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for s in &STUDENTS {
            for course_id in s.courses {
                let key = (s.id.to_owned(), (*course_id).to_owned());
                if EnrollmentEntity::find_by_id(key).one(db).await?.is_some() {
                    continue;
                }
                EnrollmentModel::enroll(db, s.id, course_id).await?;
            }
        }
        Ok(())
    }
}
