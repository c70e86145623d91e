use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510160001_create_courses::Migration),
            Box::new(migrations::m202510160002_create_students::Migration),
            Box::new(migrations::m202510160003_create_student_enrollments::Migration),
            Box::new(migrations::m202510160004_create_attendance::Migration),
        ]
    }
}
