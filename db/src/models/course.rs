use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// A course students enroll in and attendance sessions are held for.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name, unique across courses (e.g. "Algebra II").
    pub name: String,
    /// Teacher of record. Free text, not a user reference.
    pub teacher: String,
    pub schedule: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::attendance_session::Entity")]
    Sessions,
}

impl Related<super::student_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        id: &str,
        name: &str,
        teacher: &str,
        schedule: Option<&str>,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            id: Set(id.to_owned()),
            name: Set(name.to_owned()),
            teacher: Set(teacher.to_owned()),
            schedule: Set(schedule.map(str::to_owned)),
        }
        .insert(db)
        .await
    }
}
