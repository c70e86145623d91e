use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// A student, optionally carrying the physical card used to check in.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Class/group label, e.g. "Grade 10".
    pub class_label: String,
    /// Avatar reference understood by the frontend.
    pub avatar: Option<String>,
    /// Opaque card identifier (unique when present).
    pub nfc_card_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::student_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert payload for [`Model::create`].
#[derive(Debug, Clone, Default)]
pub struct NewStudent<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub class_label: &'a str,
    pub avatar: Option<&'a str>,
    pub nfc_card_id: Option<&'a str>,
}

impl Model {
    pub async fn create<C>(db: &C, new: NewStudent<'_>) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            id: Set(new.id.to_owned()),
            name: Set(new.name.to_owned()),
            email: Set(new.email.to_owned()),
            class_label: Set(new.class_label.to_owned()),
            avatar: Set(new.avatar.map(str::to_owned)),
            nfc_card_id: Set(new.nfc_card_id.map(str::to_owned)),
        }
        .insert(db)
        .await
    }
}
