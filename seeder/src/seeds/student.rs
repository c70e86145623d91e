use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::student::{Entity as StudentEntity, Model as StudentModel, NewStudent};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

pub struct DemoStudent {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub class_label: &'static str,
    pub avatar: &'static str,
    pub nfc_card_id: &'static str,
    pub courses: &'static [&'static str],
}

pub const STUDENTS: [DemoStudent; 5] = [
    DemoStudent {
        id: "S001",
        name: "Liam Johnson",
        email: "liam.johnson@example.com",
        class_label: "Grade 10",
        avatar: "student-1",
        nfc_card_id: "04-6A-A9-C5-25-3C-80",
        courses: &["C101", "C102", "C103", "C104"],
    },
    DemoStudent {
        id: "S002",
        name: "Olivia Smith",
        email: "olivia.smith@example.com",
        class_label: "Grade 10",
        avatar: "student-2",
        nfc_card_id: "04-F9-C3-B4-2E-5A-80",
        courses: &["C101", "C102", "C103", "C104"],
    },
    DemoStudent {
        id: "S003",
        name: "Noah Williams",
        email: "noah.williams@example.com",
        class_label: "Grade 11",
        avatar: "student-3",
        nfc_card_id: "04-12-34-56-78-9A-BC",
        courses: &["C105", "C102", "C103", "C104"],
    },
    DemoStudent {
        id: "S004",
        name: "Emma Brown",
        email: "emma.brown@example.com",
        class_label: "Grade 11",
        avatar: "student-4",
        nfc_card_id: "04-DE-F0-12-34-56-78",
        courses: &["C105", "C102", "C103", "C104"],
    },
    DemoStudent {
        id: "S005",
        name: "James Jones",
        email: "james.jones@example.com",
        class_label: "Grade 10",
        avatar: "student-5",
        nfc_card_id: "04-98-76-54-32-10-FE",
        courses: &["C101", "C102", "C103", "C104"],
    },
];

pub struct StudentSeeder;

#[async_trait]
impl Seeder for StudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for s in &STUDENTS {
            if StudentEntity::find_by_id(s.id).one(db).await?.is_some() {
                continue;
            }
            StudentModel::create(
                db,
                NewStudent {
                    id: s.id,
                    name: s.name,
                    email: s.email,
                    class_label: s.class_label,
                    avatar: Some(s.avatar),
                    nfc_card_id: Some(s.nfc_card_id),
                },
            )
            .await?;
        }
        Ok(())
    }
}
