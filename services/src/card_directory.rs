//! Card Directory: maps a physical card identifier to the student carrying it.

use async_trait::async_trait;
use db::models::student;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardHolder {
    pub student_id: String,
    pub name: String,
    pub avatar: Option<String>,
}

#[async_trait]
pub trait CardDirectory: Send + Sync {
    /// The student owning `card_id`, if any. Card ids are opaque and matched exactly.
    async fn find_student_by_card(&self, card_id: &str) -> Result<Option<CardHolder>, DbErr>;
}

#[derive(Clone)]
pub struct DbCardDirectory {
    db: DatabaseConnection,
}

impl DbCardDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardDirectory for DbCardDirectory {
    async fn find_student_by_card(&self, card_id: &str) -> Result<Option<CardHolder>, DbErr> {
        if card_id.is_empty() {
            return Ok(None);
        }

        let found = student::Entity::find()
            .filter(student::Column::NfcCardId.eq(card_id))
            .one(&self.db)
            .await?;

        Ok(found.map(|s| CardHolder {
            student_id: s.id,
            name: s.name,
            avatar: s.avatar,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::test_utils::{seed_algebra, setup_test_db};

    #[tokio::test]
    async fn resolves_known_cards_exactly() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let cards = DbCardDirectory::new(db);

        let holder = cards.find_student_by_card("CARD-A").await.unwrap().unwrap();
        assert_eq!(holder.student_id, fx.a.id);
        assert_eq!(holder.name, "Ava Adams");

        assert!(cards.find_student_by_card("card-a").await.unwrap().is_none());
        assert!(cards.find_student_by_card("").await.unwrap().is_none());
        assert!(cards.find_student_by_card("CARD-ZZZ").await.unwrap().is_none());
    }
}
