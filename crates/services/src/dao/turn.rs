use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use prepcoach_db::models::{SpeakerRole, TranscriptTurn};

use super::base::{BaseDao, DaoResult};

pub struct TurnDao {
    pub base: BaseDao<TranscriptTurn>,
}

impl TurnDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, TranscriptTurn::COLLECTION),
        }
    }

    pub async fn append(
        &self,
        session_id: ObjectId,
        role: SpeakerRole,
        text: String,
        timestamp: DateTime,
    ) -> DaoResult<TranscriptTurn> {
        let turn = TranscriptTurn {
            id: None,
            session_id,
            role,
            text,
            timestamp,
            created_at: DateTime::now(),
        };

        let id = self.base.insert_one(&turn).await?;
        self.base.find_by_id(id).await
    }

    /// All turns for a session, ascending by spoken timestamp.
    pub async fn find_by_session(&self, session_id: ObjectId) -> DaoResult<Vec<TranscriptTurn>> {
        self.base
            .find_many(
                doc! { "session_id": session_id },
                Some(doc! { "timestamp": 1 }),
            )
            .await
    }
}
