use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use prepcoach_db::models::{EvaluationRecord, EvaluationResult};

use super::base::{BaseDao, DaoError, DaoResult};

pub struct EvaluationDao {
    pub base: BaseDao<EvaluationRecord>,
}

impl EvaluationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, EvaluationRecord::COLLECTION),
        }
    }

    /// Inserts or replaces the session's single evaluation. The unique index
    /// on `session_id` backs the one-record-per-session shape.
    pub async fn upsert(
        &self,
        session_id: ObjectId,
        result: &EvaluationResult,
    ) -> DaoResult<EvaluationRecord> {
        let now = DateTime::now();
        let result_doc = bson::to_bson(result).map_err(DaoError::BsonSer)?;

        self.base
            .upsert_one(
                doc! { "session_id": session_id },
                doc! {
                    "$set": { "result": result_doc, "updated_at": now },
                    "$setOnInsert": { "session_id": session_id, "created_at": now },
                },
            )
            .await?;

        self.base
            .find_one(doc! { "session_id": session_id })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn find_by_session(
        &self,
        session_id: ObjectId,
    ) -> DaoResult<Option<EvaluationRecord>> {
        self.base.find_one(doc! { "session_id": session_id }).await
    }
}
