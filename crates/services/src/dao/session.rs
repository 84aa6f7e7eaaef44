use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use prepcoach_db::models::{CandidateProfile, InterviewSession, InterviewType, SessionStatus};

use super::base::{BaseDao, DaoResult};

pub struct SessionDao {
    pub base: BaseDao<InterviewSession>,
}

impl SessionDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, InterviewSession::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        interview_type: InterviewType,
        spoken_language: String,
        candidate_profile: CandidateProfile,
        room_name: Option<String>,
    ) -> DaoResult<InterviewSession> {
        let now = DateTime::now();
        let session = InterviewSession {
            id: None,
            interview_type,
            spoken_language,
            candidate_profile,
            room_name,
            status: SessionStatus::Created,
            started_at: None,
            ended_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let id = self.base.insert_one(&session).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find(&self, session_id: ObjectId) -> DaoResult<InterviewSession> {
        self.base.find_by_id(session_id).await
    }

    /// Transitions a fresh session to in-progress on its first turn. A no-op
    /// for sessions already past that state.
    pub async fn mark_in_progress(&self, session_id: ObjectId) -> DaoResult<bool> {
        let now = DateTime::now();
        self.base
            .update_one(
                doc! { "_id": session_id, "status": "created" },
                doc! { "$set": {
                    "status": "in_progress",
                    "started_at": now,
                    "updated_at": now,
                } },
            )
            .await
    }

    pub async fn mark_evaluated(&self, session_id: ObjectId) -> DaoResult<bool> {
        let now = DateTime::now();
        self.base
            .update_by_id(
                session_id,
                doc! { "$set": {
                    "status": "evaluated",
                    "ended_at": now,
                    "updated_at": now,
                } },
            )
            .await
    }
}
