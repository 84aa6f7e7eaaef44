use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use prepcoach_db::models::{EvaluationRecord, EvaluationResult, TranscriptTurn};
use prepcoach_evaluation::orchestrator::{
    EvaluationStore, SessionContext, StoreError, TranscriptStore,
};

use crate::dao::{DaoError, EvaluationDao, SessionDao, TurnDao};

fn store_err(err: DaoError) -> StoreError {
    match err {
        DaoError::NotFound => StoreError::SessionNotFound,
        other => StoreError::Backend(other.to_string()),
    }
}

/// Pipeline read side backed by the session and turn collections.
pub struct MongoTranscriptStore {
    sessions: Arc<SessionDao>,
    turns: Arc<TurnDao>,
}

impl MongoTranscriptStore {
    pub fn new(sessions: Arc<SessionDao>, turns: Arc<TurnDao>) -> Self {
        Self { sessions, turns }
    }
}

#[async_trait]
impl TranscriptStore for MongoTranscriptStore {
    async fn load_context(&self, session_id: ObjectId) -> Result<SessionContext, StoreError> {
        let session = self.sessions.find(session_id).await.map_err(store_err)?;
        Ok(SessionContext {
            interview_type: session.interview_type,
            spoken_language: session.spoken_language,
            profile: session.candidate_profile,
        })
    }

    async fn load_turns(&self, session_id: ObjectId) -> Result<Vec<TranscriptTurn>, StoreError> {
        self.turns
            .find_by_session(session_id)
            .await
            .map_err(store_err)
    }
}

/// Pipeline write side backed by the evaluation collection and the session
/// status field.
pub struct MongoEvaluationStore {
    sessions: Arc<SessionDao>,
    evaluations: Arc<EvaluationDao>,
}

impl MongoEvaluationStore {
    pub fn new(sessions: Arc<SessionDao>, evaluations: Arc<EvaluationDao>) -> Self {
        Self {
            sessions,
            evaluations,
        }
    }
}

#[async_trait]
impl EvaluationStore for MongoEvaluationStore {
    async fn save_evaluation(
        &self,
        session_id: ObjectId,
        result: &EvaluationResult,
    ) -> Result<(), StoreError> {
        self.evaluations
            .upsert(session_id, result)
            .await
            .map(|_| ())
            .map_err(store_err)
    }

    async fn find_evaluation(
        &self,
        session_id: ObjectId,
    ) -> Result<Option<EvaluationRecord>, StoreError> {
        self.evaluations
            .find_by_session(session_id)
            .await
            .map_err(store_err)
    }

    async fn mark_session_evaluated(&self, session_id: ObjectId) -> Result<(), StoreError> {
        self.sessions
            .mark_evaluated(session_id)
            .await
            .map(|_| ())
            .map_err(store_err)
    }
}
