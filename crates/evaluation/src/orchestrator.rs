use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use dashmap::DashSet;
use prepcoach_db::models::{
    CandidateProfile, EvaluationRecord, EvaluationResult, InterviewType, TranscriptTurn,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::EvaluationConfig;
use crate::evaluator::RubricEvaluator;
use crate::features::{self, ExtractedFeatures};
use crate::gate::{self, GateFailure, GateStats};
use crate::language::LanguageRegistry;
use crate::messages::rejection_message;
use crate::scorer::ScoringError;

/// What the pipeline needs to know about a session before evaluating it.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub interview_type: InterviewType,
    /// BCP 47-ish language tag recorded at session creation, e.g. "en".
    pub spoken_language: String,
    pub profile: CandidateProfile,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Store operation failed: {0}")]
    Backend(String),
}

/// Read side of the pipeline: session context and transcript turns.
#[async_trait]
pub trait TranscriptStore: Send + Sync + 'static {
    async fn load_context(&self, session_id: ObjectId) -> Result<SessionContext, StoreError>;

    /// All turns for a session. Order is not guaranteed; the pipeline sorts
    /// by timestamp before evaluating.
    async fn load_turns(&self, session_id: ObjectId) -> Result<Vec<TranscriptTurn>, StoreError>;
}

/// Write side of the pipeline: persisted evaluations and session status.
#[async_trait]
pub trait EvaluationStore: Send + Sync + 'static {
    /// Inserts the session's evaluation, replacing any previous one.
    async fn save_evaluation(
        &self,
        session_id: ObjectId,
        result: &EvaluationResult,
    ) -> Result<(), StoreError>;

    async fn find_evaluation(
        &self,
        session_id: ObjectId,
    ) -> Result<Option<EvaluationRecord>, StoreError>;

    async fn mark_session_evaluated(&self, session_id: ObjectId) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("An evaluation for this session is already running")]
    AlreadyRunning,
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("Store operation failed: {0}")]
    Store(String),
}

impl From<StoreError> for EvaluationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound => EvaluationError::SessionNotFound,
            StoreError::Backend(detail) => EvaluationError::Store(detail),
        }
    }
}

/// Terminal result of one pipeline run. A gate rejection is a successful
/// run, not an error; nothing is persisted for it.
#[derive(Debug, Clone)]
pub enum EvaluationOutcome {
    Rejected {
        reason: GateFailure,
        /// Candidate-facing explanation in the session's spoken language.
        message: String,
        stats: GateStats,
    },
    Scored {
        result: EvaluationResult,
        features: ExtractedFeatures,
    },
}

/// The evaluation pipeline: gate, feature extraction, rubric scoring, and
/// persistence, in that order.
///
/// At most one run per session is in flight at a time; a concurrent request
/// for the same session fails fast with `AlreadyRunning` instead of racing
/// the first run to the single-evaluation-per-session record.
pub struct EvaluationPipeline {
    transcripts: Arc<dyn TranscriptStore>,
    evaluations: Arc<dyn EvaluationStore>,
    evaluator: RubricEvaluator,
    languages: LanguageRegistry,
    config: EvaluationConfig,
    in_flight: DashSet<ObjectId>,
}

impl EvaluationPipeline {
    pub fn new(
        transcripts: Arc<dyn TranscriptStore>,
        evaluations: Arc<dyn EvaluationStore>,
        evaluator: RubricEvaluator,
        languages: LanguageRegistry,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            transcripts,
            evaluations,
            evaluator,
            languages,
            config,
            in_flight: DashSet::new(),
        }
    }

    /// Runs the full pipeline for one session.
    pub async fn run(&self, session_id: ObjectId) -> Result<EvaluationOutcome, EvaluationError> {
        if !self.in_flight.insert(session_id) {
            warn!(%session_id, "Evaluation already in flight for session");
            return Err(EvaluationError::AlreadyRunning);
        }

        let outcome = self.run_inner(session_id).await;
        self.in_flight.remove(&session_id);
        outcome
    }

    async fn run_inner(
        &self,
        session_id: ObjectId,
    ) -> Result<EvaluationOutcome, EvaluationError> {
        let context = self.transcripts.load_context(session_id).await?;
        let mut turns = self.transcripts.load_turns(session_id).await?;
        turns.sort_by_key(|t| t.timestamp);

        let gate = gate::admit(&turns, &self.config);
        if let Some(reason) = gate.reason {
            info!(
                %session_id,
                reason = reason.as_str(),
                user_turns = gate.stats.user_turns,
                total_user_words = gate.stats.total_user_words,
                "Transcript rejected before scoring"
            );
            return Ok(EvaluationOutcome::Rejected {
                reason,
                message: rejection_message(reason, &context.spoken_language, &self.config),
                stats: gate.stats,
            });
        }

        let profile = self.languages.resolve(&context.spoken_language);
        let extracted = features::extract(&turns, profile.as_ref(), &self.config);

        let result = self
            .evaluator
            .evaluate(
                context.interview_type.category(),
                &turns,
                &extracted,
                &context.profile,
            )
            .await?;

        if self.evaluations.find_evaluation(session_id).await?.is_some() {
            info!(%session_id, "Replacing existing evaluation for session");
        }
        self.evaluations.save_evaluation(session_id, &result).await?;
        self.evaluations.mark_session_evaluated(session_id).await?;

        info!(
            %session_id,
            overall = result.overall_score,
            answers = extracted.total_answers,
            "Evaluation persisted"
        );

        Ok(EvaluationOutcome::Scored {
            result,
            features: extracted,
        })
    }
}
