use std::sync::Arc;

use prepcoach_db::models::{CandidateProfile, EvaluationResult, TranscriptTurn};
use tracing::{info, warn};

use crate::features::ExtractedFeatures;
use crate::prompt::{SYSTEM_RULES, build_prompt};
use crate::rubric::RubricCatalog;
use crate::scorer::{ScoringBackend, ScoringError, ScoringRequest};
use crate::validate::{RawEvaluation, validate};

/// Scores an admitted transcript against the rubric set for its interview
/// category. One prompt, one scoring call, one pass through the validation
/// boundary. Retrying a transient failure is the caller's decision.
pub struct RubricEvaluator {
    catalog: Arc<RubricCatalog>,
    backend: Arc<dyn ScoringBackend>,
}

impl RubricEvaluator {
    pub fn new(catalog: Arc<RubricCatalog>, backend: Arc<dyn ScoringBackend>) -> Self {
        Self { catalog, backend }
    }

    pub async fn evaluate(
        &self,
        category: &str,
        turns: &[TranscriptTurn],
        features: &ExtractedFeatures,
        profile: &CandidateProfile,
    ) -> Result<EvaluationResult, ScoringError> {
        let rubrics = self.catalog.for_category(category);
        if rubrics.is_empty() {
            warn!(%category, "No rubrics mapped to interview category");
        }

        let request = ScoringRequest {
            system: SYSTEM_RULES.to_string(),
            user: build_prompt(&rubrics, turns, features, profile, category),
        };

        let response = self.backend.score(request).await?;

        let raw: RawEvaluation = serde_json::from_str(&response)
            .map_err(|e| ScoringError::MalformedResponse(e.to_string()))?;

        let result = validate(raw, &rubrics);
        info!(
            backend = self.backend.name(),
            %category,
            overall = result.overall_score,
            competencies = result.competency_evaluations.len(),
            "Transcript scored"
        );
        Ok(result)
    }
}
