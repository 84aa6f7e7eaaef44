use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Stored evaluation report, one per session (insert-or-update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub session_id: ObjectId,
    pub result: EvaluationResult,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl EvaluationRecord {
    pub const COLLECTION: &'static str = "evaluations";
}

/// A validated, bounded evaluation. Every score here has already passed the
/// clamping boundary; all four headline scores are integers in 1..=10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub overall_score: u32,
    pub clarity_score: u32,
    pub structure_score: u32,
    pub confidence_score: u32,
    #[serde(default)]
    pub competency_evaluations: Vec<CompetencyEvaluation>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub detailed_feedback: String,
}

/// Per-competency judgment tied to a 5-level rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyEvaluation {
    pub competency_id: String,
    pub competency_name: String,
    /// Rubric level 1..=5.
    pub level: u32,
    /// Numeric score 1..=10. By rubric convention this lies within the
    /// level's declared range; the validator does not re-derive it.
    pub score: u32,
    /// Direct quote from the transcript backing the judgment.
    pub evidence: String,
    #[serde(default)]
    pub matched_indicators: Vec<String>,
    pub feedback: String,
}
