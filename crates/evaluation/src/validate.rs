use prepcoach_db::models::{CompetencyEvaluation, EvaluationResult};
use serde::Deserialize;
use tracing::debug;

use crate::rubric::CompetencyRubric;

/// Cap on strengths/improvements/action-item list lengths.
const MAX_LIST_ITEMS: usize = 5;
/// Cap on the narrative feedback length, in characters.
const MAX_FEEDBACK_CHARS: usize = 2000;

/// The scoring service's response, exactly as returned. Every field is
/// optional or defaulted: structural parse failure is fatal upstream, but a
/// missing field never is.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvaluation {
    pub overall_score: Option<f64>,
    pub clarity_score: Option<f64>,
    pub structure_score: Option<f64>,
    pub confidence_score: Option<f64>,
    pub competency_evaluations: Vec<RawCompetencyEvaluation>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub action_items: Vec<String>,
    pub detailed_feedback: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCompetencyEvaluation {
    pub competency_id: String,
    pub competency_name: Option<String>,
    pub level: Option<f64>,
    pub score: Option<f64>,
    pub evidence: Option<String>,
    pub matched_indicators: Vec<String>,
    pub feedback: Option<String>,
}

/// The single clamping boundary between the untrusted scoring response and
/// the rest of the system. Nothing downstream ever sees an un-clamped or
/// partially-shaped result.
///
/// Headline scores are rounded and clamped to 1..=10 (missing scores become
/// 1). Competency entries with ids outside the resolved rubric set are
/// dropped. Levels clamp to 1..=5 and per-competency scores to 1..=10; the
/// level/score-range pairing itself is a documented trust boundary and is
/// not re-derived here.
pub fn validate(raw: RawEvaluation, rubrics: &[&CompetencyRubric]) -> EvaluationResult {
    let competency_evaluations: Vec<CompetencyEvaluation> = raw
        .competency_evaluations
        .into_iter()
        .filter_map(|entry| {
            let rubric = rubrics.iter().find(|r| r.id == entry.competency_id)?;
            Some(CompetencyEvaluation {
                competency_id: rubric.id.clone(),
                competency_name: entry
                    .competency_name
                    .unwrap_or_else(|| rubric.name.clone()),
                level: clamp_round(entry.level, 1, 5),
                score: clamp_round(entry.score, 1, 10),
                evidence: entry.evidence.unwrap_or_default(),
                matched_indicators: entry.matched_indicators,
                feedback: entry.feedback.unwrap_or_default(),
            })
        })
        .collect();

    if competency_evaluations.is_empty() {
        debug!("Scoring response contained no usable competency evaluations");
    }

    EvaluationResult {
        overall_score: clamp_round(raw.overall_score, 1, 10),
        clarity_score: clamp_round(raw.clarity_score, 1, 10),
        structure_score: clamp_round(raw.structure_score, 1, 10),
        confidence_score: clamp_round(raw.confidence_score, 1, 10),
        competency_evaluations,
        strengths: truncate_list(raw.strengths),
        improvements: truncate_list(raw.improvements),
        action_items: truncate_list(raw.action_items),
        detailed_feedback: truncate_chars(raw.detailed_feedback, MAX_FEEDBACK_CHARS),
    }
}

/// Rounds to the nearest integer and clamps into `lo..=hi`. Missing values
/// score the floor: no judgment is treated like no evidence.
fn clamp_round(value: Option<f64>, lo: u32, hi: u32) -> u32 {
    let rounded = value.unwrap_or(lo as f64).round();
    if !rounded.is_finite() {
        return lo;
    }
    (rounded.max(lo as f64).min(hi as f64)) as u32
}

fn truncate_list(mut items: Vec<String>) -> Vec<String> {
    items.truncate(MAX_LIST_ITEMS);
    items
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::RubricCatalog;

    fn parse(json: &str) -> RawEvaluation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_out_of_range_overall_is_clamped() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let raw = parse(r#"{ "overallScore": 13.7 }"#);
        let result = validate(raw, &catalog.for_category("behavioral"));
        assert_eq!(result.overall_score, 10);
    }

    #[test]
    fn test_fractional_scores_round_to_nearest() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let raw = parse(
            r#"{ "overallScore": 7.4, "clarityScore": 7.5, "structureScore": 0.2, "confidenceScore": -3 }"#,
        );
        let result = validate(raw, &catalog.for_category("behavioral"));
        assert_eq!(result.overall_score, 7);
        assert_eq!(result.clarity_score, 8);
        assert_eq!(result.structure_score, 1);
        assert_eq!(result.confidence_score, 1);
    }

    #[test]
    fn test_missing_fields_default_instead_of_failing() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let raw = parse(r#"{}"#);
        let result = validate(raw, &catalog.for_category("technical"));
        assert_eq!(result.overall_score, 1);
        assert!(result.competency_evaluations.is_empty());
        assert!(result.strengths.is_empty());
        assert!(result.improvements.is_empty());
        assert!(result.action_items.is_empty());
        assert_eq!(result.detailed_feedback, "");
    }

    #[test]
    fn test_unknown_competency_ids_are_dropped() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let raw = parse(
            r#"{
                "competencyEvaluations": [
                    { "competencyId": "time-travel", "level": 5, "score": 10 },
                    { "competencyId": "problem-solving", "level": 4, "score": 7,
                      "evidence": "I isolated the root cause", "feedback": "solid" }
                ]
            }"#,
        );
        let result = validate(raw, &catalog.for_category("technical"));
        assert_eq!(result.competency_evaluations.len(), 1);
        let entry = &result.competency_evaluations[0];
        assert_eq!(entry.competency_id, "problem-solving");
        assert_eq!(entry.competency_name, "Problem Solving");
        assert_eq!(entry.level, 4);
        assert_eq!(entry.score, 7);
    }

    #[test]
    fn test_competency_level_and_score_are_clamped() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let raw = parse(
            r#"{
                "competencyEvaluations": [
                    { "competencyId": "ownership", "level": 9, "score": 42 }
                ]
            }"#,
        );
        let result = validate(raw, &catalog.for_category("technical"));
        let entry = &result.competency_evaluations[0];
        assert_eq!(entry.level, 5);
        assert_eq!(entry.score, 10);
        assert_eq!(entry.evidence, "");
    }

    #[test]
    fn test_long_lists_are_truncated_to_five() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let raw = parse(
            r#"{ "strengths": ["a", "b", "c", "d", "e", "f", "g"] }"#,
        );
        let result = validate(raw, &catalog.for_category("behavioral"));
        assert_eq!(result.strengths.len(), 5);
    }

    #[test]
    fn test_feedback_is_bounded() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        let long = "字".repeat(5000);
        let raw = RawEvaluation {
            detailed_feedback: long,
            ..RawEvaluation::default()
        };
        let result = validate(raw, &catalog.for_category("behavioral"));
        assert_eq!(result.detailed_feedback.chars().count(), 2000);
    }
}
