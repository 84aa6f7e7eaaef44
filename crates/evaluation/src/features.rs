use prepcoach_db::models::{SpeakerRole, TranscriptTurn};
use serde::Serialize;

use crate::config::EvaluationConfig;
use crate::language::LanguageProfile;
use crate::text::count_words;

/// Deterministic feature summary of the candidate's side of a transcript.
///
/// Reproducible for identical input; never errors — empty input yields
/// zeros and an empty competency set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFeatures {
    /// Candidate turns meeting the minimum-words-per-answer threshold.
    pub total_answers: usize,
    pub avg_words_per_answer: f64,
    /// True if any single turn matched at least two STAR families.
    pub has_star: bool,
    /// Mean STAR family count across candidate turns, 0.0..=4.0.
    pub avg_star_score: f64,
    pub has_metrics: bool,
    /// Detected competency tags, in catalog order.
    pub competencies_detected: Vec<String>,
}

pub fn extract(
    turns: &[TranscriptTurn],
    profile: &dyn LanguageProfile,
    config: &EvaluationConfig,
) -> ExtractedFeatures {
    let candidate_texts: Vec<&str> = turns
        .iter()
        .filter(|t| t.role == SpeakerRole::Candidate)
        .map(|t| t.text.as_str())
        .collect();

    if candidate_texts.is_empty() {
        return ExtractedFeatures::default();
    }

    let mut total_words = 0usize;
    let mut total_answers = 0usize;
    let mut star_sum = 0u32;
    let mut has_star = false;

    for text in &candidate_texts {
        let words = count_words(text);
        total_words += words;
        if words >= config.min_words_per_answer {
            total_answers += 1;
        }

        let star = profile.star_score(text);
        star_sum += u32::from(star);
        if star >= 2 {
            has_star = true;
        }
    }

    // Metric usage and competency cues are tested over the concatenation so
    // phrases split across turn boundaries don't multiply-count.
    let concatenated = candidate_texts.join("\n");

    ExtractedFeatures {
        total_answers,
        avg_words_per_answer: total_words as f64 / candidate_texts.len() as f64,
        has_star,
        avg_star_score: f64::from(star_sum) / candidate_texts.len() as f64,
        has_metrics: profile.has_metrics(&concatenated),
        competencies_detected: profile.detect_competencies(&concatenated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{EnglishProfile, LanguageRegistry};
    use bson::{DateTime, oid::ObjectId};

    fn candidate(text: &str) -> TranscriptTurn {
        TranscriptTurn {
            id: None,
            session_id: ObjectId::new(),
            role: SpeakerRole::Candidate,
            text: text.to_string(),
            timestamp: DateTime::now(),
            created_at: DateTime::now(),
        }
    }

    fn interviewer(text: &str) -> TranscriptTurn {
        TranscriptTurn {
            role: SpeakerRole::Interviewer,
            ..candidate(text)
        }
    }

    #[test]
    fn test_empty_input_yields_zeros() {
        let profile = EnglishProfile::new();
        let features = extract(&[], &profile, &EvaluationConfig::default());
        assert_eq!(features, ExtractedFeatures::default());
    }

    #[test]
    fn test_star_metrics_and_competencies() {
        let profile = EnglishProfile::new();
        let turns = vec![candidate(
            "I decided to lead the team and as a result we shipped 20% faster",
        )];
        let features = extract(&turns, &profile, &EvaluationConfig::default());

        assert!(features.has_star);
        assert!(features.avg_star_score >= 2.0);
        assert!(features.has_metrics);
        assert!(features.competencies_detected.contains(&"leadership".to_string()));
        assert!(features.competencies_detected.contains(&"achievement".to_string()));
    }

    #[test]
    fn test_has_star_requires_two_families_in_one_turn() {
        let profile = EnglishProfile::new();
        // One family per turn: avg is 1.0 but no single turn reaches 2.
        let turns = vec![
            candidate("I decided to refactor the module"),
            candidate("at the time we were behind"),
        ];
        let features = extract(&turns, &profile, &EvaluationConfig::default());
        assert!(!features.has_star);
        assert!((features.avg_star_score - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_avg_star_score_bounds() {
        let profile = EnglishProfile::new();
        let dense = "At the time we had a problem. My task was clear. So I implemented it. \
                     As a result it improved.";
        let turns = vec![candidate(dense), candidate(dense)];
        let features = extract(&turns, &profile, &EvaluationConfig::default());
        assert!((features.avg_star_score - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_total_answers_uses_gate_threshold() {
        let profile = EnglishProfile::new();
        let turns = vec![
            candidate("short answer here"),
            candidate("this is a much longer answer that clears the ten word minimum easily"),
        ];
        let features = extract(&turns, &profile, &EvaluationConfig::default());
        assert_eq!(features.total_answers, 1);
        // 3 words + 13 words over 2 turns
        assert!((features.avg_words_per_answer - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_interviewer_text_is_ignored() {
        let profile = EnglishProfile::new();
        let turns = vec![
            interviewer("Tell me about a time you led a team to a 50% improvement"),
            candidate("It went fine overall I think"),
        ];
        let features = extract(&turns, &profile, &EvaluationConfig::default());
        assert!(!features.has_metrics);
        assert!(!features.competencies_detected.contains(&"leadership".to_string()));
    }

    #[test]
    fn test_competency_set_is_deterministic_across_turn_order() {
        let profile = EnglishProfile::new();
        let a = candidate("I led the effort to fix it");
        let b = candidate("we worked as a team to debug the problem");
        let forward = extract(
            &[a.clone(), b.clone()],
            &profile,
            &EvaluationConfig::default(),
        );
        let reversed = extract(&[b, a], &profile, &EvaluationConfig::default());
        assert_eq!(forward.competencies_detected, reversed.competencies_detected);
    }

    #[test]
    fn test_chinese_profile_via_registry() {
        let registry = LanguageRegistry::builtin();
        let profile = registry.resolve("zh-TW");
        let turns = vec![candidate(
            "當時我負責帶領團隊，於是我重新規劃流程，最終效率提升了3倍",
        )];
        let features = extract(&turns, profile.as_ref(), &EvaluationConfig::default());
        assert!(features.has_star);
        assert!(features.has_metrics);
        assert!(features.competencies_detected.contains(&"leadership".to_string()));
    }
}
