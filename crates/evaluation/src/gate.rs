use prepcoach_db::models::{SpeakerRole, TranscriptTurn};
use serde::Serialize;

use crate::config::EvaluationConfig;
use crate::text::count_words;

/// Why a transcript was refused admission to scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateFailure {
    InsufficientTurns,
    InsufficientWords,
    NoQuestionsAnswered,
}

impl GateFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateFailure::InsufficientTurns => "insufficient_turns",
            GateFailure::InsufficientWords => "insufficient_words",
            GateFailure::NoQuestionsAnswered => "no_questions_answered",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GateStats {
    pub user_turns: usize,
    pub total_user_words: usize,
    pub questions_answered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResult {
    pub passed: bool,
    pub reason: Option<GateFailure>,
    pub stats: GateStats,
}

/// Admission check over raw turns. Pure and cheap so it always runs before
/// any scoring cost is incurred.
///
/// Failure reasons are checked in fixed priority order (turns, then words,
/// then answered questions); the first violated rule wins.
pub fn admit(turns: &[TranscriptTurn], config: &EvaluationConfig) -> GateResult {
    let mut stats = GateStats::default();

    for turn in turns {
        if turn.role != SpeakerRole::Candidate {
            continue;
        }
        let words = count_words(&turn.text);
        stats.user_turns += 1;
        stats.total_user_words += words;
        if words >= config.min_words_per_answer {
            stats.questions_answered += 1;
        }
    }

    let reason = if stats.user_turns < config.min_user_turns {
        Some(GateFailure::InsufficientTurns)
    } else if stats.total_user_words < config.min_total_words {
        Some(GateFailure::InsufficientWords)
    } else if stats.questions_answered < 1 {
        Some(GateFailure::NoQuestionsAnswered)
    } else {
        None
    };

    GateResult {
        passed: reason.is_none(),
        reason,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{DateTime, oid::ObjectId};

    fn turn(role: SpeakerRole, text: &str) -> TranscriptTurn {
        TranscriptTurn {
            id: None,
            session_id: ObjectId::new(),
            role,
            text: text.to_string(),
            timestamp: DateTime::now(),
            created_at: DateTime::now(),
        }
    }

    fn candidate(text: &str) -> TranscriptTurn {
        turn(SpeakerRole::Candidate, text)
    }

    #[test]
    fn test_single_short_answer_fails_on_turns() {
        let turns = vec![
            turn(SpeakerRole::Interviewer, "Tell me about yourself"),
            candidate("I am a developer"),
        ];
        let result = admit(&turns, &EvaluationConfig::default());
        assert!(!result.passed);
        assert_eq!(result.reason, Some(GateFailure::InsufficientTurns));
        assert_eq!(result.stats.user_turns, 1);
    }

    #[test]
    fn test_turn_check_takes_priority_over_words() {
        // One long candidate turn: both thresholds are relevant, but the
        // turn count is reported first.
        let turns = vec![candidate("short")];
        let result = admit(&turns, &EvaluationConfig::default());
        assert_eq!(result.reason, Some(GateFailure::InsufficientTurns));
    }

    #[test]
    fn test_enough_turns_but_too_few_words() {
        let turns = vec![candidate("yes I did"), candidate("no not really sure")];
        let result = admit(&turns, &EvaluationConfig::default());
        assert!(!result.passed);
        assert_eq!(result.reason, Some(GateFailure::InsufficientWords));
    }

    #[test]
    fn test_enough_words_but_no_full_answer() {
        // Five candidate turns of 7 words each: 35 total words, none >= 10.
        let turns: Vec<_> = (0..5)
            .map(|_| candidate("one two three four five six seven"))
            .collect();
        let result = admit(&turns, &EvaluationConfig::default());
        assert!(!result.passed);
        assert_eq!(result.reason, Some(GateFailure::NoQuestionsAnswered));
        assert_eq!(result.stats.total_user_words, 35);
        assert_eq!(result.stats.questions_answered, 0);
    }

    #[test]
    fn test_passing_transcript_reports_exact_stats() {
        let turns = vec![
            turn(SpeakerRole::Interviewer, "First question?"),
            candidate(
                "I led a migration project covering twelve services over two quarters with a small platform team",
            ),
            turn(SpeakerRole::Interviewer, "And then?"),
            candidate("We finished early and the team reduced incident volume by a lot in the next quarter"),
            candidate("thanks"),
        ];
        let result = admit(&turns, &EvaluationConfig::default());
        assert!(result.passed);
        assert_eq!(result.reason, None);
        assert_eq!(result.stats.user_turns, 3);
        assert_eq!(result.stats.total_user_words, 16 + 16 + 1);
        assert_eq!(result.stats.questions_answered, 2);
    }

    #[test]
    fn test_interviewer_turns_do_not_count() {
        let turns = vec![
            turn(SpeakerRole::Interviewer, "a very long question with many many words in it indeed"),
            turn(SpeakerRole::Interviewer, "another long question with many many words in it too"),
        ];
        let result = admit(&turns, &EvaluationConfig::default());
        assert_eq!(result.stats.user_turns, 0);
        assert_eq!(result.reason, Some(GateFailure::InsufficientTurns));
    }

    #[test]
    fn test_cjk_transcript_word_counting() {
        // 20 ideographs per turn, two turns: passes words and answers.
        let text = "我當時負責帶領一個五人的團隊完成年度的系統搬遷專案";
        let turns = vec![candidate(text), candidate(text)];
        let result = admit(&turns, &EvaluationConfig::default());
        assert!(result.passed);
        assert_eq!(result.stats.questions_answered, 2);
    }

    #[test]
    fn test_empty_input() {
        let result = admit(&[], &EvaluationConfig::default());
        assert!(!result.passed);
        assert_eq!(result.reason, Some(GateFailure::InsufficientTurns));
        assert_eq!(result.stats, GateStats::default());
    }
}
