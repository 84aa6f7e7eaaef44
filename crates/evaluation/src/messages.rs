use crate::config::EvaluationConfig;
use crate::gate::GateFailure;

/// Candidate-facing explanation for a refused evaluation, in the session's
/// spoken language. Unknown tags fall back to English.
pub fn rejection_message(
    reason: GateFailure,
    language_tag: &str,
    config: &EvaluationConfig,
) -> String {
    match language_tag {
        "zh-TW" => zh_tw(reason, config),
        _ => english(reason, config),
    }
}

fn english(reason: GateFailure, config: &EvaluationConfig) -> String {
    match reason {
        GateFailure::InsufficientTurns => format!(
            "This session is too short to evaluate. Answer at least {} questions and try again.",
            config.min_user_turns
        ),
        GateFailure::InsufficientWords => format!(
            "Your answers are too brief to evaluate. Speak at least {} words in total, \
             then request an evaluation.",
            config.min_total_words
        ),
        GateFailure::NoQuestionsAnswered => format!(
            "No answer was long enough to evaluate. Give at least one answer of {} words or more.",
            config.min_words_per_answer
        ),
    }
}

fn zh_tw(reason: GateFailure, config: &EvaluationConfig) -> String {
    match reason {
        GateFailure::InsufficientTurns => format!(
            "本次練習的回答次數不足，無法評估。請至少回答 {} 個問題後再試一次。",
            config.min_user_turns
        ),
        GateFailure::InsufficientWords => format!(
            "您的回答內容太少，無法評估。請至少講滿 {} 個字後再要求評估。",
            config.min_total_words
        ),
        GateFailure::NoQuestionsAnswered => format!(
            "沒有任何一個回答達到可評估的長度。請至少提供一個 {} 字以上的回答。",
            config.min_words_per_answer
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_interpolated() {
        let config = EvaluationConfig::default();
        let msg = rejection_message(GateFailure::InsufficientWords, "en", &config);
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_chinese_messages_resolve() {
        let config = EvaluationConfig::default();
        let msg = rejection_message(GateFailure::InsufficientTurns, "zh-TW", &config);
        assert!(msg.contains('2'));
        assert!(msg.contains("無法評估"));
    }

    #[test]
    fn test_unknown_tag_falls_back_to_english() {
        let config = EvaluationConfig::default();
        let msg = rejection_message(GateFailure::NoQuestionsAnswered, "fr", &config);
        assert!(msg.contains("10 words"));
    }
}
