use serde::{Deserialize, Serialize};

/// Tunables for the evaluation pipeline's admission gate and feature
/// extraction. Defaults match the product thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Minimum candidate-authored turns before a transcript is scoreable.
    pub min_user_turns: usize,
    /// Minimum total candidate words before a transcript is scoreable.
    pub min_total_words: usize,
    /// Minimum words for a turn to count as an answered question. Shared by
    /// the gate and the feature extractor's `total_answers`.
    pub min_words_per_answer: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            min_user_turns: 2,
            min_total_words: 30,
            min_words_per_answer: 10,
        }
    }
}
