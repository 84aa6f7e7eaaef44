pub mod chinese;
pub mod english;

use std::sync::Arc;

use tracing::warn;

pub use chinese::ChineseProfile;
pub use english::EnglishProfile;

/// The fixed competency tag catalog, in output order. Detection results and
/// the rubric catalog both follow this ordering.
pub const COMPETENCY_TAGS: [&str; 10] = [
    "leadership",
    "teamwork",
    "problem-solving",
    "communication",
    "pressure-handling",
    "conflict-resolution",
    "adaptability",
    "achievement",
    "learning",
    "ownership",
];

/// Language-specific text analysis capabilities.
///
/// One profile per supported spoken language; profiles are pure and safe to
/// share across sessions.
pub trait LanguageProfile: Send + Sync + 'static {
    /// Exact-match language tag this profile serves (e.g. "en", "zh-TW").
    fn tag(&self) -> &str;

    /// How many STAR phrase families (situation, task, action, result) the
    /// turn text matches. Bounded to 0..=4 by construction.
    fn star_score(&self, text: &str) -> u8;

    /// Whether the text quantifies outcomes: numbers next to percentages,
    /// currency, counts of people/items, or duration units.
    fn has_metrics(&self, text: &str) -> bool;

    /// Competency tags whose phrase pattern matches the text at least once,
    /// in `COMPETENCY_TAGS` order.
    fn detect_competencies(&self, text: &str) -> Vec<String>;
}

/// Registry of language profiles with one designated default.
///
/// Resolution is an exact tag match; unrecognized tags fall back to the
/// default profile rather than erroring.
pub struct LanguageRegistry {
    profiles: Vec<Arc<dyn LanguageProfile>>,
    default_tag: String,
}

impl LanguageRegistry {
    pub fn new(profiles: Vec<Arc<dyn LanguageProfile>>, default_tag: impl Into<String>) -> Self {
        Self {
            profiles,
            default_tag: default_tag.into(),
        }
    }

    /// The built-in registry: English (default) and Traditional Chinese.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                Arc::new(EnglishProfile::new()),
                Arc::new(ChineseProfile::new()),
            ],
            "en",
        )
    }

    pub fn resolve(&self, tag: &str) -> Arc<dyn LanguageProfile> {
        if let Some(profile) = self.profiles.iter().find(|p| p.tag() == tag) {
            return Arc::clone(profile);
        }

        if let Some(profile) = self.profiles.iter().find(|p| p.tag() == self.default_tag) {
            warn!(requested = %tag, fallback = %self.default_tag, "Unknown language tag, using default profile");
            return Arc::clone(profile);
        }

        // The registry is always constructed with its default present; this
        // arm only fires on a misconfigured custom registry.
        Arc::clone(&self.profiles[0])
    }

    pub fn available_tags(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.tag().to_string()).collect()
    }
}

/// Per-turn STAR scoring shared by the concrete profiles: one point per
/// independently matched phrase family.
pub(crate) fn star_family_count(
    text: &str,
    situation: &regex::Regex,
    task: &regex::Regex,
    action: &regex::Regex,
    result: &regex::Regex,
) -> u8 {
    [situation, task, action, result]
        .iter()
        .filter(|family| family.is_match(text))
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact_match() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.resolve("zh-TW").tag(), "zh-TW");
        assert_eq!(registry.resolve("en").tag(), "en");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_default() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.resolve("fr").tag(), "en");
        assert_eq!(registry.resolve("").tag(), "en");
        // Near-miss tags are not fuzzy-matched
        assert_eq!(registry.resolve("zh").tag(), "en");
    }
}
