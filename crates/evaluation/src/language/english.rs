use regex::Regex;

use super::{COMPETENCY_TAGS, LanguageProfile, star_family_count};

/// English phrase tables. Serves the "en" tag and doubles as the default
/// profile for unrecognized language tags.
pub struct EnglishProfile {
    situation: Regex,
    task: Regex,
    action: Regex,
    result: Regex,
    metrics: Regex,
    competencies: Vec<(&'static str, Regex)>,
}

impl EnglishProfile {
    pub fn new() -> Self {
        let competencies = COMPETENCY_TAGS
            .iter()
            .map(|&tag| (tag, re(competency_pattern(tag))))
            .collect();

        Self {
            situation: re(
                r"(?i)\b(at the time|when i was|in my (previous|last|first)|there was|we had a problem|back then|the situation|i was working (at|on)|during (my|a|the))\b",
            ),
            task: re(
                r"(?i)\b(my task|my goal|my job was|i was responsible|i was asked to|i needed to|i had to|we needed to|the objective)\b",
            ),
            action: re(
                r"(?i)\b(i decided|i led|i organized|i implemented|i built|i created|i set up|i reached out|i proposed|i took|so i|i worked with|i started)\b",
            ),
            result: re(
                r"(?i)\b(as a result|in the end|we achieved|the outcome|which led to|this resulted|improved|increased|reduced|saved|delivered|shipped|exceeded)\b",
            ),
            metrics: re(
                r#"(?i)\d+(\.\d+)?\s*(%|percent|people|person|users|customers|clients|engineers|times|x\b|hours?|days?|weeks?|months?|years?|dollars)|\$\s?\d"#,
            ),
            competencies,
        }
    }
}

impl Default for EnglishProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageProfile for EnglishProfile {
    fn tag(&self) -> &str {
        "en"
    }

    fn star_score(&self, text: &str) -> u8 {
        star_family_count(text, &self.situation, &self.task, &self.action, &self.result)
    }

    fn has_metrics(&self, text: &str) -> bool {
        self.metrics.is_match(text)
    }

    fn detect_competencies(&self, text: &str) -> Vec<String> {
        self.competencies
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(tag, _)| tag.to_string())
            .collect()
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern")
}

fn competency_pattern(tag: &str) -> &'static str {
    match tag {
        "leadership" => r"(?i)\b(lead|leads|led|leading|leader|leadership|mentor\w*|delegat\w*|coached)\b",
        "teamwork" => r"(?i)\b(team|teammates?|collaborat\w*|cross-functional|colleagues?|coworkers?|worked together)\b",
        "problem-solving" => {
            r"(?i)\b(problem|root cause|debug\w*|diagnos\w*|solv\w*|solution|troubleshoot\w*|analy[sz]\w*|investigat\w*)\b"
        }
        "communication" => {
            r"(?i)\b(communicat\w*|present\w*|explain\w*|persuad\w*|negotiat\w*|stakeholders?|wrote up|aligned)\b"
        }
        "pressure-handling" => {
            r"(?i)\b(deadline|under pressure|stress\w*|urgent|tight (timeline|schedule)|crunch|high-pressure|last minute)\b"
        }
        "conflict-resolution" => {
            r"(?i)\b(conflict|disagree\w*|mediat\w*|tension|dispute|compromise|common ground)\b"
        }
        "adaptability" => {
            r"(?i)\b(adapt\w*|pivot\w*|flexib\w*|adjust\w*|changed direction|new environment|shifted)\b"
        }
        "achievement" => {
            r"(?i)\b(achiev\w*|accomplish\w*|result|delivered|shipped|exceeded|award\w*|success\w*|impact|milestone)\b"
        }
        "learning" => {
            r"(?i)\b(learn\w*|studied|course|certificat\w*|upskill\w*|growth|picked up|taught myself)\b"
        }
        "ownership" => {
            r"(?i)\b(ownership|took charge|my responsibility|accountab\w*|initiative|proactive\w*|volunteer\w*|stepped up)\b"
        }
        _ => unreachable!("unknown competency tag"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_action_and_result() {
        let profile = EnglishProfile::new();
        let text = "I decided to lead the team and as a result we shipped 20% faster";
        assert!(profile.star_score(text) >= 2);
    }

    #[test]
    fn test_star_all_four_families() {
        let profile = EnglishProfile::new();
        let text = "At the time we had a problem with churn. My task was to fix onboarding. \
                    So I implemented a new flow. As a result retention improved.";
        assert_eq!(profile.star_score(text), 4);
    }

    #[test]
    fn test_star_no_cues() {
        let profile = EnglishProfile::new();
        assert_eq!(profile.star_score("Yes, that is correct."), 0);
    }

    #[test]
    fn test_metrics_percentage_and_currency() {
        let profile = EnglishProfile::new();
        assert!(profile.has_metrics("we shipped 20% faster"));
        assert!(profile.has_metrics("a team of 5 people"));
        assert!(profile.has_metrics("saved $40000 a year"));
        assert!(profile.has_metrics("improved 3x over six months"));
        assert!(!profile.has_metrics("we shipped much faster"));
    }

    #[test]
    fn test_competency_detection_order_is_catalog_order() {
        let profile = EnglishProfile::new();
        // "achievement" cues appear before "leadership" cues in the text,
        // but output follows catalog order.
        let text = "we delivered a big result because I led the effort";
        let detected = profile.detect_competencies(text);
        assert_eq!(detected[0], "leadership");
        assert!(detected.contains(&"achievement".to_string()));
    }

    #[test]
    fn test_competency_detection_case_insensitive() {
        let profile = EnglishProfile::new();
        assert!(
            profile
                .detect_competencies("I LED the MIGRATION")
                .contains(&"leadership".to_string())
        );
    }
}
