use std::fmt::Write;

use prepcoach_db::models::{CandidateProfile, SpeakerRole, TranscriptTurn};

use crate::features::ExtractedFeatures;
use crate::rubric::CompetencyRubric;

/// Fixed system rules sent with every scoring call.
pub const SYSTEM_RULES: &str = "\
You are a strict interview assessor. Score the candidate against the \
provided rubrics only. Rules: (1) every piece of evidence must be a direct \
quote from the transcript; (2) if you cannot quote evidence for a \
competency, its level must be 1 or 2; (3) the overall score must be the \
aggregate of the competency scores, not an independent judgment; (4) reply \
with a single JSON object exactly matching the requested shape, nothing \
else.";

const UNSPECIFIED: &str = "unspecified";

/// Composes the full per-session scoring prompt: rubrics, candidate
/// profile, extracted features, transcript, and the required output shape.
pub fn build_prompt(
    rubrics: &[&CompetencyRubric],
    turns: &[TranscriptTurn],
    features: &ExtractedFeatures,
    profile: &CandidateProfile,
    category: &str,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Interview category: {category}\n");

    out.push_str("## Scoring rubrics\n\n");
    out.push_str(&render_rubrics(rubrics));

    out.push_str("\n## Candidate profile\n\n");
    out.push_str(&render_profile(profile));

    out.push_str("\n## Automated transcript features\n\n");
    out.push_str(&render_features(features));

    out.push_str("\n## Transcript\n\n");
    out.push_str(&render_transcript(turns));

    out.push_str("\n## Required output\n\n");
    out.push_str(&render_output_shape(rubrics));

    out
}

/// Full 5-level rubric text, in catalog order.
pub fn render_rubrics(rubrics: &[&CompetencyRubric]) -> String {
    let mut out = String::new();
    for rubric in rubrics {
        let _ = writeln!(out, "### {} (id: {})", rubric.name, rubric.id);
        for level in &rubric.levels {
            let _ = writeln!(
                out,
                "- Level {} (score {}-{}): {} Indicators: {}.",
                level.level,
                level.score_range[0],
                level.score_range[1],
                level.description,
                level.indicators.join("; "),
            );
        }
        out.push('\n');
    }
    out
}

/// Role-labeled transcript block, one line per turn, in given order.
pub fn render_transcript(turns: &[TranscriptTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let label = match turn.role {
            SpeakerRole::Candidate => "Candidate",
            SpeakerRole::Interviewer => "Interviewer",
        };
        let _ = writeln!(out, "{label}: {}", turn.text);
    }
    out
}

/// Compact human-readable digest of the extracted features.
pub fn render_features(features: &ExtractedFeatures) -> String {
    let competencies = if features.competencies_detected.is_empty() {
        "none detected".to_string()
    } else {
        features.competencies_detected.join(", ")
    };
    format!(
        "Qualifying answers: {}. Average words per answer: {:.1}. \
         STAR structure: {} (average {:.2}/4). Quantified outcomes: {}. \
         Competency cues detected: {}.\n",
        features.total_answers,
        features.avg_words_per_answer,
        if features.has_star { "present" } else { "absent" },
        features.avg_star_score,
        if features.has_metrics { "yes" } else { "no" },
        competencies,
    )
}

/// Labeled profile block with explicit placeholders for absent fields.
pub fn render_profile(profile: &CandidateProfile) -> String {
    let years = profile
        .years_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| UNSPECIFIED.to_string());
    format!(
        "Target role: {}\nSeniority: {}\nIndustry: {}\nYears of experience: {}\n",
        profile.role.as_deref().unwrap_or(UNSPECIFIED),
        profile
            .seniority
            .map(|s| s.as_str())
            .unwrap_or(UNSPECIFIED),
        profile.industry.as_deref().unwrap_or(UNSPECIFIED),
        years,
    )
}

fn render_output_shape(rubrics: &[&CompetencyRubric]) -> String {
    let ids: Vec<&str> = rubrics.iter().map(|r| r.id.as_str()).collect();
    format!(
        "Return a JSON object with these keys: overallScore, clarityScore, \
         structureScore, confidenceScore (integers 1-10); \
         competencyEvaluations: an array with exactly one entry per \
         competency id in [{}], each entry an object with competencyId, \
         competencyName, level (1-5), score (1-10, within the level's \
         range), evidence (direct quote), matchedIndicators (array of \
         strings), feedback (one short paragraph); strengths, improvements, \
         actionItems: arrays of at most 5 short strings; detailedFeedback: \
         one paragraph.\n",
        ids.join(", "),
    )
}
