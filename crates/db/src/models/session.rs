use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub interview_type: InterviewType,
    /// BCP 47-ish spoken-language tag ("en", "zh-TW"). Unknown tags fall
    /// back to the default language profile at evaluation time.
    pub spoken_language: String,
    #[serde(default)]
    pub candidate_profile: CandidateProfile,
    /// Name of the external audio room this session is bound to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    pub status: SessionStatus,
    pub started_at: Option<DateTime>,
    pub ended_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

impl InterviewSession {
    pub const COLLECTION: &'static str = "sessions";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Behavioral,
    Technical,
    SystemDesign,
    CaseStudy,
}

impl InterviewType {
    /// The rubric-catalog category key for this interview type.
    pub fn category(&self) -> &'static str {
        match self {
            InterviewType::Behavioral => "behavioral",
            InterviewType::Technical => "technical",
            InterviewType::SystemDesign => "system-design",
            InterviewType::CaseStudy => "case-study",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    InProgress,
    Completed,
    Evaluated,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Created => "created",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Evaluated => "evaluated",
        }
    }
}

/// Candidate background supplied once at session creation.
///
/// All fields are optional; the evaluator renders an explicit
/// "unspecified" placeholder for anything absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Seniority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
    Lead,
    Executive,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Entry => "entry",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
            Seniority::Executive => "executive",
        }
    }
}
