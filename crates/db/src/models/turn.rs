use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// One utterance in an interview transcript. Immutable once persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptTurn {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub session_id: ObjectId,
    pub role: SpeakerRole,
    pub text: String,
    /// When the utterance was spoken. Turns are ordered ascending by this.
    pub timestamp: DateTime,
    pub created_at: DateTime,
}

impl TranscriptTurn {
    pub const COLLECTION: &'static str = "turns";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    Candidate,
    Interviewer,
}
