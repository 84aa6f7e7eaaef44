use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use prepcoach_db::models::{
    CandidateProfile, InterviewSession, InterviewType, SpeakerRole, TranscriptTurn,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    pub interview_type: InterviewType,
    #[serde(default = "default_language")]
    #[validate(length(min = 2, max = 16))]
    pub spoken_language: String,
    #[serde(default)]
    pub candidate_profile: CandidateProfile,
    #[validate(length(min = 1, max = 128))]
    pub room_name: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddTurnRequest {
    pub role: SpeakerRole,
    #[validate(length(max = 20000))]
    pub text: String,
    /// When the utterance was spoken, RFC 3339. Defaults to receipt time.
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub interview_type: InterviewType,
    pub spoken_language: String,
    pub candidate_profile: CandidateProfile,
    pub room_name: Option<String>,
    pub status: String,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub id: String,
    pub session_id: String,
    pub role: SpeakerRole,
    pub text: String,
    pub timestamp: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let session = state
        .sessions
        .create(
            req.interview_type,
            req.spoken_language,
            req.candidate_profile,
            req.room_name,
        )
        .await?;

    Ok(Json(to_session_response(session)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let sid = parse_session_id(&session_id)?;
    let session = state.sessions.find(sid).await?;
    Ok(Json(to_session_response(session)))
}

/// Appends one transcript turn. Turns below the minimum character length
/// are acknowledged but not stored; live transcription produces a steady
/// drizzle of "ok" and "mm" fragments that would only dilute evaluation.
pub async fn add_turn(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AddTurnRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let sid = parse_session_id(&session_id)?;
    // 404 before ingest decisions
    state.sessions.find(sid).await?;

    let text = req.text.trim();
    if text.chars().count() < state.settings.evaluation.min_turn_chars {
        return Ok(Json(serde_json::json!({
            "stored": false,
            "reason": "too_short",
        })));
    }

    let timestamp = req
        .timestamp
        .map(bson::DateTime::from_chrono)
        .unwrap_or_else(bson::DateTime::now);

    let turn = state
        .turns
        .append(sid, req.role, text.to_string(), timestamp)
        .await?;

    state.sessions.mark_in_progress(sid).await?;

    Ok(Json(serde_json::json!({
        "stored": true,
        "turn": to_turn_response(turn),
    })))
}

pub async fn list_turns(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sid = parse_session_id(&session_id)?;
    state.sessions.find(sid).await?;

    let turns = state.turns.find_by_session(sid).await?;
    let items: Vec<TurnResponse> = turns.into_iter().map(to_turn_response).collect();

    Ok(Json(serde_json::json!({
        "total": items.len(),
        "items": items,
    })))
}

pub(crate) fn parse_session_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid session_id".to_string()))
}

fn to_session_response(s: InterviewSession) -> SessionResponse {
    SessionResponse {
        id: s.id.map(|id| id.to_hex()).unwrap_or_default(),
        interview_type: s.interview_type,
        spoken_language: s.spoken_language,
        candidate_profile: s.candidate_profile,
        room_name: s.room_name,
        status: s.status.as_str().to_string(),
        started_at: s.started_at.and_then(|t| t.try_to_rfc3339_string().ok()),
        ended_at: s.ended_at.and_then(|t| t.try_to_rfc3339_string().ok()),
        created_at: s.created_at.try_to_rfc3339_string().unwrap_or_default(),
    }
}

fn to_turn_response(t: TranscriptTurn) -> TurnResponse {
    TurnResponse {
        id: t.id.map(|id| id.to_hex()).unwrap_or_default(),
        session_id: t.session_id.to_hex(),
        role: t.role,
        text: t.text,
        timestamp: t.timestamp.try_to_rfc3339_string().unwrap_or_default(),
    }
}
