use axum::{
    Json,
    extract::{Path, State},
};
use prepcoach_evaluation::{EvaluationOutcome, ExtractedFeatures};

use crate::{error::ApiError, routes::session::parse_session_id, state::AppState};

/// Runs the evaluation pipeline for a session. A gate rejection is a 200
/// with `can_evaluate: false`; the caller shows the message and lets the
/// candidate keep practicing.
pub async fn run(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sid = parse_session_id(&session_id)?;

    match state.pipeline.run(sid).await? {
        EvaluationOutcome::Rejected {
            reason,
            message,
            stats,
        } => Ok(Json(serde_json::json!({
            "can_evaluate": false,
            "reason": reason.as_str(),
            "message": message,
            "stats": stats,
        }))),
        EvaluationOutcome::Scored { result, features } => Ok(Json(serde_json::json!({
            "can_evaluate": true,
            "evaluation": result,
            "features": features_digest(&features),
        }))),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sid = parse_session_id(&session_id)?;
    state.sessions.find(sid).await?;

    let record = state
        .evaluations
        .find_by_session(sid)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session has not been evaluated".to_string()))?;

    Ok(Json(serde_json::json!({
        "session_id": record.session_id.to_hex(),
        "evaluation": record.result,
        "created_at": record.created_at.try_to_rfc3339_string().unwrap_or_default(),
        "updated_at": record.updated_at.try_to_rfc3339_string().unwrap_or_default(),
    })))
}

fn features_digest(features: &ExtractedFeatures) -> serde_json::Value {
    serde_json::json!({
        "total_answers": features.total_answers,
        "avg_words_per_answer": features.avg_words_per_answer,
        "has_star": features.has_star,
        "avg_star_score": features.avg_star_score,
        "has_metrics": features.has_metrics,
        "competencies_detected": features.competencies_detected,
    })
}
