use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Category, Entities, Session};
use crate::services::{conversation, responder};
use crate::state::AppState;

const UNAVAILABLE_REPLY: &str = "Sorry, I'm having trouble right now. Please try again in a moment.";

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub welcome: String,
}

// POST /api/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let session = Session::new(state.config.session_ttl_minutes);
    {
        let db = state.db();
        queries::save_session(&db, &session)?;
    }

    tracing::info!(session = %session.id, "session started");

    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id,
            welcome: responder::welcome(&state.knowledge),
        }),
    ))
}

// DELETE /api/sessions/:id
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = {
        let db = state.db();
        queries::delete_session(&db, &id)?
    };

    if !deleted {
        return Err(AppError::NotFound(format!("session {id}")));
    }

    tracing::info!(session = %id, "session ended");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    pub fallback: bool,
}

// POST /api/chat
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let body = payload.message.trim();

    // Blank input is dropped before it becomes a turn
    if body.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    match process_chat(&state, payload.session_id.as_deref(), body) {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!(error = %e, session = ?payload.session_id, "chat processing failed");
            Json(ChatResponse {
                session_id: payload.session_id,
                reply: UNAVAILABLE_REPLY.to_string(),
                intent: None,
                confidence: None,
                entities: None,
                fallback: true,
            })
            .into_response()
        }
    }
}

fn process_chat(
    state: &AppState,
    session_id: Option<&str>,
    message: &str,
) -> anyhow::Result<ChatResponse> {
    let ttl = state.config.session_ttl_minutes;
    let db = state.db();

    queries::expire_old_sessions(&db)?;

    let mut session = match session_id {
        Some(id) => queries::get_session(&db, id)?,
        None => None,
    }
    .unwrap_or_else(|| {
        let session = Session::new(ttl);
        tracing::info!(session = %session.id, "session started");
        session
    });

    let Some(reply) = conversation::process_message(
        &mut session,
        message,
        &state.knowledge,
        state.picker.as_ref(),
    ) else {
        anyhow::bail!("blank message reached the conversation engine");
    };

    session.touch(ttl);
    queries::record_turn(&db, &session)?;

    let classification = reply.classification();
    Ok(ChatResponse {
        session_id: Some(session.id.clone()),
        reply: reply.text().to_string(),
        intent: Some(classification.category),
        confidence: Some(classification.confidence),
        entities: Some(classification.entities.clone()),
        fallback: reply.is_fallback(),
    })
}
