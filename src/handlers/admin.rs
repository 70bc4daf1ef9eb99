use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::db::queries::{self, SessionStats};
use crate::errors::AppError;
use crate::models::Session;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/status
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionStats>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let stats = {
        let db = state.db();
        queries::get_session_stats(&db)?
    };

    Ok(Json(stats))
}

// GET /api/admin/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Session>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let session = {
        let db = state.db();
        queries::get_session(&db, &id)?
    };

    session
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))
}
