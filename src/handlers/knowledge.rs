use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

// GET /api/knowledge/tips/:category
pub async fn get_health_tips(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Value>, AppError> {
    let tips = state
        .knowledge
        .health_tips(&category)
        .ok_or_else(|| AppError::NotFound(format!("health tip category {category}")))?;

    Ok(Json(json!({ "category": category, "tips": tips })))
}
