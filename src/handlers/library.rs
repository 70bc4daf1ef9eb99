use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::Condition;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// GET /api/library/search?q=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    let q = query.q.unwrap_or_default();
    let results = state.library.search(&q);
    Json(json!({ "query": q, "results": results }))
}

// GET /api/library/conditions/:id
pub async fn get_condition(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Condition>, AppError> {
    state
        .library
        .condition(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("condition {id}")))
}

// GET /api/library/categories/:category
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<Value> {
    let conditions = state.library.category_conditions(&category);
    Json(json!({ "category": category, "conditions": conditions }))
}
