pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/sessions", post(handlers::chat::create_session))
        .route("/api/sessions/:id", delete(handlers::chat::end_session))
        .route("/api/chat", post(handlers::chat::send_message))
        .route(
            "/api/knowledge/tips/:category",
            get(handlers::knowledge::get_health_tips),
        )
        .route("/api/admin/status", get(handlers::admin::get_status))
        .route("/api/admin/sessions/:id", get(handlers::admin::get_session))
        .route("/api/library/search", get(handlers::library::search))
        .route(
            "/api/library/conditions/:id",
            get(handlers::library::get_condition),
        )
        .route(
            "/api/library/categories/:category",
            get(handlers::library::get_category),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
