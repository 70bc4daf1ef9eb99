use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure inside reply generation. Never reaches a visitor: the
/// conversation engine swaps it for the apology reply.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("knowledge base incomplete: {0}")]
    KnowledgeBase(String),

    #[error("template picker chose {picked} of {len} templates")]
    TemplateOutOfRange { picked: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AppError::Internal(e) = &self {
            tracing::error!(error = %e, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
