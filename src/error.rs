use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Everything that can end a request early.
///
/// A missing page is not in here: stores report it as `Ok(None)` and each
/// route decides what an absent page means for it.
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Invalid Page Title: {0:?}")]
    InvalidTitle(String),

    #[error("{0:#}")]
    Storage(#[from] anyhow::Error),

    #[error("Template error: {0}")]
    Render(String),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::InvalidTitle(title) => {
                tracing::warn!(%title, "Invalid Page Title");
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            WikiError::Storage(_) | WikiError::Render(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
