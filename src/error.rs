use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of a `/translate` call. The `Display` text is what the client sees,
/// so none of the variants carry upstream payloads.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Invalid response from translation service")]
    UpstreamShape,

    #[error("Translation failed. Please try again later.")]
    Transport(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingFields | ProxyError::InvalidBody => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamShape => StatusCode::BAD_GATEWAY,
            ProxyError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Transport(err)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
