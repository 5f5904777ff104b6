//! Server error types

use crate::upload::UploadError;
use apiflow_collection::TransformError;
use apiflow_llm::LLMError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Invalid request
    InvalidRequest(String),

    /// Upload exceeds the configured size limit
    FileTooLarge,

    /// Upload content type is not accepted
    UnsupportedFileType,

    /// Text generation gateway error
    ProviderError(String),

    /// Collection could not be transformed
    TransformFailed(String),

    /// Internal server error
    InternalError(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::UnsupportedFileType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServerError::ProviderError(_)
            | ServerError::TransformFailed(_)
            | ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "{}", msg),
            ServerError::FileTooLarge => write!(f, "File too large"),
            ServerError::UnsupportedFileType => write!(f, "Unsupported file type"),
            ServerError::ProviderError(msg) => write!(f, "{}", msg),
            ServerError::TransformFailed(msg) => {
                write!(f, "Failed to process Postman collection: {}", msg)
            }
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<LLMError> for ServerError {
    fn from(err: LLMError) -> Self {
        ServerError::ProviderError(err.to_string())
    }
}

impl From<TransformError> for ServerError {
    fn from(err: TransformError) -> Self {
        ServerError::TransformFailed(err.to_string())
    }
}

impl From<UploadError> for ServerError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NoFile => ServerError::InvalidRequest(UploadError::NoFile.to_string()),
            UploadError::TooLarge { .. } => ServerError::FileTooLarge,
            UploadError::UnsupportedType(_) => ServerError::UnsupportedFileType,
            UploadError::Malformed(msg) => ServerError::InvalidRequest(msg),
            UploadError::Io(e) => ServerError::InternalError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
