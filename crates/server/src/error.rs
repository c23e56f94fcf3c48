//! API error types.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use glyphpress_core::Error as CoreError;
use glyphpress_subset::{PipelineError, ToolError};
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type. Every pipeline failure maps onto exactly one of these.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request too large: {0}")]
    RequestTooLarge(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequestTooLarge(_) => "request_too_large",
            Self::BadRequest(_) => "bad_request",
            Self::UnsupportedMediaType(_) => "unsupported_media_type",
            Self::UnprocessableEntity(_) => "unprocessable_entity",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RequestTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Core(core) => match core {
                CoreError::UnsupportedMediaType(media_type) => {
                    Self::UnsupportedMediaType(media_type)
                }
                CoreError::UnknownSubset(id) => Self::BadRequest(format!("unknown subset: {id}")),
                CoreError::MissingSubfamily => {
                    Self::UnprocessableEntity("font has no subfamily name record".to_string())
                }
                CoreError::UnsafeName(name) => Self::UnprocessableEntity(format!(
                    "name contains unsupported characters: {name:?}"
                )),
                CoreError::MalformedFont(detail) => {
                    // Sniffing passed, so this is not attributable to a
                    // known client mistake; log and report a server fault.
                    tracing::error!(error = %detail, "font failed structural parsing");
                    Self::Internal("font failed structural parsing".to_string())
                }
            },
            PipelineError::NoSubsets => Self::BadRequest("no subsets requested".to_string()),
            PipelineError::RootEscape(segment) => {
                tracing::warn!(segment = %segment, "destination escaped the upload root");
                Self::UnprocessableEntity("font name produces an unusable path".to_string())
            }
            PipelineError::Generation { subset_id, source } => {
                // Tool diagnostics are for operator logs only; the client
                // gets a generic failure.
                match &source {
                    ToolError::Failed { status, output } => tracing::error!(
                        subset = %subset_id,
                        %status,
                        tool_output = %output,
                        "subsetting tool failed"
                    ),
                    ToolError::Spawn(err) => tracing::error!(
                        subset = %subset_id,
                        error = %err,
                        "failed to invoke subsetting tool"
                    ),
                }
                Self::Internal(format!("subset generation failed for {subset_id}"))
            }
            PipelineError::Io(err) => {
                tracing::error!(error = %err, "filesystem fault in upload pipeline");
                Self::Internal("storage fault".to_string())
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        // Body-limit violations surface through the multipart reader.
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::RequestTooLarge("request body exceeds the upload ceiling".to_string())
        } else {
            Self::BadRequest(format!("invalid multipart body: {err}"))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
