use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoproc_core::GeoprocError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<GeoprocError> for ApiError {
    fn from(err: GeoprocError) -> Self {
        match &err {
            GeoprocError::EngineUnavailable { .. } => Self::unavailable(err.to_string()),
            GeoprocError::UnknownOperation { available, .. } => {
                let details = format!("Available operations: {}", available.join(", "));
                Self::bad_request(err.to_string()).with_details(details)
            }
            GeoprocError::InvalidGeometry { .. } | GeoprocError::OperationFailed { .. } => {
                Self::unprocessable(err.to_string())
            }
            _ if err.is_input_error() => Self::bad_request(err.to_string()),
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}
