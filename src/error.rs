use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failure envelope returned by every endpoint: `{ success: false, error, code? }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: Some(code.into()),
        }
    }
}

/// Trait for errors that can be converted to HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Optional error code for programmatic handling (e.g., "MALFORMED_RESPONSE")
    fn error_code(&self) -> Option<&'static str> {
        None
    }

    /// Message placed in the envelope. Defaults to the `Display` output.
    fn public_message(&self) -> String {
        self.to_string()
    }
}

/// Convert any HttpError into an Axum response
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let code = err.error_code();
    let message = err.public_message();

    if status.is_server_error() {
        tracing::error!(error = %err, status = %status, code = ?code, "API error");
    } else {
        tracing::warn!(error = %err, status = %status, code = ?code, "API error");
    }

    let body = if let Some(code) = code {
        ErrorResponse::with_code(message, code)
    } else {
        ErrorResponse::new(message)
    };

    (status, Json(body)).into_response()
}

/// Macro to implement IntoResponse for HttpError types
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

/// Everything that can go wrong between the browser and WeatherAPI.com
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Weather API is not configured properly")]
    NotConfigured,

    #[error("Invalid location parameter")]
    InvalidLocation,

    #[error("Invalid type parameter: {0}")]
    InvalidReportType(String),

    #[error("Query must be at least 3 characters long")]
    InvalidQuery,

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("Invalid weather data received: {0}")]
    MalformedResponse(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl HttpError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidLocation | Self::InvalidReportType(_) | Self::InvalidQuery => {
                StatusCode::BAD_REQUEST
            }
            Self::Upstream { status, .. } => *status,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::NotConfigured => Some("NOT_CONFIGURED"),
            Self::InvalidLocation => Some("INVALID_LOCATION"),
            Self::InvalidReportType(_) => Some("INVALID_TYPE"),
            Self::InvalidQuery => Some("INVALID_QUERY"),
            Self::Upstream { .. } => Some("UPSTREAM_ERROR"),
            Self::Timeout => Some("TIMEOUT"),
            Self::MalformedResponse(_) => Some("MALFORMED_RESPONSE"),
            Self::Transport(_) => Some("INTERNAL_ERROR"),
        }
    }

    // Details of malformed payloads and transport failures stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::InvalidReportType(_) => "Invalid type parameter".to_string(),
            Self::MalformedResponse(_) => "Invalid weather data received".to_string(),
            Self::Transport(_) => "Internal server error. Please try again later.".to_string(),
            other => other.to_string(),
        }
    }
}

impl_into_response!(RelayError);
