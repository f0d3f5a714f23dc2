// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Credentials missing from deployment config. Not user-recoverable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token exchange was rejected or returned an unusable body.
    #[error("Authentication with the intranet API failed: {0}")]
    Auth(String),

    /// DNS, connect, timeout or reset while talking to the intranet API.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Intranet API returned HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("No session with the intranet API")]
    NotConnected,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether a "Retry Connection" prompt makes sense for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Auth(_) | AppError::Network(_) | AppError::NotConnected
        )
    }

    /// Classify a reqwest transport failure.
    ///
    /// Decode failures are not transport failures and are reported as
    /// [`AppError::Api`] by the callers that parse bodies.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            AppError::Network(format!("connection failed: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Config(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
            AppError::Auth(msg) => (StatusCode::BAD_GATEWAY, "auth_error", Some(msg.clone())),
            AppError::Network(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "network_error",
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "user_not_found", Some(msg.clone()))
            }
            AppError::Api { status, .. } => (
                StatusCode::BAD_GATEWAY,
                "api_error",
                Some(format!("upstream status {}", status)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotConnected => (StatusCode::SERVICE_UNAVAILABLE, "not_connected", None),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            retryable: self.is_retryable(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
