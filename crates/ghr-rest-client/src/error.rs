// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error taxonomy for GitHub API calls

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for client operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Coarse classification used for user messages and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Validation,
    Network,
    Server,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "network",
            ErrorKind::Server => "server",
        };
        f.write_str(s)
    }
}

/// Errors returned by [`crate::GitHubClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// No credentials were configured; nothing was sent
    #[error("client is not configured with credentials")]
    NotConfigured,

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("authentication failed (HTTP 401): {message}")]
    Unauthenticated { message: String },

    /// Rejected locally before any request was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("request rejected (HTTP 422): {message}")]
    Unprocessable { message: String },

    #[error("network error: {0}")]
    Network(#[from] TransportError),

    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body could not be decoded
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotConfigured | ApiError::InvalidConfig(_) => ErrorKind::Configuration,
            ApiError::Unauthenticated { .. } => ErrorKind::Authentication,
            ApiError::InvalidInput(_) | ApiError::Unprocessable { .. } => ErrorKind::Validation,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Server { .. } | ApiError::UnexpectedResponse(_) => ErrorKind::Server,
        }
    }

    /// HTTP status behind the error, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthenticated { .. } => Some(401),
            ApiError::Unprocessable { .. } => Some(422),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidConfig(format!("invalid URL: {}", err))
    }
}
