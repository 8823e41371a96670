// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Process exit codes

use ghr_rest_client::{ApiError, ErrorKind};
use thiserror::Error;

/// Errors raised by the command layer itself
#[derive(Debug, Error)]
pub enum CliError {
    /// The failure was already shown to the user through a notification
    #[error("{message}")]
    Reported { kind: ErrorKind, message: String },

    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),
}

impl CliError {
    pub fn reported(kind: ErrorKind, message: impl Into<String>) -> Self {
        CliError::Reported {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Generic,
    Configuration,
    Authentication,
    Validation,
    Network,
    Server,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Generic => 1,
            ExitStatus::Configuration => 2,
            ExitStatus::Authentication => 3,
            ExitStatus::Validation => 4,
            ExitStatus::Network => 5,
            ExitStatus::Server => 6,
        }
    }

    pub fn for_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Configuration => ExitStatus::Configuration,
            ErrorKind::Authentication => ExitStatus::Authentication,
            ErrorKind::Validation => ExitStatus::Validation,
            ErrorKind::Network => ExitStatus::Network,
            ErrorKind::Server => ExitStatus::Server,
        }
    }

    /// Map any error in the chain to an exit status
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(cli) = cause.downcast_ref::<CliError>() {
                return match cli {
                    CliError::Reported { kind, .. } => Self::for_kind(*kind),
                    CliError::Config(_) => ExitStatus::Configuration,
                };
            }
            if let Some(core) = cause.downcast_ref::<ghr_core::Error>() {
                return Self::for_kind(core.kind());
            }
            if let Some(api) = cause.downcast_ref::<ApiError>() {
                return Self::for_kind(api.kind());
            }
            if cause.downcast_ref::<ghr_credentials::Error>().is_some() {
                return ExitStatus::Configuration;
            }
        }
        ExitStatus::Generic
    }
}

/// Whether the user has already seen this error
pub fn already_reported(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<CliError>(), Some(CliError::Reported { .. }))
}
