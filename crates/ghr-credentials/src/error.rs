// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the credential store

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for credential operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while persisting or reading credentials
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Stored credentials are encrypted; a passphrase is required")]
    PassphraseRequired,

    #[error("Encryption error: {0}")]
    Encryption(String),
}
