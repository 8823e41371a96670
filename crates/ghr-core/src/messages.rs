// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! User-facing notification texts

use ghr_rest_client::{ApiError, ErrorKind};

pub const UNAUTHORIZED: &str = "Unauthorized. Check your credentials or token.";
pub const CREATE_CONFLICT: &str = "The repository already exists or the name is not valid.";
pub const CONNECTION_ERROR: &str = "Connection error. Check your internet connection.";
pub const NOT_INITIALIZED: &str = "Session not initialized. Run `ghr login` first.";
pub const NO_REPOSITORIES: &str = "No repositories found.";
pub const CREATED: &str = "Repository created.";
pub const UPDATED: &str = "Repository updated.";
pub const NAME_IMMUTABLE: &str = "The repository name cannot be changed.";

pub fn deleted(name: &str) -> String {
    format!("Repository '{}' deleted.", name)
}

/// Message for a failed list call
pub fn list_failure(err: &ApiError) -> String {
    match err {
        ApiError::Unauthenticated { .. } => UNAUTHORIZED.to_string(),
        _ => common_failure(err, "Error"),
    }
}

/// Message for a failed create call
pub fn create_failure(err: &ApiError) -> String {
    match err {
        ApiError::Unprocessable { .. } => CREATE_CONFLICT.to_string(),
        _ => common_failure(err, "Error creating repository"),
    }
}

pub fn update_failure(err: &ApiError) -> String {
    common_failure(err, "Error updating repository")
}

pub fn delete_failure(err: &ApiError) -> String {
    common_failure(err, "Error deleting repository")
}

fn common_failure(err: &ApiError, prefix: &str) -> String {
    match err {
        ApiError::NotConfigured => NOT_INITIALIZED.to_string(),
        ApiError::InvalidInput(message) => message.clone(),
        _ if err.kind() == ErrorKind::Network => CONNECTION_ERROR.to_string(),
        _ => match err.status() {
            Some(status) => format!("{}: HTTP {}", prefix, status),
            None => format!("{}: {}", prefix, err),
        },
    }
}
