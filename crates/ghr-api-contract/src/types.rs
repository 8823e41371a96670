// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request and response bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account that owns a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub login: String,
    pub avatar_url: String,
}

/// One repository as rendered in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "language", default)]
    pub primary_language: Option<String>,
    pub owner: OwnerRef,
}

/// Body of the create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RepositoryMutationRequest {
    #[validate(
        length(max = 100, message = "Name cannot be longer than 100 characters."),
        custom(function = "crate::validation::validate_repository_name")
    )]
    pub name: String,
    pub description: String,
}

impl RepositoryMutationRequest {
    /// Build a request from form input; the name is kept verbatim for
    /// validation, the description is trimmed
    pub fn from_form(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.trim().to_string(),
        }
    }

    /// Copy with the name trimmed, as sent on the wire
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Sort key for listing repositories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositorySort {
    #[default]
    Created,
    Updated,
    Pushed,
    FullName,
}

impl RepositorySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositorySort::Created => "created",
            RepositorySort::Updated => "updated",
            RepositorySort::Pushed => "pushed",
            RepositorySort::FullName => "full_name",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Query parameters for the list call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub sort: RepositorySort,
    pub direction: SortDirection,
}
