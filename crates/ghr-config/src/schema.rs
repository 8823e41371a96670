// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Schema root definition for configuration validation.
//!
//! This module defines the canonical shape of the whole configuration file.
//! The types are used only for schema generation and validation; subsystems
//! read their own typed views through [`crate::extract`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SchemaRoot {
    /// Account whose repositories are listed; defaults to the logged-in user
    pub owner: Option<String>,

    /// Default log verbosity
    pub log_level: Option<LogLevel>,

    pub api: Option<ApiSection>,

    pub credentials: Option<CredentialsSection>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// GitHub API connection settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub auth_scheme: Option<AuthScheme>,
    pub http_log: Option<HttpLog>,
    pub user_agent: Option<String>,
    #[schemars(range(min = 1))]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    Token,
    Basic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HttpLog {
    None,
    Basic,
    Headers,
}

/// Credential storage settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    pub storage_path: Option<String>,
    pub encrypted: Option<bool>,
}
