// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `[api]` configuration section

use serde::{Deserialize, Serialize};

/// How much of each HTTP exchange is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpLogLevel {
    /// Nothing
    None,
    /// Method, URL, status and elapsed time
    Basic,
    /// Basic plus request header names and values, credentials redacted
    Headers,
}

impl Default for HttpLogLevel {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            HttpLogLevel::Basic
        } else {
            HttpLogLevel::None
        }
    }
}

/// API connection settings from the merged configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub http_log: Option<HttpLogLevel>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Extract the `api` section; unrelated keys in it are ignored
    pub fn from_resolved_config(resolved_json: &serde_json::Value) -> crate::ApiResult<Self> {
        ghr_config::extract::get_at_or_default(resolved_json, "api")
            .map_err(|e| crate::ApiError::InvalidConfig(e.to_string()))
    }
}
