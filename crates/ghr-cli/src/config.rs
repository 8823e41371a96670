// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Root configuration for the `ghr` binary
//!
//! The merged JSON from `ghr-config` is split into the typed views each
//! subsystem reads. Loading happens once, before logging is initialized.

use anyhow::{Context, Result};
use ghr_config::{load_all, paths, Scope};
use ghr_credentials::{AuthScheme, CredentialsConfig};
use ghr_logging::logging_config::LoggingConfig;
use ghr_rest_client::ApiConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value as J;
use std::path::PathBuf;

/// Root configuration composed from the subsystem sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub logging: LoggingConfig,

    /// Owner whose repositories are listed; defaults to the logged-in user
    pub owner: Option<String>,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Loaded configuration plus the raw merged document
#[derive(Debug, Clone)]
pub struct ConfigResult {
    pub config: Config,
    pub resolved_json: J,
    pub scopes: Vec<Scope>,
}

impl ConfigResult {
    /// Scheme used by `login` when `--scheme` is absent
    pub fn default_scheme(&self) -> Result<AuthScheme> {
        let scheme: Option<AuthScheme> =
            ghr_config::extract::get_at_or_default(&self.resolved_json, "api.auth-scheme")?;
        Ok(scheme.unwrap_or_default())
    }
}

/// Load and merge user file, environment, `--config` file and flag overrides
pub fn load_config(cli_config: Option<&str>, overrides: Option<&J>) -> Result<ConfigResult> {
    let mut paths = paths::discover_paths();
    if let Some(config_path) = cli_config {
        paths.cli_config = Some(PathBuf::from(config_path));
    }

    let resolved = load_all(&paths, overrides)?;
    let config: Config = ghr_config::extract::get(&resolved.json).context("reading merged configuration")?;

    Ok(ConfigResult {
        config,
        resolved_json: resolved.json,
        scopes: resolved.scopes,
    })
}
