// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration file path discovery

use std::path::PathBuf;

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "gh-repos";

/// Configuration file paths for different scopes
#[derive(Debug, Clone)]
pub struct Paths {
    pub user: PathBuf,
    pub cli_config: Option<PathBuf>,
}

/// Discover configuration file paths for the current environment
pub fn discover_paths() -> Paths {
    Paths {
        user: home_dir().join("config.toml"),
        cli_config: None,
    }
}

/// Base directory for all gh-repos state
///
/// `GHR_HOME` overrides the platform config directory.
pub fn home_dir() -> PathBuf {
    if let Ok(ghr_home) = std::env::var("GHR_HOME") {
        return PathBuf::from(ghr_home);
    }

    dirs::config_dir()
        .unwrap_or_else(|| {
            dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")).join(".config")
        })
        .join(APP_DIR_NAME)
}
