// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration integration for the credential store

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[credentials]` configuration section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CredentialsConfig {
    /// Custom directory for the credential record
    pub storage_path: Option<PathBuf>,

    /// Encrypt the record at rest by default
    #[serde(default)]
    pub encrypted: bool,

    /// Override for GHR_HOME (used by tests to avoid environment conflicts)
    #[serde(skip)]
    pub ghr_home_override: Option<PathBuf>,
}

impl CredentialsConfig {
    /// Credentials config rooted at an explicit directory
    pub fn at(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: Some(storage_path.into()),
            ..Default::default()
        }
    }

    /// Extract the `credentials` section from the merged configuration
    pub fn from_resolved_config(resolved_json: &serde_json::Value) -> crate::Result<Self> {
        ghr_config::extract::get_at_or_default(resolved_json, "credentials")
            .map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Directory holding the credential record
    ///
    /// Precedence: storage_path > GHR_HOME/credentials > platform config dir
    pub fn storage_dir(&self) -> crate::Result<PathBuf> {
        if let Some(custom_path) = &self.storage_path {
            return Ok(custom_path.clone());
        }

        if let Some(home) = &self.ghr_home_override {
            return Ok(home.join("credentials"));
        }
        if let Ok(ghr_home) = std::env::var("GHR_HOME") {
            return Ok(PathBuf::from(ghr_home).join("credentials"));
        }

        let base_dir = dirs::config_dir().ok_or_else(|| {
            crate::Error::Config("Could not determine config directory".to_string())
        })?;
        Ok(base_dir.join(ghr_config::paths::APP_DIR_NAME).join("credentials"))
    }

    /// Path of the plaintext record
    pub fn plain_file(&self) -> crate::Result<PathBuf> {
        Ok(self.storage_dir()?.join("credentials.toml"))
    }

    /// Path of the encrypted record
    pub fn encrypted_file(&self) -> crate::Result<PathBuf> {
        Ok(self.storage_dir()?.join("credentials.enc"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn storage_dir_precedence() {
        let mut config = CredentialsConfig {
            storage_path: Some("/custom/path".into()),
            ghr_home_override: Some("/home-override".into()),
            ..Default::default()
        };
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/custom/path"));

        config.storage_path = None;
        assert_eq!(
            config.storage_dir().unwrap(),
            PathBuf::from("/home-override/credentials")
        );

        config.ghr_home_override = None;
        std::env::set_var("GHR_HOME", "/from-env");
        let from_env = config.storage_dir().unwrap();
        std::env::remove_var("GHR_HOME");
        assert_eq!(from_env, PathBuf::from("/from-env/credentials"));

        let fallback = config.storage_dir().unwrap();
        assert!(fallback.to_string_lossy().contains("gh-repos"));
        assert!(fallback.ends_with("credentials"));
    }

    #[test]
    fn extracts_section_from_resolved_json() {
        let json = serde_json::json!({
            "owner": "octocat",
            "credentials": {"storage-path": "/srv/creds", "encrypted": true}
        });
        let config = CredentialsConfig::from_resolved_config(&json).unwrap();
        assert!(config.encrypted);
        assert_eq!(config.plain_file().unwrap(), PathBuf::from("/srv/creds/credentials.toml"));

        let empty = CredentialsConfig::from_resolved_config(&serde_json::json!({})).unwrap();
        assert!(!empty.encrypted);
        assert!(empty.storage_path.is_none());
    }
}
