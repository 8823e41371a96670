// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration engine for gh-repos.
//!
//! Configuration is loaded from several sources (user file, environment
//! variables, an explicit `--config` file and CLI flags), merged in precedence
//! order and handed to subsystems as typed views. All merging operates on
//! `serde_json::Value` so the engine stays agnostic of the individual fields.

pub mod env;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod schema;

pub use schema::SchemaRoot;

use anyhow::Result;
use serde_json::Value as J;

/// Source a configuration layer was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    User,
    Env,
    CliConfig,
    Flags,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::User => write!(f, "user"),
            Scope::Env => write!(f, "env"),
            Scope::CliConfig => write!(f, "cli-config"),
            Scope::Flags => write!(f, "flags"),
        }
    }
}

/// Final merged configuration
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Final merged JSON configuration
    pub json: J,
    /// Scopes that contributed at least one layer, lowest precedence first
    pub scopes: Vec<Scope>,
}

/// Load and merge all configuration layers according to precedence rules
///
/// Precedence order: user < env < cli-config < flags
pub fn load_all(paths: &paths::Paths, flag_overrides: Option<&J>) -> Result<Resolved> {
    use Scope::*;

    let user_layer = if paths.user.exists() {
        Some(loader::read_layer_from_file(&paths.user, User)?)
    } else {
        None
    };
    let env_layer = env::env_overlay()?;
    // An explicitly requested config file must exist.
    let cli_config_layer = match &paths.cli_config {
        Some(path) => Some(loader::read_layer_from_file(path, CliConfig)?),
        None => None,
    };

    let layers = vec![
        (user_layer.map(|l| l.json), User),
        (Some(env_layer), Env),
        (cli_config_layer.map(|l| l.json), CliConfig),
        (flag_overrides.cloned(), Flags),
    ];

    let mut json = serde_json::json!({});
    let mut scopes = Vec::new();
    for (layer, scope) in layers {
        let Some(layer) = layer else { continue };
        if layer.as_object().is_some_and(|o| o.is_empty()) {
            continue;
        }
        merge::merge_two_json(&mut json, layer);
        scopes.push(scope);
    }

    Ok(Resolved { json, scopes })
}
