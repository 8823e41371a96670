// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment variable overlay functionality

use anyhow::Result;
use serde_json::Value as J;

/// `GHR_*` variables that carry process inputs rather than configuration keys
pub const RESERVED_ENV_KEYS: &[&str] = &["home", "secret", "passphrase"];

/// Create JSON overlay from GHR_* environment variables
///
/// Nested keys use a double underscore: `GHR_API__BASE_URL` becomes `api.base-url`.
pub fn env_overlay() -> Result<J> {
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix("GHR")
                .prefix_separator("_")
                .separator("__")
                .convert_case(config::Case::Kebab)
                .try_parsing(true),
        )
        .build()?;

    let mut map = built.try_deserialize::<serde_json::Map<String, J>>()?;
    for key in RESERVED_ENV_KEYS {
        map.remove(*key);
    }

    Ok(J::Object(map))
}

/// Create JSON overlay from CLI flag key=value pairs
pub fn flags_overlay(kv_pairs: &[(&str, &str)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in kv_pairs {
        crate::merge::insert_dotted(&mut root, k, J::String(v.to_string()));
    }
    root
}
