// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TOML loading and JSON validation functionality

use anyhow::{Context, Result};
use serde_json::Value as J;
use std::path::Path;

/// Parse TOML string to JSON value for schema validation
pub fn parse_toml_to_json(toml_str: &str) -> Result<J> {
    let toml: toml::Value = toml_str.parse::<toml::Value>()?;
    // toml::Value implements Serialize, so the round trip cannot lose structure.
    Ok(serde_json::to_value(toml)?)
}

/// Validate JSON against the configuration schema
pub fn validate_against_schema(v: &J) -> Result<()> {
    use jsonschema::{Draft, JSONSchema};
    use std::sync::OnceLock;

    static VALIDATOR: OnceLock<std::result::Result<JSONSchema, String>> = OnceLock::new();
    let validator = VALIDATOR.get_or_init(|| {
        let rs = schemars::schema_for!(crate::schema::SchemaRoot);
        let schema = serde_json::to_value(rs).map_err(|e| e.to_string())?;
        JSONSchema::options()
            .with_draft(Draft::Draft202012)
            .compile(&schema)
            .map_err(|e| e.to_string())
    });

    let validator = match validator {
        Ok(validator) => validator,
        Err(err) => anyhow::bail!("Config schema compilation failed: {}", err),
    };

    if let Err(errors) = validator.validate(v) {
        let error_msg = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("\n  - ");
        anyhow::bail!("Config schema validation failed:\n  - {}", error_msg);
    }

    Ok(())
}

/// Represents a loaded configuration layer
#[derive(Debug, Clone)]
pub struct Layer {
    pub scope: crate::Scope,
    pub json: J,
}

/// Load and validate a configuration layer from file
pub fn read_layer_from_file(path: &Path, scope: crate::Scope) -> Result<Layer> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading config file {:?}", path))?;

    let json = parse_toml_to_json(&content)
        .with_context(|| format!("parsing config file {:?}", path))?;
    validate_against_schema(&json).with_context(|| format!("validating {:?}", path))?;

    Ok(Layer { scope, json })
}
