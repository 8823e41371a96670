// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! File layout and storage operations for the credential record
//!
//! ```text
//! {storage-dir}/            0700
//!   credentials.toml        0600  plaintext record
//!   credentials.enc         0600  encrypted envelope (JSON)
//! ```
//!
//! At most one of the two files exists after any successful write.

use crate::{
    config::CredentialsConfig,
    crypto::EncryptedEnvelope,
    error::{Error, Result},
    types::{Credentials, StoredForm},
    validation::validate_credentials,
};
use std::path::Path;
use tokio::fs as async_fs;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Ensure the storage directory exists with owner-only permissions
pub async fn ensure_storage_dir(config: &CredentialsConfig) -> Result<()> {
    let storage_dir = config.storage_dir()?;
    if !storage_dir.exists() {
        async_fs::create_dir_all(&storage_dir).await?;
    }

    #[cfg(unix)]
    {
        let mut permissions = async_fs::metadata(&storage_dir).await?.permissions();
        permissions.set_mode(0o700);
        async_fs::set_permissions(&storage_dir, permissions).await?;
    }

    Ok(())
}

/// Write `data` to a sibling temp file, restrict it to 0600, then rename over `path`
async fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let temp_file = path.with_extension("tmp");
    async_fs::write(&temp_file, data).await?;

    #[cfg(unix)]
    {
        let mut permissions = async_fs::metadata(&temp_file).await?.permissions();
        permissions.set_mode(0o600);
        async_fs::set_permissions(&temp_file, permissions).await?;
    }

    async_fs::rename(&temp_file, path).await?;
    Ok(())
}

/// Remove a file, treating "not found" as success
pub async fn remove_if_exists(path: &Path) -> Result<()> {
    match async_fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Which record form is on disk
pub fn stored_form(config: &CredentialsConfig) -> Result<StoredForm> {
    if config.plain_file()?.exists() {
        Ok(StoredForm::Plain)
    } else if config.encrypted_file()?.exists() {
        Ok(StoredForm::Encrypted)
    } else {
        Ok(StoredForm::Absent)
    }
}

/// Persist the plaintext record
pub async fn write_plain(config: &CredentialsConfig, credentials: &Credentials) -> Result<()> {
    ensure_storage_dir(config).await?;
    let content = zeroize::Zeroizing::new(toml::to_string_pretty(credentials)?);
    write_atomically(&config.plain_file()?, content.as_bytes()).await
}

/// Read and validate the plaintext record
pub async fn read_plain(config: &CredentialsConfig) -> Result<Option<Credentials>> {
    let path = config.plain_file()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = zeroize::Zeroizing::new(async_fs::read_to_string(&path).await?);
    let value: toml::Value = toml::from_str(&content)?;
    let json = serde_json::to_value(value)?;
    validate_record_schema(&json)?;

    let credentials: Credentials = serde_json::from_value(json)?;
    validate_credentials(&credentials)?;
    Ok(Some(credentials))
}

/// Persist an encrypted envelope
pub async fn write_envelope(config: &CredentialsConfig, envelope: &EncryptedEnvelope) -> Result<()> {
    ensure_storage_dir(config).await?;
    let content = serde_json::to_vec_pretty(envelope)?;
    write_atomically(&config.encrypted_file()?, &content).await
}

/// Read the encrypted envelope, if any
pub async fn read_envelope(config: &CredentialsConfig) -> Result<Option<EncryptedEnvelope>> {
    let path = config.encrypted_file()?;
    if !path.exists() {
        return Ok(None);
    }
    let content = async_fs::read(&path).await?;
    Ok(Some(serde_json::from_slice(&content)?))
}

/// Validate a raw record against the generated JSON schema (compiled once)
fn validate_record_schema(json: &serde_json::Value) -> Result<()> {
    use schemars::schema_for;
    use std::sync::OnceLock;

    static COMPILED_SCHEMA: OnceLock<std::result::Result<jsonschema::JSONSchema, String>> =
        OnceLock::new();

    let compiled_schema = COMPILED_SCHEMA.get_or_init(|| {
        let schema = schema_for!(Credentials);
        let schema_json = serde_json::to_value(&schema)
            .map_err(|e| format!("Failed to serialize schema: {}", e))?;
        jsonschema::JSONSchema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .compile(&schema_json)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    let compiled_schema = match compiled_schema {
        Ok(schema) => schema,
        Err(err) => {
            return Err(Error::Validation(format!(
                "Schema compilation failed: {}",
                err
            )));
        }
    };

    if let Err(errors) = compiled_schema.validate(json) {
        // Messages can echo instance values, so only the paths are reported.
        let paths: Vec<String> = errors.map(|e| e.instance_path.to_string()).collect();
        return Err(Error::Validation(format!(
            "Credentials file does not match the expected format at: {}",
            paths.join(", ")
        )));
    }

    Ok(())
}

/// Check that the storage directory and record files are owner-only
pub fn validate_permissions(config: &CredentialsConfig) -> Result<()> {
    let dir = config.storage_dir()?;
    if !dir.exists() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        let mode = std::fs::metadata(&dir)?.permissions().mode();
        if mode & 0o077 != 0 {
            return Err(Error::PermissionDenied(dir));
        }

        for file in [config.plain_file()?, config.encrypted_file()?] {
            if file.exists() {
                let mode = std::fs::metadata(&file)?.permissions().mode();
                if mode & 0o177 != 0 {
                    return Err(Error::PermissionDenied(file));
                }
            }
        }
    }

    #[cfg(not(unix))]
    tracing::warn!(
        "Permission validation not supported on this platform for {}",
        dir.display()
    );

    Ok(())
}
