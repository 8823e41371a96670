// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The credential store: one durable record, replaced on login and removed on logout

use crate::{
    config::CredentialsConfig,
    crypto::{decrypt_credentials, encrypt_credentials, KdfParams},
    error::{Error, Result},
    storage,
    types::{Credentials, StoredForm},
};

/// Durable store for the single credential record
#[derive(Debug, Clone)]
pub struct CredentialStore {
    config: CredentialsConfig,
    kdf: KdfParams,
}

impl CredentialStore {
    pub fn new(config: CredentialsConfig) -> Self {
        Self {
            config,
            kdf: KdfParams::default(),
        }
    }

    /// Use non-default Argon2 costs for newly encrypted records
    pub fn with_kdf_params(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn config(&self) -> &CredentialsConfig {
        &self.config
    }

    /// Which record form is on disk
    pub fn stored_form(&self) -> Result<StoredForm> {
        storage::stored_form(&self.config)
    }

    /// Persist `credentials` in plaintext, replacing any prior record
    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        storage::write_plain(&self.config, credentials).await?;
        storage::remove_if_exists(&self.config.encrypted_file()?).await?;
        tracing::info!(username = %credentials.username, scheme = %credentials.scheme, "credentials saved");
        Ok(())
    }

    /// Persist `credentials` encrypted under `passphrase`, replacing any prior record
    pub async fn save_encrypted(&self, credentials: &Credentials, passphrase: &str) -> Result<()> {
        if passphrase.is_empty() {
            return Err(Error::Encryption("passphrase must not be empty".to_string()));
        }
        let envelope = encrypt_credentials(credentials, passphrase, &self.kdf)?;
        storage::write_envelope(&self.config, &envelope).await?;
        storage::remove_if_exists(&self.config.plain_file()?).await?;
        tracing::info!(username = %credentials.username, scheme = %credentials.scheme, "encrypted credentials saved");
        Ok(())
    }

    /// Read the stored record; `Ok(None)` when nothing is stored
    ///
    /// Fails with [`Error::PassphraseRequired`] when only an encrypted record exists.
    pub async fn load(&self) -> Result<Option<Credentials>> {
        match self.stored_form()? {
            StoredForm::Absent => Ok(None),
            StoredForm::Plain => storage::read_plain(&self.config).await,
            StoredForm::Encrypted => Err(Error::PassphraseRequired),
        }
    }

    /// Read the stored record, decrypting it with `passphrase` if it is encrypted
    pub async fn load_with_passphrase(&self, passphrase: Option<&str>) -> Result<Option<Credentials>> {
        match (self.stored_form()?, passphrase) {
            (StoredForm::Encrypted, Some(passphrase)) => self.load_encrypted(passphrase).await,
            _ => self.load().await,
        }
    }

    /// Decrypt the encrypted record; `Ok(None)` when no encrypted record exists
    pub async fn load_encrypted(&self, passphrase: &str) -> Result<Option<Credentials>> {
        let Some(envelope) = storage::read_envelope(&self.config).await? else {
            return Ok(None);
        };
        let credentials = decrypt_credentials(&envelope, passphrase)?;
        crate::validation::validate_credentials(&credentials)?;
        Ok(Some(credentials))
    }

    /// Remove the stored record in either form; clearing an empty store is a no-op
    pub async fn clear(&self) -> Result<()> {
        storage::remove_if_exists(&self.config.plain_file()?).await?;
        storage::remove_if_exists(&self.config.encrypted_file()?).await?;
        tracing::info!("credentials cleared");
        Ok(())
    }
}
