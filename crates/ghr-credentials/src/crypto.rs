// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Passphrase-based encryption of the credential record.
//!
//! The key is derived with Argon2id from the passphrase and a random salt;
//! the serialized record is sealed with AES-256-GCM. Salt, nonce and KDF
//! costs travel with the ciphertext so older files stay readable when the
//! defaults change.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{
    error::{Error, Result},
    types::Credentials,
};

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const ENVELOPE_VERSION: u8 = 1;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// On-disk form of an encrypted record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EncryptedEnvelope {
    pub version: u8,
    pub kdf: KdfParams,
    /// Base64 salt
    pub salt: String,
    /// Base64 nonce
    pub nonce: String,
    /// Base64 ciphertext with the GCM tag appended
    pub ciphertext: String,
}

/// Derive a 256-bit key from a passphrase
pub fn derive_key(passphrase: &str, salt: &[u8], params: &KdfParams) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| Error::Encryption(format!("invalid KDF parameters: {}", e)))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key[..])
        .map_err(|e| Error::Encryption(format!("key derivation failed: {}", e)))?;
    Ok(key)
}

/// Seal a record under a passphrase
pub fn encrypt_credentials(
    credentials: &Credentials,
    passphrase: &str,
    params: &KdfParams,
) -> Result<EncryptedEnvelope> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    let mut rng = rand::thread_rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let key = derive_key(passphrase, &salt, params)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|_| Error::Encryption("invalid key length".to_string()))?;

    let plaintext = Zeroizing::new(serde_json::to_vec(credentials)?);
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|_| Error::Encryption("encryption failed".to_string()))?;

    let b64 = base64::engine::general_purpose::STANDARD;
    Ok(EncryptedEnvelope {
        version: ENVELOPE_VERSION,
        kdf: *params,
        salt: b64.encode(salt),
        nonce: b64.encode(nonce),
        ciphertext: b64.encode(ciphertext),
    })
}

/// Open an envelope with a passphrase
///
/// A wrong passphrase and a tampered file are indistinguishable and both
/// yield [`Error::Encryption`].
pub fn decrypt_credentials(envelope: &EncryptedEnvelope, passphrase: &str) -> Result<Credentials> {
    if envelope.version != ENVELOPE_VERSION {
        return Err(Error::Encryption(format!(
            "unsupported envelope version {}",
            envelope.version
        )));
    }

    let b64 = base64::engine::general_purpose::STANDARD;
    let decode = |field: &str, value: &str| {
        b64.decode(value)
            .map_err(|e| Error::Encryption(format!("malformed {}: {}", field, e)))
    };
    let salt = decode("salt", &envelope.salt)?;
    let nonce = decode("nonce", &envelope.nonce)?;
    let ciphertext = decode("ciphertext", &envelope.ciphertext)?;
    if nonce.len() != NONCE_LEN {
        return Err(Error::Encryption("malformed nonce".to_string()));
    }

    let key = derive_key(passphrase, &salt, &envelope.kdf)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|_| Error::Encryption("invalid key length".to_string()))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map(Zeroizing::new)
        .map_err(|_| {
            Error::Encryption("wrong passphrase or corrupted credentials file".to_string())
        })?;

    Ok(serde_json::from_slice(&plaintext)?)
}
