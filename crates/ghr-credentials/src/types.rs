// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Core types for the credential store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// How the secret is presented to GitHub
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// Personal access token, sent as `Authorization: token <secret>`
    #[default]
    Token,
    /// Username and password, sent as HTTP Basic
    Basic,
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Token => write!(f, "token"),
            AuthScheme::Basic => write!(f, "basic"),
        }
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "token" => Ok(AuthScheme::Token),
            "basic" => Ok(AuthScheme::Basic),
            _ => Err(format!("Invalid auth scheme: {}. Use 'token' or 'basic'", s)),
        }
    }
}

/// The single stored credential record
///
/// The secret is wiped from memory when the record is dropped and is never
/// printed by `Debug`.
#[derive(
    Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema, Zeroize, ZeroizeOnDrop,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Credentials {
    /// GitHub login; also the default owner handle
    #[schemars(length(min = 1))]
    pub username: String,

    /// Personal access token or password
    #[schemars(length(min = 1))]
    pub secret: String,

    #[zeroize(skip)]
    #[serde(default)]
    pub scheme: AuthScheme,

    /// When the record was written (RFC 3339)
    #[zeroize(skip)]
    #[schemars(with = "String")]
    pub saved_at: DateTime<Utc>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>, scheme: AuthScheme) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
            scheme,
            saved_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("scheme", &self.scheme)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}

/// Which form of record is currently on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredForm {
    Absent,
    Plain,
    Encrypted,
}
