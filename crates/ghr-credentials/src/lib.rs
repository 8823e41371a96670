// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Durable credential storage for gh-repos.
//!
//! Exactly one record (username, secret, auth scheme) is kept under
//! `{config-dir}/gh-repos/credentials/`, either as plain TOML or sealed with a
//! passphrase. Login overwrites it, logout removes it.

pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

pub use config::CredentialsConfig;
pub use crypto::KdfParams;
pub use error::{Error, Result};
pub use store::CredentialStore;
pub use types::{AuthScheme, Credentials, StoredForm};
pub use validation::{validate_login_input, LoginInputErrors};
