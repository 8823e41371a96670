// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

#![allow(dead_code)]

use ghr_core::{CollectingNotifier, Session};
use ghr_credentials::{AuthScheme, CredentialStore, Credentials, CredentialsConfig};
use ghr_rest_client::ClientBuilder;
use ghr_rest_mock_client::MockTransport;
use std::sync::Arc;
use tempfile::TempDir;

pub fn store_in(temp_dir: &TempDir) -> CredentialStore {
    CredentialStore::new(CredentialsConfig::at(temp_dir.path().join("credentials")))
}

pub fn session_with(transport: &MockTransport) -> Session<MockTransport> {
    Session::new(ClientBuilder::new(), transport.clone())
}

/// Session already configured for `octocat` with a token
pub async fn logged_in(transport: &MockTransport) -> Arc<Session<MockTransport>> {
    let session = session_with(transport);
    session
        .configure(&Credentials::new("octocat", "ghp_test", AuthScheme::Token))
        .await
        .unwrap();
    Arc::new(session)
}

pub fn notifier() -> Arc<CollectingNotifier> {
    Arc::new(CollectingNotifier::new())
}
