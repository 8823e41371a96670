// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use ghr_credentials::{validate_login_input, AuthScheme, CredentialStore, Credentials};
use ghr_rest_client::Transport;
use std::sync::Arc;

use crate::error::Error;
use crate::notify::Notifier;
use crate::session::Session;

/// Result of a login attempt
#[derive(Debug)]
pub enum LoginOutcome {
    LoggedIn { username: String },
    /// Per-field messages; nothing was stored or sent
    Invalid {
        username: Option<&'static str>,
        secret: Option<&'static str>,
    },
    Failed(Error),
}

/// Collects credentials, persists them and configures the session
pub struct LoginController<T: Transport + Clone> {
    session: Arc<Session<T>>,
    store: CredentialStore,
    notifier: Arc<dyn Notifier>,
}

impl<T: Transport + Clone> LoginController<T> {
    pub fn new(session: Arc<Session<T>>, store: CredentialStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            store,
            notifier,
        }
    }

    /// Validate, save and configure
    ///
    /// Both fields are trimmed first. With a passphrase the record is stored
    /// encrypted.
    pub async fn submit(
        &mut self,
        username: &str,
        secret: &str,
        scheme: AuthScheme,
        passphrase: Option<&str>,
    ) -> LoginOutcome {
        let username = username.trim();
        let secret = secret.trim();

        if let Err(errors) = validate_login_input(username, secret) {
            for message in [errors.username, errors.secret].into_iter().flatten() {
                self.notifier.error(message);
            }
            return LoginOutcome::Invalid {
                username: errors.username,
                secret: errors.secret,
            };
        }

        let credentials = Credentials::new(username, secret, scheme);
        match self.session.login(&self.store, &credentials, passphrase).await {
            Ok(()) => LoginOutcome::LoggedIn {
                username: username.to_string(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.notifier.error(&format!("Login failed: {}", err));
                LoginOutcome::Failed(err)
            }
        }
    }
}
