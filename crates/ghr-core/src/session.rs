// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The authenticated session shared by all controllers

use ghr_credentials::{AuthScheme, CredentialStore, Credentials};
use ghr_rest_client::{
    ApiError, ApiResult, AuthConfig, ClientBuilder, GitHubClient, HttpTransport, Transport,
};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

struct Configured<T: Transport> {
    client: Arc<GitHubClient<T>>,
    username: String,
    scheme: AuthScheme,
}

/// Holds the configured API client, if any
///
/// Created once per process and handed to controllers behind an `Arc`.
/// Every client it produces comes from the same builder and transport;
/// only the credentials differ.
pub struct Session<T: Transport + Clone = HttpTransport> {
    builder: ClientBuilder,
    transport: T,
    owner_override: Option<String>,
    state: RwLock<Option<Configured<T>>>,
}

impl Session<HttpTransport> {
    /// Session whose clients talk to the network through reqwest
    pub fn with_http(builder: ClientBuilder) -> ApiResult<Self> {
        let transport = HttpTransport::new(builder.timeout_value())?;
        Ok(Self::new(builder, transport))
    }
}

impl<T: Transport + Clone> Session<T> {
    pub fn new(builder: ClientBuilder, transport: T) -> Self {
        Self {
            builder: builder.without_auth(),
            transport,
            owner_override: None,
            state: RwLock::new(None),
        }
    }

    /// List repositories of `owner` instead of the logged-in user
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner_override = owner.filter(|o| !o.trim().is_empty());
        self
    }

    /// Configure from stored credentials; `Ok(false)` when none are stored
    pub async fn restore(&self, store: &CredentialStore, passphrase: Option<&str>) -> Result<bool> {
        match store.load_with_passphrase(passphrase).await? {
            Some(credentials) => {
                self.configure(&credentials).await?;
                tracing::debug!(username = %credentials.username, "session restored");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist `credentials` (encrypted when a passphrase is given) and configure
    pub async fn login(
        &self,
        store: &CredentialStore,
        credentials: &Credentials,
        passphrase: Option<&str>,
    ) -> Result<()> {
        // Build first so a credential that cannot form a header is never stored.
        let configured = self.build_client(credentials)?;
        match passphrase {
            Some(passphrase) => store.save_encrypted(credentials, passphrase).await?,
            None => store.save(credentials).await?,
        }
        *self.state.write().await = Some(configured);
        tracing::info!(username = %credentials.username, scheme = %credentials.scheme, "logged in");
        Ok(())
    }

    /// Clear stored credentials and drop the client
    pub async fn logout(&self, store: &CredentialStore) -> Result<()> {
        store.clear().await?;
        *self.state.write().await = None;
        tracing::info!("logged out");
        Ok(())
    }

    /// Configure the client without touching storage
    pub async fn configure(&self, credentials: &Credentials) -> Result<()> {
        let configured = self.build_client(credentials)?;
        *self.state.write().await = Some(configured);
        Ok(())
    }

    /// The configured client, or [`ApiError::NotConfigured`]
    pub async fn client(&self) -> ApiResult<Arc<GitHubClient<T>>> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|c| Arc::clone(&c.client))
            .ok_or(ApiError::NotConfigured)
    }

    pub async fn is_configured(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn username(&self) -> Option<String> {
        self.state.read().await.as_ref().map(|c| c.username.clone())
    }

    pub async fn scheme(&self) -> Option<AuthScheme> {
        self.state.read().await.as_ref().map(|c| c.scheme)
    }

    /// Owner handle for listing: the configured override, else the username
    pub async fn owner(&self) -> ApiResult<String> {
        if let Some(owner) = &self.owner_override {
            return Ok(owner.clone());
        }
        self.username().await.ok_or(ApiError::NotConfigured)
    }

    fn build_client(&self, credentials: &Credentials) -> ApiResult<Configured<T>> {
        let auth = match credentials.scheme {
            AuthScheme::Token => AuthConfig::token(credentials.secret.as_str()),
            AuthScheme::Basic => {
                AuthConfig::basic(credentials.username.as_str(), credentials.secret.as_str())
            }
        };
        // Surface header problems now rather than on the first request.
        auth.headers()?;
        tracing::debug!(
            user = %credentials.username,
            scheme = auth.scheme_name(),
            "configuring API client"
        );

        let client = self
            .builder
            .clone()
            .auth(auth)
            .build_with_transport(self.transport.clone())?;
        Ok(Configured {
            client: Arc::new(client),
            username: credentials.username.clone(),
            scheme: credentials.scheme,
        })
    }
}
