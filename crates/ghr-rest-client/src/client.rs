// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client builder and the repository operations

use ghr_api_contract::{
    validation::validate_create_request, GitHubErrorBody, ListOptions, RepositoryMutationRequest,
    RepositoryRecord,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use url::Url;

use crate::api_config::{ApiConfig, HttpLogLevel};
use crate::auth::AuthConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";
pub const DEFAULT_USER_AGENT: &str = concat!("gh-repos/", env!("CARGO_PKG_VERSION"));
pub const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

/// Configures and creates [`GitHubClient`]s
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    auth: Option<AuthConfig>,
    http_log: HttpLogLevel,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth: None,
            http_log: HttpLogLevel::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = Self::new();
        if let Some(base_url) = &config.base_url {
            builder.base_url = base_url.clone();
        }
        if let Some(http_log) = config.http_log {
            builder.http_log = http_log;
        }
        if let Some(user_agent) = &config.user_agent {
            builder.user_agent = user_agent.clone();
        }
        builder.timeout = config.timeout_secs.map(Duration::from_secs);
        builder
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.auth = None;
        self
    }

    pub fn http_log(mut self, level: HttpLogLevel) -> Self {
        self.http_log = level;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_value(&self) -> Option<Duration> {
        self.timeout
    }

    /// Build a client backed by reqwest
    pub fn build(self) -> ApiResult<GitHubClient<HttpTransport>> {
        let transport = HttpTransport::new(self.timeout)?;
        self.build_with_transport(transport)
    }

    /// Build a client that sends requests through `transport`
    pub fn build_with_transport<T: Transport>(self, transport: T) -> ApiResult<GitHubClient<T>> {
        let base_url = Url::parse(&self.base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "base URL must be an http(s) URL: {}",
                self.base_url
            )));
        }
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| ApiError::InvalidConfig(format!("invalid user agent: {}", self.user_agent)))?;

        Ok(GitHubClient {
            transport,
            base_url,
            auth: self.auth,
            http_log: self.http_log,
            user_agent,
        })
    }
}

/// Client for the GitHub repository endpoints
#[derive(Debug)]
pub struct GitHubClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: Url,
    auth: Option<AuthConfig>,
    http_log: HttpLogLevel,
    user_agent: HeaderValue,
}

impl<T: Transport> GitHubClient<T> {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth(&self) -> Option<&AuthConfig> {
        self.auth.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.auth.is_some()
    }

    /// `GET /users/{owner}/repos?sort=created&direction=desc`
    pub async fn list_repositories(&self, owner: &str) -> ApiResult<Vec<RepositoryRecord>> {
        self.list_repositories_sorted(owner, ListOptions::default()).await
    }

    /// `GET /users/{owner}/repos` with explicit ordering
    pub async fn list_repositories_sorted(
        &self,
        owner: &str,
        options: ListOptions,
    ) -> ApiResult<Vec<RepositoryRecord>> {
        self.require_auth()?;
        require_segment("owner", owner)?;

        let mut url = self.url_for(&["users", owner, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", options.sort.as_str())
            .append_pair("direction", options.direction.as_str());

        let response = self.execute(Method::GET, url, None).await?;
        decode(&response)
    }

    /// `POST /user/repos`
    pub async fn create_repository(
        &self,
        request: &RepositoryMutationRequest,
    ) -> ApiResult<RepositoryRecord> {
        self.require_auth()?;
        validate_create_request(request).map_err(|e| {
            ApiError::InvalidInput(e.first_message().unwrap_or_else(|| e.to_string()))
        })?;

        let url = self.url_for(&["user", "repos"])?;
        let body = serde_json::to_vec(&request.normalized())
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        let response = self.execute(Method::POST, url, Some(body)).await?;
        decode(&response)
    }

    /// `PATCH /repos/{owner}/{name}`; `name` is the repository's current name
    pub async fn update_repository(
        &self,
        owner: &str,
        name: &str,
        request: &RepositoryMutationRequest,
    ) -> ApiResult<RepositoryRecord> {
        self.require_auth()?;
        require_segment("owner", owner)?;
        require_segment("repository name", name)?;

        let url = self.url_for(&["repos", owner, name])?;
        let body = serde_json::to_vec(&request.normalized())
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        let response = self.execute(Method::PATCH, url, Some(body)).await?;
        decode(&response)
    }

    /// `DELETE /repos/{owner}/{name}`
    pub async fn delete_repository(&self, owner: &str, name: &str) -> ApiResult<()> {
        self.require_auth()?;
        require_segment("owner", owner)?;
        require_segment("repository name", name)?;

        let url = self.url_for(&["repos", owner, name])?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    // Private helper methods

    fn require_auth(&self) -> ApiResult<&AuthConfig> {
        self.auth.as_ref().ok_or(ApiError::NotConfigured)
    }

    /// Base URL with percent-encoded path segments appended
    fn url_for(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfig("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request_headers(&self, has_body: bool) -> ApiResult<HeaderMap> {
        let mut headers = self.require_auth()?.headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_ACCEPT));
        headers.insert(USER_AGENT, self.user_agent.clone());
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> ApiResult<HttpResponse> {
        let headers = self.request_headers(body.is_some())?;
        let request = HttpRequest {
            method: method.clone(),
            url: url.clone(),
            headers: headers.clone(),
            body,
        };

        let started = Instant::now();
        let result = self.transport.send(request).await;
        self.log_exchange(&method, &url, &headers, &result, started.elapsed());

        let response = result?;
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(error_for_status(response.status, &response.body))
        }
    }

    fn log_exchange(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        result: &Result<HttpResponse, TransportError>,
        elapsed: Duration,
    ) {
        if self.http_log == HttpLogLevel::None {
            return;
        }
        let elapsed_ms = elapsed.as_millis() as u64;

        if self.http_log == HttpLogLevel::Headers {
            for (name, value) in headers {
                let shown = if name == AUTHORIZATION {
                    ghr_logging::redact(name)
                } else {
                    value.to_str().unwrap_or("<binary>")
                };
                tracing::info!(target: "ghr_rest_client::http", %method, header = %name, value = shown, "--> header");
            }
        }

        match result {
            Ok(response) => tracing::info!(
                target: "ghr_rest_client::http",
                %method,
                %url,
                status = response.status.as_u16(),
                elapsed_ms,
                bytes = response.body.len(),
                "<-- response"
            ),
            Err(err) => tracing::info!(
                target: "ghr_rest_client::http",
                %method,
                %url,
                elapsed_ms,
                error = %err,
                "<-- HTTP FAILED"
            ),
        }
    }
}

fn require_segment(what: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(())
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> ApiResult<R> {
    serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::UnexpectedResponse(format!("failed to decode response body: {}", e)))
}

fn error_for_status(status: StatusCode, body: &[u8]) -> ApiError {
    let message = GitHubErrorBody::parse(body)
        .map(|b| b.summary())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated { message },
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable { message },
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    }
}
