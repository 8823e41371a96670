// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Scripted transport for testing
//!
//! [`MockTransport`] answers requests from a queue of canned replies and
//! records every request it receives, so tests can assert both on what the
//! code under test did with a response and on what it sent (or that it sent
//! nothing at all).

use async_trait::async_trait;
use ghr_api_contract::{OwnerRef, RepositoryRecord};
use ghr_rest_client::{HttpRequest, HttpResponse, StatusCode, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

type SendHook = Arc<dyn Fn(&HttpRequest) + Send + Sync>;

/// One canned reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Response { status: u16, body: Vec<u8> },
    NetworkError(TransportError),
}

impl MockReply {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        MockReply::Response {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn empty(status: u16) -> Self {
        MockReply::Response {
            status,
            body: Vec::new(),
        }
    }

    /// GitHub-shaped error body
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, &serde_json::json!({ "message": message }))
    }

    pub fn connection_refused() -> Self {
        MockReply::NetworkError(TransportError::Connect("connection refused".into()))
    }
}

/// In-memory [`Transport`] with scripted replies
///
/// Clones share the same queue and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    on_send: Option<SendHook>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("has_send_hook", &self.on_send.is_some())
            .finish_non_exhaustive()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose first replies are `replies`, in order
    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Run `hook` whenever a request arrives, before the reply is produced
    pub fn on_send(mut self, hook: impl Fn(&HttpRequest) + Send + Sync + 'static) -> Self {
        self.on_send = Some(Arc::new(hook));
        self
    }

    pub async fn push(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every request received so far, oldest first
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().await.last().cloned()
    }

    /// Replies not yet consumed
    pub async fn pending_replies(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Some(hook) = &self.on_send {
            hook(&request);
        }
        self.requests.lock().await.push(request);

        let reply = self.replies.lock().await.pop_front();
        match reply {
            Some(MockReply::Response { status, body }) => {
                let status = StatusCode::from_u16(status)
                    .map_err(|e| TransportError::Other(format!("bad scripted status: {}", e)))?;
                Ok(HttpResponse { status, body })
            }
            Some(MockReply::NetworkError(err)) => Err(err),
            None => Err(TransportError::Other("no scripted reply left".into())),
        }
    }
}

/// Repository fixture with GitHub's field names
pub fn repo_json(id: u64, name: &str, owner: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "description": format!("{} description", name),
        "language": "Rust",
        "private": false,
        "owner": {
            "login": owner,
            "avatar_url": format!("https://avatars.githubusercontent.com/{}", owner),
        }
    })
}

/// Typed counterpart of [`repo_json`]
pub fn repo_record(id: u64, name: &str, owner: &str) -> RepositoryRecord {
    RepositoryRecord {
        id,
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        primary_language: Some("Rust".to_string()),
        owner: OwnerRef {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/{}", owner),
        },
    }
}
