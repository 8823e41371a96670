// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use ghr_api_contract::validation::validate_create_request;
use ghr_api_contract::{RepositoryMutationRequest, RepositoryRecord};
use ghr_rest_client::{ApiError, Transport};
use std::sync::Arc;

use crate::lifetime::ScreenLifetime;
use crate::messages;
use crate::notify::Notifier;
use crate::session::Session;

/// What the form is doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing an existing repository; `name` cannot change
    Edit {
        name: String,
        description: Option<String>,
    },
}

impl FormMode {
    /// Edit mode prefilled from `record`
    pub fn from_record(record: &RepositoryRecord) -> Self {
        FormMode::Edit {
            name: record.name.clone(),
            description: record.description.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

#[derive(Debug)]
pub enum FormRejection {
    /// Local check failed; no request was sent
    Invalid(String),
    Remote(ApiError),
}

#[derive(Debug)]
pub enum FormOutcome {
    Saved(RepositoryRecord),
    Rejected(FormRejection),
    Dismissed,
}

/// Controller behind the create/edit form
///
/// A saved form does not touch any list; callers refetch.
pub struct RepoFormController<T: Transport + Clone> {
    session: Arc<Session<T>>,
    notifier: Arc<dyn Notifier>,
    lifetime: ScreenLifetime,
    mode: FormMode,
    owner: Option<String>,
}

impl<T: Transport + Clone> RepoFormController<T> {
    pub fn new(session: Arc<Session<T>>, notifier: Arc<dyn Notifier>, mode: FormMode) -> Self {
        Self {
            session,
            notifier,
            lifetime: ScreenLifetime::new(),
            mode,
            owner: None,
        }
    }

    /// Owner used for updates; defaults to the session owner
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn lifetime(&self) -> ScreenLifetime {
        self.lifetime.clone()
    }

    pub async fn submit(&mut self, name: &str, description: &str) -> FormOutcome {
        let request = match self.prepare(name, description) {
            Ok(request) => request,
            Err(message) => {
                self.notifier.error(&message);
                return FormOutcome::Rejected(FormRejection::Invalid(message));
            }
        };

        let result = self.send(&request).await;
        if !self.lifetime.is_alive() {
            tracing::debug!(repo = %request.name, "form response arrived after dismissal; dropped");
            return FormOutcome::Dismissed;
        }

        match result {
            Ok(record) => {
                let message = if self.mode.is_edit() {
                    messages::UPDATED
                } else {
                    messages::CREATED
                };
                self.notifier.info(message);
                FormOutcome::Saved(record)
            }
            Err(err) => {
                tracing::warn!(repo = %request.name, error = %err, "saving repository failed");
                let message = if self.mode.is_edit() {
                    messages::update_failure(&err)
                } else {
                    messages::create_failure(&err)
                };
                self.notifier.error(&message);
                FormOutcome::Rejected(FormRejection::Remote(err))
            }
        }
    }

    fn prepare(&self, name: &str, description: &str) -> Result<RepositoryMutationRequest, String> {
        match &self.mode {
            FormMode::Create => {
                let request = RepositoryMutationRequest::from_form(name, description);
                validate_create_request(&request)
                    .map_err(|e| e.first_message().unwrap_or_else(|| e.to_string()))?;
                Ok(request)
            }
            FormMode::Edit { name: original, .. } => {
                let name = name.trim();
                if !name.is_empty() && name != original {
                    return Err(messages::NAME_IMMUTABLE.to_string());
                }
                Ok(RepositoryMutationRequest::from_form(original, description))
            }
        }
    }

    async fn send(&self, request: &RepositoryMutationRequest) -> Result<RepositoryRecord, ApiError> {
        let client = self.session.client().await?;
        match &self.mode {
            FormMode::Create => client.create_repository(request).await,
            FormMode::Edit { name, .. } => {
                let owner = match &self.owner {
                    Some(owner) => owner.clone(),
                    None => self.session.owner().await?,
                };
                client.update_repository(&owner, name, request).await
            }
        }
    }
}
