// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use async_trait::async_trait;
use ghr_api_contract::{ListOptions, RepositoryRecord};
use ghr_rest_client::{ApiError, Transport};
use std::sync::Arc;

use super::form::FormMode;
use super::{Outcome, RepoActions};
use crate::lifetime::ScreenLifetime;
use crate::messages;
use crate::notify::Notifier;
use crate::reconciler::{ListChange, RepositoryList};
use crate::session::Session;

/// Controller behind the repository list screen
///
/// Owns the [`RepositoryList`]; nothing else mutates it.
pub struct RepoListController<T: Transport + Clone> {
    session: Arc<Session<T>>,
    notifier: Arc<dyn Notifier>,
    lifetime: ScreenLifetime,
    list: RepositoryList,
    options: ListOptions,
}

impl<T: Transport + Clone> RepoListController<T> {
    pub fn new(session: Arc<Session<T>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            lifetime: ScreenLifetime::new(),
            list: RepositoryList::new(),
            options: ListOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }

    /// Liveness flag; dismiss it when the screen closes
    pub fn lifetime(&self) -> ScreenLifetime {
        self.lifetime.clone()
    }

    pub fn list(&self) -> &RepositoryList {
        &self.list
    }

    /// Fetch the full list and replace the visible one
    pub async fn refresh(&mut self) -> Outcome<ListChange> {
        let result = self.fetch().await;
        if !self.lifetime.is_alive() {
            tracing::debug!("list response arrived after dismissal; dropped");
            return Outcome::Dismissed;
        }

        match result {
            Ok(records) => {
                let change = self.list.replace_all(records);
                if self.list.is_empty() {
                    self.notifier.info(messages::NO_REPOSITORIES);
                }
                Outcome::Done(change)
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing repositories failed");
                self.notifier.error(&messages::list_failure(&err));
                Outcome::Failed(err)
            }
        }
    }

    /// Delete `record` and remove it locally on success
    pub async fn delete(&mut self, record: &RepositoryRecord) -> Outcome<ListChange> {
        let result = self.send_delete(&record.owner.login, &record.name).await;
        self.apply_delete(&record.name, Some(record.id), result)
    }

    /// Delete by name under the session owner
    ///
    /// Uses the listed record when there is one. A name outside the visible
    /// list is still sent; the server decides whether it exists.
    pub async fn delete_named(&mut self, name: &str) -> Outcome<ListChange> {
        if let Some(record) = self.list.find_by_name(name).cloned() {
            return self.delete(&record).await;
        }
        let result = match self.session.owner().await {
            Ok(owner) => self.send_delete(&owner, name).await,
            Err(err) => Err(err),
        };
        self.apply_delete(name, None, result)
    }

    async fn send_delete(&self, owner: &str, name: &str) -> Result<(), ApiError> {
        let client = self.session.client().await?;
        client.delete_repository(owner, name).await
    }

    fn apply_delete(
        &mut self,
        name: &str,
        id: Option<u64>,
        result: Result<(), ApiError>,
    ) -> Outcome<ListChange> {
        if !self.lifetime.is_alive() {
            tracing::debug!(repo = %name, "delete response arrived after dismissal; dropped");
            return Outcome::Dismissed;
        }

        match result {
            Ok(()) => {
                let change = match id {
                    Some(id) => self.list.remove_by_id(id),
                    None => ListChange::Unchanged,
                };
                self.notifier.info(&messages::deleted(name));
                Outcome::Done(change)
            }
            Err(err) => {
                tracing::warn!(repo = %name, error = %err, "delete failed");
                self.notifier.error(&messages::delete_failure(&err));
                Outcome::Failed(err)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<RepositoryRecord>, ApiError> {
        let client = self.session.client().await?;
        let owner = self.session.owner().await?;
        client.list_repositories_sorted(&owner, self.options).await
    }
}

#[async_trait]
impl<T: Transport + Clone> RepoActions for RepoListController<T> {
    fn on_edit(&self, record: &RepositoryRecord) -> FormMode {
        FormMode::from_record(record)
    }

    async fn on_delete(&mut self, record: &RepositoryRecord) -> Outcome<ListChange> {
        self.delete(record).await
    }
}
