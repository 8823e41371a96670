// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Screen controllers
//!
//! Each controller owns the state of one screen and turns user actions into
//! API calls. Failures are reported through the [`Notifier`](crate::Notifier)
//! and returned as values; a controller stays usable after any failure.

pub mod form;
pub mod list;
pub mod login;

use async_trait::async_trait;
use ghr_api_contract::RepositoryRecord;
use ghr_rest_client::ApiError;

use crate::reconciler::ListChange;
use form::FormMode;

/// Result of a controller action that talks to the API
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    Failed(ApiError),
    /// The screen went away before the response arrived; nothing was applied
    Dismissed,
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Actions offered on a single list row
#[async_trait]
pub trait RepoActions: Send {
    /// Form mode to open when the user edits `record`
    fn on_edit(&self, record: &RepositoryRecord) -> FormMode;

    /// Delete `record` remotely and reconcile the visible list
    async fn on_delete(&mut self, record: &RepositoryRecord) -> Outcome<ListChange>;
}
