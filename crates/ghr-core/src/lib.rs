// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Core of gh-repos: the authenticated [`Session`], the repository list
//! [`RepositoryList`] reconciler and the controllers that bind user actions to
//! API calls.
//!
//! Controllers never surface remote failures as panics or process exits; each
//! failure becomes a user notification plus an [`Outcome`] value the front end
//! can inspect.

pub mod controllers;
pub mod error;
pub mod lifetime;
pub mod messages;
pub mod notify;
pub mod reconciler;
pub mod session;

pub use controllers::{
    form::{FormMode, FormOutcome, FormRejection, RepoFormController},
    list::RepoListController,
    login::{LoginController, LoginOutcome},
    Outcome, RepoActions,
};
pub use error::{Error, Result};
pub use lifetime::ScreenLifetime;
pub use notify::{CollectingNotifier, Notification, NotificationLevel, Notifier};
pub use reconciler::{ListChange, RepositoryList};
pub use session::Session;
