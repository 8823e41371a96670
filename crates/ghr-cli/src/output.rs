// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Rendering of command results and notifications
#![allow(clippy::disallowed_methods)] // CLI is allowed to print to stdout/stderr

use ghr_api_contract::RepositoryRecord;
use ghr_core::{CollectingNotifier, Notification, NotificationLevel, Notifier};
use serde_json::{json, Value};
use std::sync::Arc;

/// Collects notifications during a command and prints them at the end
///
/// Human mode prints info messages to stdout and errors to stderr. JSON mode
/// prints a single document `{ "ok", "result", "notifications" }` to stdout.
pub struct Output {
    json: bool,
    notifier: Arc<CollectingNotifier>,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            notifier: Arc::new(CollectingNotifier::new()),
        }
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    /// Print `result` and the collected notifications
    ///
    /// `human` renders `result` for terminal output.
    pub fn finish(&self, ok: bool, result: Value, human: impl FnOnce(&Value)) {
        let notifications = self.notifier.take();
        if self.json {
            let doc = json!({
                "ok": ok,
                "result": result,
                "notifications": notifications,
            });
            println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string()));
            return;
        }

        human(&result);
        print_notifications(&notifications);
    }
}

fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        match notification.level {
            NotificationLevel::Info => println!("{}", notification.message),
            NotificationLevel::Error => eprintln!("{}", notification.message),
        }
    }
}

/// One line per repository: owner/name, language, description
pub fn print_repository_rows(records: &[RepositoryRecord]) {
    let width = records.iter().map(|r| full_name(r).len()).max().unwrap_or(0);
    for record in records {
        println!("{}", repository_row(record, width));
    }
}

fn full_name(record: &RepositoryRecord) -> String {
    format!("{}/{}", record.owner.login, record.name)
}

pub fn repository_row(record: &RepositoryRecord, width: usize) -> String {
    let language = record.primary_language.as_deref().unwrap_or("-");
    let description = record.description.as_deref().unwrap_or("");
    format!("{:<width$}  {:<12}  {}", full_name(record), language, description, width = width)
        .trim_end()
        .to_string()
}

pub fn print_line(line: &str) {
    println!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghr_api_contract::OwnerRef;

    #[test]
    fn rows_show_owner_and_fill_missing_fields() {
        let record = RepositoryRecord {
            id: 1,
            name: "api".into(),
            description: None,
            primary_language: None,
            owner: OwnerRef {
                login: "octocat".into(),
                avatar_url: String::new(),
            },
        };
        assert_eq!(repository_row(&record, 14), "octocat/api     -");

        let described = RepositoryRecord {
            description: Some("HTTP layer".into()),
            primary_language: Some("Rust".into()),
            ..record
        };
        assert_eq!(
            repository_row(&described, 11),
            "octocat/api  Rust          HTTP layer"
        );

        let forked = RepositoryRecord {
            owner: OwnerRef {
                login: "some-org".into(),
                avatar_url: String::new(),
            },
            ..described
        };
        assert!(repository_row(&forked, 12).starts_with("some-org/api  Rust"));
    }
}
