// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

mod common;

use common::{logged_in, notifier, session_with};
use ghr_api_contract::validation::{NAME_HAS_SPACES, NAME_REQUIRED};
use ghr_core::{
    messages, FormMode, FormOutcome, FormRejection, ListChange, NotificationLevel, Outcome,
    RepoActions, RepoFormController, RepoListController, ScreenLifetime,
};
use ghr_credentials::{AuthScheme, Credentials};
use ghr_rest_client::{ApiError, ErrorKind, Method};
use ghr_rest_mock_client::{repo_json, repo_record, MockReply, MockTransport};
use std::sync::{Arc, OnceLock};

fn list_reply(names: &[(u64, &str)]) -> MockReply {
    let repos: Vec<_> = names
        .iter()
        .map(|(id, name)| repo_json(*id, name, "octocat"))
        .collect();
    MockReply::json(200, &serde_json::Value::Array(repos))
}

#[tokio::test]
async fn test_refresh_holds_server_order() {
    let transport = MockTransport::with_replies([list_reply(&[(3, "gamma"), (1, "alpha"), (2, "beta")])]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());

    let outcome = controller.refresh().await;

    assert!(matches!(outcome, Outcome::Done(ListChange::Reset { len: 3 })));
    let names: Vec<_> = controller.list().records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["gamma", "alpha", "beta"]);
    assert!(notifier.messages().is_empty());

    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.method, Method::GET);
    assert_eq!(sent.url.path(), "/users/octocat/repos");
}

#[tokio::test]
async fn test_second_refresh_replaces_the_first() {
    let transport = MockTransport::with_replies([
        list_reply(&[(1, "alpha"), (2, "beta")]),
        list_reply(&[(9, "omega")]),
    ]);
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier());

    controller.refresh().await;
    controller.refresh().await;

    assert_eq!(controller.list().len(), 1);
    assert_eq!(controller.list().get(0).unwrap().name, "omega");
}

#[tokio::test]
async fn test_empty_list_notifies() {
    let transport = MockTransport::with_replies([list_reply(&[])]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());

    assert!(controller.refresh().await.is_done());
    assert!(controller.list().is_empty());
    assert_eq!(notifier.messages(), vec![messages::NO_REPOSITORIES.to_string()]);
}

#[tokio::test]
async fn test_refresh_unauthorized_keeps_previous_list() {
    let transport = MockTransport::with_replies([
        list_reply(&[(1, "alpha")]),
        MockReply::error(401, "Bad credentials"),
    ]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());
    controller.refresh().await;

    let outcome = controller.refresh().await;

    assert_eq!(outcome.error().map(ApiError::kind), Some(ErrorKind::Authentication));
    assert_eq!(controller.list().len(), 1);
    let last = notifier.notifications().pop().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.message, messages::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_server_error_and_network_messages() {
    let transport = MockTransport::with_replies([
        MockReply::error(500, "boom"),
        MockReply::connection_refused(),
    ]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());

    controller.refresh().await;
    let outcome = controller.refresh().await;

    assert_eq!(outcome.error().map(ApiError::kind), Some(ErrorKind::Network));
    assert_eq!(
        notifier.messages(),
        vec!["Error: HTTP 500".to_string(), messages::CONNECTION_ERROR.to_string()]
    );
}

#[tokio::test]
async fn test_unconfigured_refresh_sends_nothing() {
    let transport = MockTransport::new();
    let notifier = notifier();
    let mut controller = RepoListController::new(Arc::new(session_with(&transport)), notifier.clone());

    let outcome = controller.refresh().await;

    assert_eq!(outcome.error().map(ApiError::kind), Some(ErrorKind::Configuration));
    assert_eq!(transport.call_count().await, 0);
    assert_eq!(notifier.messages(), vec![messages::NOT_INITIALIZED.to_string()]);
}

#[tokio::test]
async fn test_delete_success_removes_exactly_that_record() {
    let transport = MockTransport::with_replies([
        list_reply(&[(1, "alpha"), (2, "beta"), (3, "gamma")]),
        MockReply::empty(204),
    ]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());
    controller.refresh().await;
    let target = controller.list().find_by_id(2).cloned().unwrap();

    let outcome = controller.on_delete(&target).await;

    match outcome {
        Outcome::Done(ListChange::Removed { index, record }) => {
            assert_eq!(index, 1);
            assert_eq!(record.id, 2);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    let ids: Vec<_> = controller.list().records().iter().map(|r| r.id).collect();
    assert_eq!(ids, [1, 3]);
    assert_eq!(notifier.messages().last().unwrap(), "Repository 'beta' deleted.");

    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.url.path(), "/repos/octocat/beta");
}

#[tokio::test]
async fn test_delete_failure_leaves_list_unchanged() {
    let transport = MockTransport::with_replies([
        list_reply(&[(1, "alpha"), (2, "beta")]),
        MockReply::error(404, "Not Found"),
    ]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());
    controller.refresh().await;
    let target = controller.list().find_by_id(1).cloned().unwrap();

    let outcome = controller.delete(&target).await;

    assert_eq!(outcome.error().and_then(ApiError::status), Some(404));
    assert_eq!(controller.list().len(), 2);
    assert_eq!(
        notifier.messages().last().unwrap(),
        "Error deleting repository: HTTP 404"
    );
}

#[tokio::test]
async fn test_delete_uses_record_owner() {
    let transport = MockTransport::with_replies([MockReply::empty(204)]);
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier());

    controller.delete(&repo_record(7, "shared", "some-org")).await;

    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.url.path(), "/repos/some-org/shared");
}

#[tokio::test]
async fn test_delete_of_unlisted_record_is_unchanged() {
    let transport = MockTransport::with_replies([MockReply::empty(204)]);
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier());

    let outcome = controller.delete(&repo_record(42, "ghost", "octocat")).await;

    assert!(matches!(outcome, Outcome::Done(ListChange::Unchanged)));
}

#[tokio::test]
async fn test_delete_named_prefers_listed_record() {
    let transport = MockTransport::with_replies([
        list_reply(&[(1, "alpha"), (2, "beta")]),
        MockReply::empty(204),
    ]);
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier());
    controller.refresh().await;

    let outcome = controller.delete_named("beta").await;

    assert!(matches!(outcome, Outcome::Done(ListChange::Removed { index: 1, .. })));
    assert_eq!(controller.list().len(), 1);
}

#[tokio::test]
async fn test_delete_named_outside_list_goes_to_server() {
    let transport = MockTransport::with_replies([MockReply::empty(204)]);
    let notifier = notifier();
    let session = session_with(&transport).with_owner(Some("some-org".into()));
    session
        .configure(&Credentials::new("octocat", "ghp_test", AuthScheme::Token))
        .await
        .unwrap();
    let session = Arc::new(session);
    let mut controller = RepoListController::new(session, notifier.clone());

    let outcome = controller.delete_named("far-away").await;

    assert!(matches!(outcome, Outcome::Done(ListChange::Unchanged)));
    assert_eq!(notifier.messages(), vec!["Repository 'far-away' deleted.".to_string()]);
    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.url.path(), "/repos/some-org/far-away");
}

#[tokio::test]
async fn test_delete_named_unknown_reports_server_error() {
    let transport = MockTransport::with_replies([MockReply::error(404, "Not Found")]);
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());

    let outcome = controller.delete_named("ghost").await;

    assert_eq!(outcome.error().and_then(ApiError::status), Some(404));
    assert_eq!(
        notifier.messages(),
        vec!["Error deleting repository: HTTP 404".to_string()]
    );
    assert_eq!(
        transport.last_request().await.unwrap().url.path(),
        "/repos/octocat/ghost"
    );
}

#[tokio::test]
async fn test_dismissed_delete_keeps_list_and_stays_quiet() {
    let screen: Arc<OnceLock<ScreenLifetime>> = Arc::new(OnceLock::new());
    let hook_screen = Arc::clone(&screen);
    let transport = MockTransport::with_replies([
        list_reply(&[(1, "alpha"), (2, "beta")]),
        MockReply::empty(204),
    ])
    .on_send(move |request| {
        if request.method == Method::DELETE {
            if let Some(lifetime) = hook_screen.get() {
                lifetime.dismiss();
            }
        }
    });
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());
    screen.set(controller.lifetime()).unwrap();
    controller.refresh().await;
    let before = notifier.messages();
    let target = controller.list().find_by_id(2).cloned().unwrap();

    let outcome = controller.delete(&target).await;

    assert!(matches!(outcome, Outcome::Dismissed));
    assert_eq!(controller.list().len(), 2);
    assert_eq!(notifier.messages(), before);
    assert_eq!(transport.call_count().await, 2);
}

#[tokio::test]
async fn test_dismissed_list_ignores_late_response() {
    let screen: Arc<OnceLock<ScreenLifetime>> = Arc::new(OnceLock::new());
    let hook_screen = Arc::clone(&screen);
    let transport = MockTransport::with_replies([list_reply(&[(1, "alpha")])]).on_send(move |_| {
        if let Some(lifetime) = hook_screen.get() {
            lifetime.dismiss();
        }
    });
    let notifier = notifier();
    let mut controller = RepoListController::new(logged_in(&transport).await, notifier.clone());
    screen.set(controller.lifetime()).unwrap();

    let outcome = controller.refresh().await;

    assert!(matches!(outcome, Outcome::Dismissed));
    assert!(controller.list().is_empty());
    assert!(notifier.messages().is_empty());
    assert_eq!(transport.call_count().await, 1);
}

#[tokio::test]
async fn test_on_edit_prefills_form() {
    let controller = RepoListController::new(logged_in(&MockTransport::new()).await, notifier());
    let mut record = repo_record(5, "tools", "octocat");
    record.description = Some("handy scripts".into());

    assert_eq!(
        controller.on_edit(&record),
        FormMode::Edit {
            name: "tools".into(),
            description: Some("handy scripts".into()),
        }
    );
}

#[tokio::test]
async fn test_create_with_space_is_rejected_locally() {
    let transport = MockTransport::new();
    let notifier = notifier();
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier.clone(), FormMode::Create);

    let outcome = form.submit("my repo", "").await;

    assert!(matches!(
        outcome,
        FormOutcome::Rejected(FormRejection::Invalid(ref m)) if m == NAME_HAS_SPACES
    ));
    assert_eq!(transport.call_count().await, 0);
    assert_eq!(notifier.messages(), vec![NAME_HAS_SPACES.to_string()]);
}

#[tokio::test]
async fn test_create_with_blank_name_is_rejected_locally() {
    let transport = MockTransport::new();
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier(), FormMode::Create);

    let outcome = form.submit("  ", "desc").await;

    assert!(matches!(
        outcome,
        FormOutcome::Rejected(FormRejection::Invalid(ref m)) if m == NAME_REQUIRED
    ));
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn test_create_conflict_message() {
    let transport = MockTransport::with_replies([MockReply::error(422, "Validation Failed")]);
    let notifier = notifier();
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier.clone(), FormMode::Create);

    let outcome = form.submit("hello-world", "").await;

    match outcome {
        FormOutcome::Rejected(FormRejection::Remote(err)) => {
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(notifier.messages(), vec![messages::CREATE_CONFLICT.to_string()]);
}

#[tokio::test]
async fn test_create_success_sends_trimmed_description() {
    let transport = MockTransport::with_replies([MockReply::json(201, &repo_json(10, "fresh", "octocat"))]);
    let notifier = notifier();
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier.clone(), FormMode::Create);

    let outcome = form.submit("fresh", "  new project  ").await;

    assert!(matches!(outcome, FormOutcome::Saved(ref r) if r.id == 10));
    assert_eq!(notifier.messages(), vec![messages::CREATED.to_string()]);
    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.url.path(), "/user/repos");
    assert_eq!(
        sent.json_body().unwrap(),
        serde_json::json!({"name": "fresh", "description": "new project"})
    );
}

#[tokio::test]
async fn test_edit_patches_original_name() {
    let transport = MockTransport::with_replies([MockReply::json(200, &repo_json(5, "tools", "octocat"))]);
    let notifier = notifier();
    let mode = FormMode::Edit {
        name: "tools".into(),
        description: None,
    };
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier.clone(), mode);

    let outcome = form.submit("", "updated").await;

    assert!(matches!(outcome, FormOutcome::Saved(_)));
    assert_eq!(notifier.messages(), vec![messages::UPDATED.to_string()]);
    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.method, Method::PATCH);
    assert_eq!(sent.url.path(), "/repos/octocat/tools");
    assert_eq!(
        sent.json_body().unwrap(),
        serde_json::json!({"name": "tools", "description": "updated"})
    );
}

#[tokio::test]
async fn test_edit_rejects_rename() {
    let transport = MockTransport::new();
    let mode = FormMode::Edit {
        name: "tools".into(),
        description: None,
    };
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier(), mode);

    let outcome = form.submit("renamed", "").await;

    assert!(matches!(
        outcome,
        FormOutcome::Rejected(FormRejection::Invalid(ref m)) if m == messages::NAME_IMMUTABLE
    ));
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn test_edit_failure_message_carries_status() {
    let transport = MockTransport::with_replies([MockReply::error(403, "Forbidden")]);
    let notifier = notifier();
    let mode = FormMode::Edit {
        name: "tools".into(),
        description: None,
    };
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier.clone(), mode)
        .with_owner("some-org");

    form.submit("tools", "x").await;

    assert_eq!(
        notifier.messages(),
        vec!["Error updating repository: HTTP 403".to_string()]
    );
    let sent = transport.last_request().await.unwrap();
    assert_eq!(sent.url.path(), "/repos/some-org/tools");
}

#[tokio::test]
async fn test_dismissed_form_drops_saved_record() {
    let screen: Arc<OnceLock<ScreenLifetime>> = Arc::new(OnceLock::new());
    let hook_screen = Arc::clone(&screen);
    let transport = MockTransport::with_replies([MockReply::json(201, &repo_json(10, "fresh", "octocat"))])
        .on_send(move |_| {
            if let Some(lifetime) = hook_screen.get() {
                lifetime.dismiss();
            }
        });
    let notifier = notifier();
    let mut form = RepoFormController::new(logged_in(&transport).await, notifier.clone(), FormMode::Create);
    screen.set(form.lifetime()).unwrap();

    let outcome = form.submit("fresh", "").await;

    assert!(matches!(outcome, FormOutcome::Dismissed));
    assert!(notifier.messages().is_empty());
    assert_eq!(transport.call_count().await, 1);
}
