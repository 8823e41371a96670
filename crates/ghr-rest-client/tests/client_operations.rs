// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Operation-level tests against a scripted transport

use ghr_api_contract::{ListOptions, RepositoryMutationRequest, RepositorySort, SortDirection};
use ghr_rest_client::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    ApiError, AuthConfig, ClientBuilder, ErrorKind, GitHubClient, HttpLogLevel, Method,
};
use ghr_rest_mock_client::{repo_json, MockReply, MockTransport};
use serde_json::json;

fn client_with(transport: &MockTransport) -> GitHubClient<MockTransport> {
    ClientBuilder::new()
        .auth(AuthConfig::token("ghp_test"))
        .http_log(HttpLogLevel::Headers)
        .build_with_transport(transport.clone())
        .unwrap()
}

#[tokio::test]
async fn list_preserves_server_order_and_sends_defaults() {
    let transport = MockTransport::with_replies([MockReply::json(
        200,
        &json!([
            repo_json(3, "newest", "octocat"),
            repo_json(1, "oldest", "octocat"),
            repo_json(2, "middle", "octocat"),
        ]),
    )]);
    let client = client_with(&transport);

    let repos = client.list_repositories("octocat").await.unwrap();
    let ids: Vec<u64> = repos.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.path(), "/users/octocat/repos");
    assert_eq!(request.url.query(), Some("sort=created&direction=desc"));
    assert_eq!(request.headers[ACCEPT], "application/vnd.github.v3+json");
    assert!(request.headers[USER_AGENT].to_str().unwrap().starts_with("gh-repos/"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn list_accepts_explicit_ordering() {
    let transport = MockTransport::with_replies([MockReply::json(200, &json!([]))]);
    let client = client_with(&transport);

    let options = ListOptions {
        sort: RepositorySort::FullName,
        direction: SortDirection::Asc,
    };
    assert!(client.list_repositories_sorted("octocat", options).await.unwrap().is_empty());

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.url.query(), Some("sort=full_name&direction=asc"));
}

#[tokio::test]
async fn exactly_one_authorization_header_per_scheme() {
    for (auth, expected) in [
        (AuthConfig::token("ghp_test"), "token ghp_test"),
        (AuthConfig::basic("octocat", "hunter2"), "Basic b2N0b2NhdDpodW50ZXIy"),
    ] {
        let transport = MockTransport::with_replies([MockReply::json(200, &json!([]))]);
        let client = ClientBuilder::new()
            .auth(auth)
            .build_with_transport(transport.clone())
            .unwrap();
        client.list_repositories("octocat").await.unwrap();

        let request = transport.last_request().await.unwrap();
        let values: Vec<_> = request.headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], expected);
    }
}

#[tokio::test]
async fn unconfigured_client_sends_nothing() {
    let transport = MockTransport::new();
    let client = ClientBuilder::new().build_with_transport(transport.clone()).unwrap();
    let request = RepositoryMutationRequest::from_form("demo", "");

    let results = [
        client.list_repositories("octocat").await.map(|_| ()),
        client.create_repository(&request).await.map(|_| ()),
        client.update_repository("octocat", "demo", &request).await.map(|_| ()),
        client.delete_repository("octocat", "demo").await,
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn list_401_is_authentication() {
    let transport = MockTransport::with_replies([MockReply::error(401, "Bad credentials")]);
    let client = client_with(&transport);

    let err = client.list_repositories("octocat").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn list_other_status_is_server_error() {
    let transport = MockTransport::with_replies([MockReply::error(404, "Not Found")]);
    let client = client_with(&transport);

    match client.list_repositories("nobody").await.unwrap_err() {
        ApiError::Server { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn network_failure_is_network_kind() {
    let transport = MockTransport::with_replies([MockReply::connection_refused()]);
    let client = client_with(&transport);

    let err = client.list_repositories("octocat").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn malformed_success_body_is_unexpected_response() {
    let transport = MockTransport::with_replies([MockReply::json(200, &json!({"not": "a list"}))]);
    let client = client_with(&transport);

    assert!(matches!(
        client.list_repositories("octocat").await,
        Err(ApiError::UnexpectedResponse(_))
    ));
}

#[tokio::test]
async fn create_posts_trimmed_body() {
    let transport =
        MockTransport::with_replies([MockReply::json(201, &repo_json(10, "demo", "octocat"))]);
    let client = client_with(&transport);

    let created = client
        .create_repository(&RepositoryMutationRequest::from_form("demo", "  my demo  "))
        .await
        .unwrap();
    assert_eq!(created.id, 10);

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/user/repos");
    assert_eq!(
        request.json_body().unwrap(),
        json!({"name": "demo", "description": "my demo"})
    );
}

#[tokio::test]
async fn create_with_space_is_rejected_locally() {
    let transport = MockTransport::new();
    let client = client_with(&transport);

    let err = client
        .create_repository(&RepositoryMutationRequest::from_form("my repo", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn create_422_is_unprocessable() {
    let transport = MockTransport::with_replies([MockReply::json(
        422,
        &json!({
            "message": "Repository creation failed.",
            "errors": [{"resource": "Repository", "code": "custom", "field": "name", "message": "name already exists on this account"}]
        }),
    )]);
    let client = client_with(&transport);

    match client
        .create_repository(&RepositoryMutationRequest::from_form("taken", ""))
        .await
        .unwrap_err()
    {
        ApiError::Unprocessable { message } => {
            assert!(message.contains("name already exists"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn update_patches_existing_name() {
    let transport =
        MockTransport::with_replies([MockReply::json(200, &repo_json(5, "demo", "octocat"))]);
    let client = client_with(&transport);

    let updated = client
        .update_repository(
            "octocat",
            "demo",
            &RepositoryMutationRequest::from_form("demo", "new text"),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "demo");

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.url.path(), "/repos/octocat/demo");
    assert_eq!(request.json_body().unwrap()["description"], "new text");
}

#[tokio::test]
async fn delete_accepts_empty_204() {
    let transport = MockTransport::with_replies([MockReply::empty(204)]);
    let client = client_with(&transport);

    client.delete_repository("octocat", "demo").await.unwrap();

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url.path(), "/repos/octocat/demo");
}

#[tokio::test]
async fn delete_403_is_server_error_with_status() {
    let transport = MockTransport::with_replies([MockReply::error(
        403,
        "Must have admin rights to Repository.",
    )]);
    let client = client_with(&transport);

    let err = client.delete_repository("octocat", "demo").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.kind(), ErrorKind::Server);
}

#[tokio::test]
async fn blank_owner_is_invalid_input() {
    let transport = MockTransport::new();
    let client = client_with(&transport);

    assert!(matches!(
        client.list_repositories("  ").await,
        Err(ApiError::InvalidInput(_))
    ));
    assert_eq!(transport.call_count().await, 0);
}
