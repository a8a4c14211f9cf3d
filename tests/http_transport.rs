//! Integration tests for the HTTP transport against a mock service.
//!
//! These verify the request shapes the client sends (method, path, auth
//! header, body) and how responses and the streaming watch endpoint are
//! decoded.

use chirp::client::{Client, NewPost};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client {
    Client::connect(&server.uri(), SecretString::from("test-key")).unwrap()
}

#[tokio::test]
async fn test_sign_in_posts_session_with_bearer_auth() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/session"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "u1",
            "displayName": "Jane Doe"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let identity = test_client(&mock_server).sign_in().await.unwrap();
    assert_eq!(identity.uid, "u1");
    assert_eq!(identity.display_name, "Jane Doe");
}

#[tokio::test]
async fn test_sign_out_deletes_session() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/auth/session"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    test_client(&mock_server).sign_out().await.unwrap();
}

#[tokio::test]
async fn test_add_sends_camel_case_draft_and_returns_id() {
    let mock_server = MockServer::start().await;
    let draft = NewPost {
        content: "This is a valid tweet body".to_string(),
        user_id: "u1".to_string(),
        user_name: "Jane Doe".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        report_count: 0,
    };
    Mock::given(method("POST"))
        .and(path("/v1/tweets"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_json(json!({
            "content": "This is a valid tweet body",
            "userId": "u1",
            "userName": "Jane Doe",
            "createdAt": "2024-06-01T12:00:00Z",
            "reportCount": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "post-42" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let id = test_client(&mock_server).add(&draft).await.unwrap();
    assert_eq!(id, "post-42");
}

#[tokio::test]
async fn test_delete_targets_post_path() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tweets/post-42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    test_client(&mock_server).delete("post-42").await.unwrap();
}

#[tokio::test]
async fn test_report_posts_to_report_path() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tweets/post-42/report"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    test_client(&mock_server).report("post-42").await.unwrap();
}

#[tokio::test]
async fn test_report_missing_post_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tweets/gone/report"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).report("gone").await.unwrap_err();
    assert!(matches!(err, chirp::client::ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tweets/post-42/report"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).report("post-42").await.unwrap_err();
    match err {
        chirp::client::ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_watch_decodes_newline_delimited_snapshots() {
    let mock_server = MockServer::start().await;
    // Two snapshots separated by a blank keepalive line and one line of
    // garbage the decoder must skip.
    let body = concat!(
        "[]\n",
        "\n",
        "not json\n",
        r#"[{"id":"p1","content":"hello feed","userId":"u1","userName":"Jane Doe","createdAt":"2024-06-01T12:00:00Z","reportCount":1}]"#,
        "\n",
    );
    Mock::given(method("GET"))
        .and(path("/v1/tweets/watch"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let mut snapshots = test_client(&mock_server).watch().await.unwrap();

    let first = snapshots.next_snapshot().await.unwrap();
    assert_eq!(first, vec![]);

    let second = snapshots.next_snapshot().await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, "p1");
    assert_eq!(second[0].content, "hello feed");
    assert_eq!(second[0].report_count, 1);

    // Stream closed: the subscription ends
    assert!(snapshots.next_snapshot().await.is_none());
}

#[tokio::test]
async fn test_watch_rejected_when_unauthorized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tweets/watch"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).watch().await.unwrap_err();
    assert!(matches!(
        err,
        chirp::client::ClientError::Status { .. }
    ));
}
