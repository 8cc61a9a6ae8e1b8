//! Integration tests for `PollClient` using wiremock.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quickpoll_api::types::{CreatePollRequest, VoteRequest};
use quickpoll_api::{AuthContext, Error, PollClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<AuthContext>, PollClient) {
    let server = MockServer::start().await;
    let auth = Arc::new(AuthContext::anonymous());
    let client = PollClient::new(&server.uri(), Arc::clone(&auth), &TransportConfig::default())
        .expect("client builds against mock server");
    (server, auth, client)
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn invalid_base_url_fails_at_construction() {
    let auth = Arc::new(AuthContext::anonymous());
    let err = PollClient::new("not a url", auth, &TransportConfig::default())
        .err()
        .expect("construction must fail before any request");
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn non_http_scheme_fails_at_construction() {
    let auth = Arc::new(AuthContext::anonymous());
    let err = PollClient::new("ftp://polls.example/api/", auth, &TransportConfig::default())
        .err()
        .expect("ftp endpoint rejected");
    assert!(matches!(err, Error::Config { .. }));
}

// ── Happy-path endpoints ────────────────────────────────────────────

#[tokio::test]
async fn test_create_poll() {
    // Base path nested under /api/quickpolls/ to verify relative joins.
    let server = MockServer::start().await;

    let expected_body = json!({
        "name": "Quiz 1",
        "question_type": "true_false",
        "option_count": 2,
        "is_active": true,
    });

    let response = json!({
        "id": 17,
        "name": "Quiz 1",
        "code": "4821",
        "creator": null,
        "question_type": "true_false",
        "option_count": 2,
        "is_active": true,
        "created_at": "2026-08-07T10:15:00Z",
        "closed_at": null,
        "options": [
            { "id": 101, "text": "True", "vote_count": 0 },
            { "id": 102, "text": "False", "vote_count": 0 },
        ],
    });

    Mock::given(method("POST"))
        .and(path("/api/quickpolls/create/"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let client = PollClient::new(
        &format!("{}/api/quickpolls/", server.uri()),
        Arc::new(AuthContext::anonymous()),
        &TransportConfig::default(),
    )
    .expect("client builds");

    let created = client
        .create_poll(&CreatePollRequest {
            name: "Quiz 1",
            question_type: "true_false",
            option_count: 2,
            is_active: true,
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.code, "4821");
    assert_eq!(created.options.len(), 2);
    assert_eq!(created.options[0].id, 101);
    assert_eq!(created.options[0].text, "True");
}

#[tokio::test]
async fn test_bearer_token_attached_after_login() {
    let (server, auth, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "options": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    auth.set_token(SecretString::from("t0ken".to_owned()));
    client.results("4821").await.expect("results fetch succeeds");
}

#[tokio::test]
async fn test_results_normalizes_both_spellings() {
    let (server, _auth, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "name": "Quiz 1",
            "question_type": "true_false",
            "results": [
                { "option": "True", "vote_count": 3, "voters": ["Ada"] },
                { "option": "False", "count": 1 },
            ],
        })))
        .mount(&server)
        .await;

    let payload = client.results("4821").await.expect("results decode");
    assert_eq!(payload.options.len(), 2);
    assert_eq!(payload.options[0].text, "True");
    assert_eq!(payload.options[0].count, 3);
    assert_eq!(payload.options[0].voters, vec!["Ada".to_owned()]);
    assert_eq!(payload.options[1].count, 1);
}

#[tokio::test]
async fn test_vote_conflict_surfaces_status_409() {
    let (server, _auth, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/4821/vote/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "You have already voted in this poll.",
        })))
        .mount(&server)
        .await;

    let err = client
        .submit_vote(
            "4821",
            &VoteRequest {
                option_id: 101,
                student_email: "ada@school.test",
                student_name: "Ada",
            },
        )
        .await
        .err()
        .expect("409 maps to a status error, not a panic");

    assert!(err.is_conflict());
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 409);
            assert!(body.contains("already voted"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_close_poll() {
    let (server, _auth, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/4821/close/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Poll closed successfully.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.close_poll("4821").await.expect("close succeeds");
}

#[tokio::test]
async fn test_polls_by_name_decodes_search_shape() {
    let (server, _auth, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/name/Quiz/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_query": "Quiz",
            "polls": [
                {
                    "poll_code": "4821",
                    "poll_name": "Quiz 1",
                    "created_at": "2026-08-07 10:15:00",
                    "results": [
                        { "option": "True", "vote_count": 3, "voters": ["Ada", "Grace"] },
                        { "option": "False", "vote_count": 1, "voters": ["Edsger"] },
                    ],
                },
            ],
        })))
        .mount(&server)
        .await;

    let found = client.polls_by_name("Quiz").await.expect("search decodes");
    assert_eq!(found.polls.len(), 1);
    let poll = &found.polls[0];
    assert_eq!(poll.poll_code, "4821");
    assert_eq!(poll.poll_name, "Quiz 1");
    assert!(poll.created_at.is_some());
    assert_eq!(poll.results[0].voters.len(), 2);
}

#[tokio::test]
async fn test_not_found_surfaces_status_404() {
    let (server, _auth, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/9999/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Poll not found or inactive.",
        })))
        .mount(&server)
        .await;

    let err = client
        .poll_details("9999")
        .await
        .err()
        .expect("404 is an error result");
    assert!(err.is_not_found());
}
