//! Results-poller behavior: periodic refresh, graceful degradation,
//! and deterministic stop on close or disposal.
//!
//! Intervals are kept short (tens of milliseconds) so these run against
//! a real wiremock server without paused time.

use std::time::Duration;

use serde_json::json;
use tokio::time::{sleep, timeout};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quickpoll_core::{PollController, Session, SessionConfig};

const TICK: Duration = Duration::from_millis(20);

// ── Helpers ─────────────────────────────────────────────────────────

fn session_for(server: &MockServer) -> Session {
    let config = SessionConfig {
        service_url: server.uri().parse().expect("mock server URI parses"),
        token: None,
        timeout: Duration::from_secs(5),
        refresh_interval: TICK,
    };
    Session::new(config).expect("session builds")
}

async fn mount_details(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/4821/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "name": "Quiz 1",
            "question_type": "true_false",
            "options": [
                { "id": 101, "text": "True" },
                { "id": 102, "text": "False" },
            ],
        })))
        .mount(server)
        .await;
}

async fn attached_controller(server: &MockServer) -> PollController {
    mount_details(server).await;
    let session = session_for(server);
    let mut controller = session.controller();
    controller.attach("4821").await.expect("attach succeeds");
    controller
}

// ── Publishing ──────────────────────────────────────────────────────

#[tokio::test]
async fn poller_publishes_an_aggregate_per_successful_tick() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "results": [
                { "option": "True", "count": 3 },
                { "option": "False", "vote_count": 1 },
            ],
        })))
        .mount(&server)
        .await;

    let controller = attached_controller(&server).await;
    let mut rx = controller.results().expect("active poll has results");

    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("a tick lands within the deadline")
        .expect("sender alive");

    let results = rx.borrow().clone().expect("first aggregate published");
    assert_eq!(results.total_votes, 4);
    assert_eq!(results.options[0].label, "True");
    assert!((results.options[0].percent - 75.0).abs() < f64::EPSILON);
    assert!((results.options[1].percent - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn a_failed_tick_does_not_stop_the_loop() {
    let server = MockServer::start().await;
    // First fetch fails; every later fetch succeeds.
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "options": [ { "text": "True", "count": 2 }, { "text": "False", "count": 0 } ],
        })))
        .mount(&server)
        .await;

    let controller = attached_controller(&server).await;
    let mut rx = controller.results().expect("active poll has results");

    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("the loop recovers after the failed tick")
        .expect("sender alive");

    let results = rx.borrow().clone().expect("aggregate published");
    assert_eq!(results.total_votes, 2);

    let ticks = controller.poller().expect("poller running").ticks();
    assert!(ticks >= 2, "expected at least two fetch attempts, saw {ticks}");
}

#[tokio::test]
async fn an_absent_results_field_is_zero_options_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "name": "Quiz 1",
        })))
        .mount(&server)
        .await;

    let controller = attached_controller(&server).await;
    let mut rx = controller.results().expect("active poll has results");

    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("tick lands")
        .expect("sender alive");

    let results = rx.borrow().clone().expect("aggregate published");
    assert_eq!(results.total_votes, 0);
    assert!(results.options.is_empty());
}

// ── Stopping ────────────────────────────────────────────────────────

#[tokio::test]
async fn stop_freezes_the_tick_counter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "options": [],
        })))
        .mount(&server)
        .await;

    let controller = attached_controller(&server).await;
    let mut rx = controller.results().expect("active poll has results");
    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("first tick lands")
        .expect("sender alive");

    let poller = controller.poller().expect("poller running");
    poller.stop();
    sleep(TICK * 2).await; // let any in-flight tick settle

    let frozen = poller.ticks();
    sleep(TICK * 8).await;
    assert_eq!(
        poller.ticks(),
        frozen,
        "tick counter must not advance after stop"
    );
}

#[tokio::test]
async fn close_issues_no_further_result_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "options": [],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/4821/close/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Poll closed successfully.",
        })))
        .mount(&server)
        .await;

    let mut controller = attached_controller(&server).await;
    controller.close().await.expect("close succeeds");
    assert!(controller.poller().is_none());

    // close() joins the poller task, so the request log is final.
    let at_close = server
        .received_requests()
        .await
        .map(|reqs| reqs.len())
        .unwrap_or(0);
    sleep(TICK * 8).await;
    let later = server
        .received_requests()
        .await
        .map(|reqs| reqs.len())
        .unwrap_or(0);
    assert_eq!(at_close, later, "no fetch may be issued after close");
}

#[tokio::test]
async fn dropping_the_controller_cancels_the_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/4821/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poll_code": "4821",
            "options": [],
        })))
        .mount(&server)
        .await;

    let controller = attached_controller(&server).await;
    let mut rx = controller.results().expect("active poll has results");

    drop(controller);

    // The watch sender drops when the task unwinds after cancellation.
    let closed = timeout(Duration::from_secs(2), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok(), "poller task must stop after disposal");
}
