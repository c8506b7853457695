use std::time::Duration;
use url::Url;
use webhook_solver::application::retry::RetryPolicy;
use webhook_solver::application::workflow::WebhookWorkflow;
use webhook_solver::domain::graph::Outcome;
use webhook_solver::domain::payload::Registrant;
use webhook_solver::error::WorkflowError;
use webhook_solver::infrastructure::http::HttpWebhookClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn fast(policy: RetryPolicy) -> RetryPolicy {
    policy
        .with_initial_delay(Duration::from_millis(5))
        .with_max_delay(Some(Duration::from_millis(20)))
}

fn workflow(server: &MockServer) -> WebhookWorkflow {
    let base = Url::parse(&server.uri()).unwrap();
    let client = HttpWebhookClient::new(base, Duration::from_secs(5)).unwrap();
    WebhookWorkflow::new(
        Box::new(client.clone()),
        Box::new(client),
        Registrant::new("Ada", common::REG_NO, "ada@example.com"),
    )
    .with_token_retry(fast(RetryPolicy::token_default()))
    .with_submission_retry(fast(RetryPolicy::submission_default()))
}

async fn mount_token(server: &MockServer) {
    let webhook = format!("{}/testWebhook", server.uri());
    let body = common::token_body(&webhook);
    Mock::given(method("POST"))
        .and(path("/hiring/generateWebhook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn submissions(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/testWebhook")
        .count()
}

#[tokio::test]
async fn test_end_to_end_submission() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/testWebhook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = workflow(&server).run().await.unwrap();

    assert_eq!(report.outcome, Outcome::single(vec![4]));
    assert_eq!(report.status, 200);

    let requests = server.received_requests().await.unwrap();
    let submitted = requests
        .iter()
        .find(|request| request.url.path() == "/testWebhook")
        .unwrap();
    assert_eq!(
        submitted.headers.get("authorization").unwrap(),
        "test-access-token"
    );
    let body: serde_json::Value = submitted.body_json().unwrap();
    assert_eq!(body["outcome"], serde_json::json!([[4]]));
    assert_eq!(body["regNo"], common::REG_NO);
}

#[tokio::test]
async fn test_rate_limit_then_success_is_retried() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/testWebhook"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/testWebhook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = workflow(&server).run().await.unwrap();

    assert_eq!(report.submission_attempts, 2);
    assert_eq!(submissions(&server).await, 2);
}

#[tokio::test]
async fn test_non_rate_limit_error_is_not_retried() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/testWebhook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = workflow(&server).run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::Submission { attempts: 1, .. }));
    assert_eq!(submissions(&server).await, 1);
}

#[tokio::test]
async fn test_persistent_rate_limit_exhausts_budget() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/testWebhook"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = workflow(&server).run().await.unwrap_err();

    match err {
        WorkflowError::Submission { attempts, source } => {
            assert_eq!(attempts, 5);
            assert!(source.is_rate_limited());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(submissions(&server).await, 5);
}

#[tokio::test]
async fn test_token_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hiring/generateWebhook"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = workflow(&server).run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::TokenAcquisition { attempts: 3, .. }));
    assert_eq!(submissions(&server).await, 0);
}

#[tokio::test]
async fn test_token_recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hiring/generateWebhook"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/testWebhook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = workflow(&server).run().await.unwrap();
    assert_eq!(report.token_attempts, 3);
}
