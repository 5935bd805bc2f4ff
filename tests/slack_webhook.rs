//! Slack channel delivery against a mock incoming webhook.

#![expect(clippy::expect_used, reason = "integration test setup invariants")]

use gong::PingError;
use gong::channels::{SLACK_CHANNEL, SlackChannel};
use gong::ping::{Channel, DispatchContext, Integration, PingDecision, group_by_integration};
use gong::test_support::{decision, dispatch_context};
use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOOK_PATH: &str = "/services/T000/B000/XXXX";
const DEFAULT_MESSAGE: &str = "PR #42 is waiting for review: \
     <https://github.com/octo/repo/pull/42|octo/repo#42>\nReviewers: alice, bob";

fn slack(parameters: &[(&str, &str)]) -> Integration {
    parameters
        .iter()
        .fold(Integration::new(SLACK_CHANNEL), |integration, (key, value)| {
            integration.with_parameter(*key, *value)
        })
}

#[fixture]
fn decisions() -> Vec<PingDecision> {
    vec![
        decision("alice", 2, 0, true, true, vec![slack(&[("channel", "reviews")])]),
        decision("bob", 30, 3_600, true, true, vec![slack(&[])]),
        decision("carol", 1, 86_400, true, false, vec![slack(&[])]),
    ]
}

async fn deliver(
    channel: &SlackChannel,
    decisions: &[PingDecision],
    context: &DispatchContext,
) -> Result<(), PingError> {
    let plan = group_by_integration(decisions);
    let group = plan.group(SLACK_CHANNEL).expect("slack group");
    channel.deliver(group, context).await
}

fn webhook(server: &MockServer) -> SlackChannel {
    SlackChannel::new(Some(format!("{}{HOOK_PATH}", server.uri())))
}

#[rstest]
#[tokio::test]
async fn posts_attachment_payload(decisions: Vec<PingDecision>) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_partial_json(json!({
            "channel": "reviews",
            "text": "Review requested on PR #42",
            "attachments": [{
                "color": "#36a64f",
                "text": DEFAULT_MESSAGE,
                "footer": "Sent via gong",
                "actions": [{
                    "type": "button",
                    "text": "View PR",
                    "url": "https://github.com/octo/repo/pull/42",
                    "style": "primary"
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    deliver(&webhook(&server), &decisions, &dispatch_context(false))
        .await
        .expect("delivery should succeed");
}

#[rstest]
#[tokio::test]
async fn verbose_messages_carry_elapsed_time(decisions: Vec<PingDecision>) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_partial_json(json!({
            "attachments": [{
                "text": "PR #42 is waiting for review: \
                         <https://github.com/octo/repo/pull/42|octo/repo#42>\n\
                         Reviewers: alice (2h ago, delay: 0s), bob (1d 6h ago, delay: 3600s)"
            }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let context = DispatchContext {
        verbose: true,
        ..dispatch_context(false)
    };

    deliver(&webhook(&server), &decisions, &context)
        .await
        .expect("delivery should succeed");
}

#[rstest]
#[tokio::test]
async fn custom_template_replaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_partial_json(json!({
            "channel": "general",
            "attachments": [{ "text": "1 waiting on octo/repo" }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let templated = vec![decision(
        "alice",
        2,
        0,
        true,
        true,
        vec![slack(&[(
            "template",
            "{{ active_reviewers | length }} waiting on {{ repo_owner }}/{{ repo_name }}",
        )])],
    )];

    deliver(&webhook(&server), &templated, &dispatch_context(false))
        .await
        .expect("delivery should succeed");
}

#[rstest]
#[tokio::test]
async fn server_errors_fail_the_channel(decisions: Vec<PingDecision>) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("invalid_payload"))
        .mount(&server)
        .await;

    let result = deliver(&webhook(&server), &decisions, &dispatch_context(false)).await;

    assert!(
        matches!(
            result,
            Err(PingError::Channel { ref channel, ref message })
                if channel == SLACK_CHANNEL && message.contains("invalid_payload")
        ),
        "expected Channel error, got {result:?}"
    );
}

#[rstest]
#[tokio::test]
async fn dry_run_sends_nothing(decisions: Vec<PingDecision>) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    deliver(&webhook(&server), &decisions, &dispatch_context(true))
        .await
        .expect("dry run should succeed");
}

#[rstest]
#[case::unset(None)]
#[case::blank(Some("   ".to_owned()))]
#[tokio::test]
async fn missing_webhook_is_a_configuration_error(
    #[case] webhook_url: Option<String>,
    decisions: Vec<PingDecision>,
) {
    let channel = SlackChannel::new(webhook_url);

    let result = deliver(&channel, &decisions, &dispatch_context(true)).await;

    assert!(
        matches!(result, Err(PingError::Configuration { .. })),
        "expected Configuration error, got {result:?}"
    );
}
