//! Slack incoming-webhook channel.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::template::{SLACK_TEMPLATE, render};
use crate::error::PingError;
use crate::ping::{Channel, DispatchContext, DispatchGroup, TemplateData};

/// Registry name of the Slack channel.
pub const SLACK_CHANNEL: &str = "slack";

/// Slack channel used when the integration names none.
pub const DEFAULT_SLACK_ROOM: &str = "general";

const ATTACHMENT_COLOR: &str = "#36a64f";

/// Posts one message per run to a Slack incoming webhook.
pub struct SlackChannel {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl SlackChannel {
    /// Creates a channel; without a webhook URL every delivery fails.
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        let configured = webhook_url.filter(|url| !url.trim().is_empty());
        if configured.is_none() {
            debug!("Slack notifications disabled (no webhook configured)");
        }
        Self {
            webhook_url: configured,
            client: reqwest::Client::new(),
        }
    }

    fn format_payload(room: &str, message: String, context: &DispatchContext) -> SlackPayload {
        let number = context.pull_request.number;
        SlackPayload {
            channel: room.to_owned(),
            text: format!("Review requested on PR #{number}"),
            attachments: vec![SlackAttachment {
                fallback: format!("PR #{number} is waiting for review"),
                color: ATTACHMENT_COLOR.to_owned(),
                author_name: "🛎️ gong".to_owned(),
                text: message,
                footer: "Sent via gong".to_owned(),
                actions: vec![SlackAction {
                    kind: "button".to_owned(),
                    text: "View PR".to_owned(),
                    url: context.pull_request.url.clone(),
                    style: "primary".to_owned(),
                }],
            }],
        }
    }
}

#[async_trait]
impl Channel for SlackChannel {
    fn name(&self) -> &str {
        SLACK_CHANNEL
    }

    async fn deliver(
        &self,
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<(), PingError> {
        let webhook_url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| PingError::Configuration {
                message: "no Slack webhook URL configured (use --slack-webhook or GONG_SLACK_WEBHOOK)"
                    .to_owned(),
            })?;
        let room = group.parameter("channel").unwrap_or(DEFAULT_SLACK_ROOM);

        let data = TemplateData::prepare(
            group.routed(),
            &context.pull_request,
            context.now,
            context.verbose,
        );
        let message = render(
            SLACK_CHANNEL,
            group.template().unwrap_or(SLACK_TEMPLATE),
            &data,
        )?;

        if context.dry_run {
            info!(
                channel = room,
                pr = context.pull_request.number,
                "[DRY RUN] Would send Slack notification: {message}"
            );
            return Ok(());
        }

        let payload = Self::format_payload(room, message, context);
        debug!(channel = room, "sending Slack notification");

        let response = self
            .client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| PingError::Network {
                message: format!("Slack webhook request failed: {error}"),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(channel = room, "Slack notification sent");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, %body, "Slack webhook request failed");
        Err(PingError::Channel {
            channel: SLACK_CHANNEL.to_owned(),
            message: format!("Slack returned {status}: {body}"),
        })
    }
}

#[derive(Debug, Serialize)]
struct SlackPayload {
    channel: String,
    text: String,
    attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Serialize)]
struct SlackAttachment {
    fallback: String,
    color: String,
    author_name: String,
    text: String,
    footer: String,
    actions: Vec<SlackAction>,
}

#[derive(Debug, Serialize)]
struct SlackAction {
    #[serde(rename = "type")]
    kind: String,
    text: String,
    url: String,
    style: String,
}
