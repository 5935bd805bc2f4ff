//! Posts a reminder comment on the pull request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::output::ConsoleOutput;
use super::template::{COMMENT_MARKER, COMMENT_TEMPLATE, render};
use crate::error::PingError;
use crate::github::{PullRequestGateway, PullRequestLocator};
use crate::ping::{Channel, DispatchContext, DispatchGroup, TemplateData};

/// Registry name of the comment channel.
pub const COMMENT_CHANNEL: &str = "comment";

/// Mentions due reviewers in a single marked issue comment.
///
/// At most one reminder comment is posted per pull request: an existing
/// comment carrying the marker suppresses further posts.
pub struct CommentChannel {
    gateway: Arc<dyn PullRequestGateway>,
    locator: PullRequestLocator,
    output: ConsoleOutput,
}

impl CommentChannel {
    /// Creates a channel posting to the pull request behind `locator`.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn PullRequestGateway>,
        locator: PullRequestLocator,
        output: ConsoleOutput,
    ) -> Self {
        Self {
            gateway,
            locator,
            output,
        }
    }

    /// Renders the comment body, appending the marker when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Template`] when a custom template is invalid.
    pub fn render_body(
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<String, PingError> {
        let data = TemplateData::prepare(group.routed(), &context.pull_request, context.now, false);
        let body = render(
            COMMENT_CHANNEL,
            group.template().unwrap_or(COMMENT_TEMPLATE),
            &data,
        )?;
        Ok(ensure_marker(body))
    }

    async fn already_commented(&self) -> bool {
        match self.gateway.issue_comments(&self.locator).await {
            Ok(comments) => comments.iter().any(|comment| {
                comment
                    .body
                    .as_deref()
                    .is_some_and(|body| body.contains(COMMENT_MARKER))
            }),
            Err(error) => {
                warn!(%error, "could not list existing comments; posting anyway");
                false
            }
        }
    }
}

fn ensure_marker(body: String) -> String {
    if body.contains(COMMENT_MARKER) {
        body
    } else {
        format!("{body}\n{COMMENT_MARKER}")
    }
}

#[async_trait]
impl Channel for CommentChannel {
    fn name(&self) -> &str {
        COMMENT_CHANNEL
    }

    async fn deliver(
        &self,
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<(), PingError> {
        let body = Self::render_body(group, context)?;

        if context.dry_run {
            return self
                .output
                .write_line(&format!("[DRY RUN] Would post GitHub comment:\n{body}"));
        }

        if self.already_commented().await {
            return self.output.write_line("Comment already exists for this PR.");
        }

        let posted = self
            .gateway
            .create_issue_comment(&self.locator, &body)
            .await
            .map_err(|error| PingError::Channel {
                channel: COMMENT_CHANNEL.to_owned(),
                message: format!("failed to post comment: {error}"),
            })?;
        info!(comment_id = posted.id, "posted reminder comment");
        Ok(())
    }
}
