//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::json;

use crate::error::PingError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::models::{
    ApiComment, ApiPullRequest, ApiRequestedReviewers, ApiTimelineEvent, IssueComment,
    PullRequestSnapshot, RequestedReviewers, ReviewRequestedEvent,
};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;
use super::pages::fetch_all_pages;

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a gateway for the locator's API base.
    ///
    /// Requests are anonymous when no token is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Configuration`] when the base URI cannot be parsed
    /// or [`PingError::Api`] when Octocrab fails to construct a client.
    pub fn connect(
        token: Option<&PersonalAccessToken>,
        locator: &PullRequestLocator,
    ) -> Result<Self, PingError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, PingError> {
        self.client
            .get::<ApiPullRequest, _, _>(locator.pull_request_path(), None::<&()>)
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error("pull request", &error))
    }

    async fn requested_reviewers(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<RequestedReviewers, PingError> {
        self.client
            .get::<ApiRequestedReviewers, _, _>(locator.requested_reviewers_path(), None::<&()>)
            .await
            .map(ApiRequestedReviewers::into)
            .map_err(|error| map_octocrab_error("requested reviewers", &error))
    }

    async fn review_requested_events(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ReviewRequestedEvent>, PingError> {
        let events: Vec<ApiTimelineEvent> =
            fetch_all_pages(&self.client, locator.timeline_path(), "timeline").await?;
        Ok(events
            .into_iter()
            .filter_map(ApiTimelineEvent::into_review_requested)
            .collect())
    }

    async fn issue_comments(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<IssueComment>, PingError> {
        let comments: Vec<ApiComment> =
            fetch_all_pages(&self.client, locator.comments_path(), "issue comments").await?;
        Ok(comments.into_iter().map(ApiComment::into).collect())
    }

    async fn create_issue_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<IssueComment, PingError> {
        let payload = json!({ "body": body });
        self.client
            .post::<_, ApiComment>(locator.comments_path(), Some(&payload))
            .await
            .map(ApiComment::into)
            .map_err(|error| map_octocrab_error("create comment", &error))
    }
}
