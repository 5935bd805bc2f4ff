//! Gateways for talking to the review host through Octocrab.
//!
//! The trait lets the intake facade and the comment channel run against
//! mocks in tests while [`OctocrabGateway`] performs the real HTTP calls.

mod client;
mod error_mapping;
mod pages;
mod pull_request;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::error::PingError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{
    IssueComment, PullRequestSnapshot, RequestedReviewers, ReviewRequestedEvent,
};

/// Gateway that can read and annotate a pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch pull request metadata.
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, PingError>;

    /// Fetch users and teams whose review is still requested.
    async fn requested_reviewers(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<RequestedReviewers, PingError>;

    /// Fetch every `review_requested` event from the timeline.
    async fn review_requested_events(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ReviewRequestedEvent>, PingError>;

    /// Fetch all issue comments on the pull request.
    async fn issue_comments(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<IssueComment>, PingError>;

    /// Post a new issue comment.
    async fn create_issue_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<IssueComment, PingError>;
}
