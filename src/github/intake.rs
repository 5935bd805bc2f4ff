//! Collects outstanding review requests for a pull request.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::gateway::PullRequestGateway;
use super::locator::PullRequestLocator;
use super::models::{PullRequestSnapshot, PullRequestStatus, ReviewRequestedEvent, TeamReference};
use crate::error::PingError;
use crate::ping::ReviewRequest;

/// A pull request together with its pending review requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReviews {
    /// Pull request metadata.
    pub snapshot: PullRequestSnapshot,
    /// Pending requests, users first then teams. Empty when not open.
    pub requests: Vec<ReviewRequest>,
}

/// Builds [`ReviewRequest`]s from pull request data using a gateway.
pub struct ReviewRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway + ?Sized,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ReviewRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway + ?Sized,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Load the pull request and, when it is open, its pending reviewers.
    ///
    /// Each request is timestamped with the latest matching
    /// `review_requested` timeline event, falling back to the pull request's
    /// creation time.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway, including
    /// [`PingError::NotFound`] for a missing pull request.
    pub async fn load(&self, locator: &PullRequestLocator) -> Result<PendingReviews, PingError> {
        let snapshot = self.client.pull_request(locator).await?;
        if snapshot.status != PullRequestStatus::Open {
            debug!(status = snapshot.status.label(), "pull request is not open");
            return Ok(PendingReviews {
                snapshot,
                requests: Vec::new(),
            });
        }

        let reviewers = self.client.requested_reviewers(locator).await?;
        if reviewers.is_empty() {
            return Ok(PendingReviews {
                snapshot,
                requests: Vec::new(),
            });
        }

        let events = self.client.review_requested_events(locator).await?;
        let fallback = snapshot.created_at.unwrap_or_default();
        debug!(
            users = reviewers.users.len(),
            teams = reviewers.teams.len(),
            events = events.len(),
            "loaded pending reviewers"
        );

        let users = reviewers.users.iter().map(|login| {
            let requested_at = latest_user_request(&events, login).unwrap_or(fallback);
            with_pull_request(ReviewRequest::user(login.clone(), requested_at), &snapshot)
        });
        let teams = reviewers.teams.iter().map(|team| {
            let requested_at = latest_team_request(&events, team).unwrap_or(fallback);
            with_pull_request(ReviewRequest::team(team.name.clone(), requested_at), &snapshot)
        });
        let requests = users.chain(teams).collect();

        Ok(PendingReviews { snapshot, requests })
    }
}

fn with_pull_request(mut request: ReviewRequest, snapshot: &PullRequestSnapshot) -> ReviewRequest {
    request.pr_title.clone_from(&snapshot.title);
    request.pr_author.clone_from(&snapshot.author);
    request
}

fn latest_user_request(events: &[ReviewRequestedEvent], login: &str) -> Option<DateTime<Utc>> {
    events
        .iter()
        .filter(|event| {
            event
                .reviewer
                .as_deref()
                .is_some_and(|reviewer| reviewer.eq_ignore_ascii_case(login))
        })
        .map(|event| event.created_at)
        .max()
}

fn latest_team_request(
    events: &[ReviewRequestedEvent],
    team: &TeamReference,
) -> Option<DateTime<Utc>> {
    events
        .iter()
        .filter(|event| {
            event
                .team
                .as_ref()
                .is_some_and(|requested| requested.same_team(team))
        })
        .map(|event| event.created_at)
        .max()
}
