//! GitHub access for review reminders.
//!
//! This module wraps Octocrab to read a pull request, its pending reviewers,
//! and its timeline, and to post reminder comments. Errors are mapped into
//! [`PingError`](crate::PingError) variants so callers never see Octocrab
//! internals.

pub mod gateway;
pub mod intake;
pub mod locator;
pub mod models;

pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use intake::{PendingReviews, ReviewRequestIntake};
pub use locator::{
    DEFAULT_API_URL, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner, parse_repository,
};
pub use models::{
    IssueComment, PullRequestSnapshot, PullRequestStatus, RequestedReviewers,
    ReviewRequestedEvent, TeamReference,
};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;

#[cfg(test)]
mod tests;
