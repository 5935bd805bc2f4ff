//! Builders for pull request fixtures used across tests.
//!
//! # Examples
//!
//! ```
//! use gong::github::models::test_support::open_pull_request;
//!
//! let snapshot = open_pull_request(42, "feat: billing", "alice");
//! assert_eq!(snapshot.number, 42);
//! assert_eq!(snapshot.author.as_deref(), Some("alice"));
//! ```

use chrono::{DateTime, Utc};

use super::{
    IssueComment, PullRequestSnapshot, PullRequestStatus, ReviewRequestedEvent, TeamReference,
};

/// An open pull request created at the Unix epoch.
#[must_use]
pub fn open_pull_request(number: u64, title: &str, author: &str) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number,
        title: Some(title.to_owned()),
        author: Some(author.to_owned()),
        status: PullRequestStatus::Open,
        html_url: Some(format!("https://github.com/octo/repo/pull/{number}")),
        created_at: Some(DateTime::<Utc>::UNIX_EPOCH),
    }
}

/// A team reference whose slug is the lower-cased name.
#[must_use]
pub fn team(name: &str) -> TeamReference {
    TeamReference {
        name: name.to_owned(),
        slug: name.to_lowercase(),
    }
}

/// A user review request made at `created_at`.
#[must_use]
pub fn user_requested(login: &str, created_at: DateTime<Utc>) -> ReviewRequestedEvent {
    ReviewRequestedEvent {
        reviewer: Some(login.to_owned()),
        team: None,
        created_at,
    }
}

/// A team review request made at `created_at`.
#[must_use]
pub fn team_requested(name: &str, created_at: DateTime<Utc>) -> ReviewRequestedEvent {
    ReviewRequestedEvent {
        reviewer: None,
        team: Some(team(name)),
        created_at,
    }
}

/// An issue comment with the given body.
#[must_use]
pub fn comment(id: u64, body: &str) -> IssueComment {
    IssueComment {
        id,
        body: Some(body.to_owned()),
        author: Some("gong-bot".to_owned()),
    }
}
