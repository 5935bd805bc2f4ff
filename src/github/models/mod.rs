//! Data models for pull requests, pending reviewers, and timeline events.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PullRequestStatus {
    /// Open for review.
    #[default]
    Open,
    /// Closed without merging.
    Closed,
    /// Merged.
    Merged,
}

impl PullRequestStatus {
    /// Lower-case label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Merged => "merged",
        }
    }
}

/// Pull request fields the reminder pipeline needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestSnapshot {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// Author login if present.
    pub author: Option<String>,
    /// Open, closed, or merged.
    pub status: PullRequestStatus,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
    /// Creation time, used when no request event is found.
    pub created_at: Option<DateTime<Utc>>,
}

/// A team reference as returned by the review host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamReference {
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
}

impl TeamReference {
    /// Whether `other` refers to the same team by name or slug.
    #[must_use]
    pub fn same_team(&self, other: &Self) -> bool {
        (!self.slug.is_empty() && self.slug == other.slug)
            || (!self.name.is_empty() && self.name == other.name)
    }
}

/// Reviewers whose review is still outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedReviewers {
    /// User logins.
    pub users: Vec<String>,
    /// Teams.
    pub teams: Vec<TeamReference>,
}

impl RequestedReviewers {
    /// Whether nobody is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.teams.is_empty()
    }
}

/// A `review_requested` timeline event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequestedEvent {
    /// Requested user login, for user requests.
    pub reviewer: Option<String>,
    /// Requested team, for team requests.
    pub team: Option<TeamReference>,
    /// When the request was made.
    pub created_at: DateTime<Utc>,
}

/// Pull request issue comment details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Comment body.
    pub body: Option<String>,
    /// Author login.
    pub author: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) state: Option<String>,
    #[serde(default)]
    pub(crate) merged: Option<bool>,
    pub(crate) merged_at: Option<DateTime<Utc>>,
    pub(crate) html_url: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiTeam {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiRequestedReviewers {
    pub(crate) users: Vec<ApiUser>,
    pub(crate) teams: Vec<ApiTeam>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiTimelineEvent {
    pub(crate) event: Option<String>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) requested_reviewer: Option<ApiUser>,
    pub(crate) requested_team: Option<ApiTeam>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) id: u64,
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
}

impl From<ApiPullRequest> for PullRequestSnapshot {
    fn from(value: ApiPullRequest) -> Self {
        let merged = value.merged.unwrap_or(false) || value.merged_at.is_some();
        let closed = value
            .state
            .as_deref()
            .is_some_and(|state| state.eq_ignore_ascii_case("closed"));
        let status = if merged {
            PullRequestStatus::Merged
        } else if closed {
            PullRequestStatus::Closed
        } else {
            PullRequestStatus::Open
        };

        Self {
            number: value.number,
            title: value.title,
            author: value.user.and_then(|user| user.login),
            status,
            html_url: value.html_url,
            created_at: value.created_at,
        }
    }
}

impl From<ApiTeam> for TeamReference {
    fn from(value: ApiTeam) -> Self {
        Self {
            name: value.name,
            slug: value.slug,
        }
    }
}

impl From<ApiRequestedReviewers> for RequestedReviewers {
    fn from(value: ApiRequestedReviewers) -> Self {
        Self {
            users: value
                .users
                .into_iter()
                .filter_map(|user| user.login)
                .collect(),
            teams: value.teams.into_iter().map(TeamReference::from).collect(),
        }
    }
}

impl ApiTimelineEvent {
    /// Keeps only timestamped `review_requested` events.
    pub(crate) fn into_review_requested(self) -> Option<ReviewRequestedEvent> {
        if self.event.as_deref() != Some("review_requested") {
            return None;
        }
        Some(ReviewRequestedEvent {
            reviewer: self.requested_reviewer.and_then(|user| user.login),
            team: self.requested_team.map(TeamReference::from),
            created_at: self.created_at?,
        })
    }
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            body: value.body,
            author: value.user.and_then(|user| user.login),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::open(json!({"number": 1, "state": "open"}), PullRequestStatus::Open)]
    #[case::closed(json!({"number": 1, "state": "closed", "merged": false}), PullRequestStatus::Closed)]
    #[case::merged_flag(json!({"number": 1, "state": "closed", "merged": true}), PullRequestStatus::Merged)]
    #[case::merged_at(
        json!({"number": 1, "state": "closed", "merged_at": "2025-01-02T03:04:05Z"}),
        PullRequestStatus::Merged
    )]
    fn pull_request_status_from_api(
        #[case] payload: serde_json::Value,
        #[case] expected: PullRequestStatus,
    ) {
        let api: ApiPullRequest = serde_json::from_value(payload).expect("payload should parse");
        assert_eq!(PullRequestSnapshot::from(api).status, expected);
    }

    #[test]
    fn timeline_events_other_than_review_requests_are_dropped() {
        let commented: ApiTimelineEvent = serde_json::from_value(json!({
            "event": "commented",
            "created_at": "2025-01-02T03:04:05Z"
        }))
        .expect("event should parse");
        assert!(commented.into_review_requested().is_none());
    }

    #[test]
    fn review_requested_event_carries_team() {
        let event: ApiTimelineEvent = serde_json::from_value(json!({
            "event": "review_requested",
            "created_at": "2025-01-02T03:04:05Z",
            "requested_team": {"name": "Core", "slug": "core"}
        }))
        .expect("event should parse");
        let parsed = event.into_review_requested().expect("review request");
        assert_eq!(
            parsed.team,
            Some(TeamReference {
                name: "Core".to_owned(),
                slug: "core".to_owned()
            })
        );
        assert!(parsed.reviewer.is_none());
    }

    #[test]
    fn teams_match_by_slug_or_name() {
        let listed = TeamReference {
            name: "Core".to_owned(),
            slug: "core".to_owned(),
        };
        let by_slug = TeamReference {
            name: String::new(),
            slug: "core".to_owned(),
        };
        let other = TeamReference {
            name: "Infra".to_owned(),
            slug: "infra".to_owned(),
        };
        assert!(listed.same_team(&by_slug));
        assert!(!listed.same_team(&other));
    }
}
