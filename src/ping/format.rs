//! Human-readable elapsed times and the data handed to templates.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::PingDecision;
use super::resolver::elapsed_seconds;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Rounds a duration in seconds to the nearest hour, halves away from zero.
#[must_use]
pub const fn round_to_hour(seconds: i64) -> i64 {
    let half = SECONDS_PER_HOUR.div_euclid(2);
    if seconds >= 0 {
        seconds.saturating_add(half).div_euclid(SECONDS_PER_HOUR) * SECONDS_PER_HOUR
    } else {
        -(seconds
            .saturating_neg()
            .saturating_add(half)
            .div_euclid(SECONDS_PER_HOUR)
            * SECONDS_PER_HOUR)
    }
}

/// Formats a duration as `Dd Hh`, `Dd`, `Hh`, `Mm`, or `just now`.
///
/// Negative durations read as `just now`.
#[must_use]
pub fn format_elapsed(seconds: i64) -> String {
    let total = seconds.max(0);
    let days = total.div_euclid(SECONDS_PER_DAY);
    let hours = total.div_euclid(SECONDS_PER_HOUR).rem_euclid(24);
    let minutes = total.div_euclid(SECONDS_PER_MINUTE).rem_euclid(60);

    if days > 0 {
        if hours > 0 {
            format!("{days}d {hours}h")
        } else {
            format!("{days}d")
        }
    } else if hours > 0 {
        format!("{hours}h")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "just now".to_owned()
    }
}

/// Elapsed time since the request, rounded to the hour and formatted.
#[must_use]
pub fn describe_elapsed(decision: &PingDecision, now: DateTime<Utc>) -> String {
    format_elapsed(round_to_hour(elapsed_seconds(
        now,
        decision.request.requested_at,
    )))
}

/// `reviewer (2d 3h ago, delay: 86400s)`.
#[must_use]
pub fn full_info(decision: &PingDecision, now: DateTime<Utc>) -> String {
    format!(
        "{} ({} ago, delay: {}s)",
        decision.request.display_name(),
        describe_elapsed(decision, now),
        decision.delay
    )
}

/// Pull request coordinates shared by every rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Pull request number.
    pub number: u64,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repository: String,
    /// Web URL of the pull request.
    pub url: String,
}

/// Values exposed to notification templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    /// Reviewers being pinged now.
    pub active_reviewers: Vec<String>,
    /// Reviewers not pinged, with their status.
    pub disabled_reviewers: Vec<String>,
    /// Pull request number as text.
    pub pr_number: String,
    /// Repository owner.
    pub repo_owner: String,
    /// Repository name.
    pub repo_name: String,
    /// Web URL of the pull request.
    pub pr_url: String,
}

impl TemplateData {
    /// Splits decisions into active and not-pinged reviewer labels.
    ///
    /// With `full_info` set, active entries read
    /// `name (elapsed ago, delay: Ns)`; otherwise just the name. Entries that
    /// are not pinged always carry full info plus their status.
    #[must_use]
    pub fn prepare(
        decisions: &[&PingDecision],
        pull_request: &PullRequestContext,
        now: DateTime<Utc>,
        full_info_for_active: bool,
    ) -> Self {
        let mut data = Self {
            pr_number: pull_request.number.to_string(),
            repo_owner: pull_request.owner.clone(),
            repo_name: pull_request.repository.clone(),
            pr_url: pull_request.url.clone(),
            ..Self::default()
        };

        for decision in decisions {
            if decision.should_ping {
                let label = if full_info_for_active {
                    full_info(decision, now)
                } else {
                    decision.request.display_name()
                };
                data.active_reviewers.push(label);
            } else {
                data.disabled_reviewers.push(format!(
                    "{}, status: {}",
                    full_info(decision, now),
                    decision.status()
                ));
            }
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::rstest;

    use super::*;
    use crate::ping::model::ReviewRequest;

    #[rstest]
    #[case(0, 0)]
    #[case(1_799, 0)]
    #[case(1_800, 3_600)]
    #[case(5_399, 3_600)]
    #[case(-1_800, -3_600)]
    #[case(-1_799, 0)]
    fn rounds_to_nearest_hour(#[case] seconds: i64, #[case] expected: i64) {
        assert_eq!(round_to_hour(seconds), expected);
    }

    #[rstest]
    #[case::days_and_hours(2 * 86_400 + 3 * 3_600, "2d 3h")]
    #[case::whole_days(86_400, "1d")]
    #[case::hours(5 * 3_600, "5h")]
    #[case::minutes(45 * 60, "45m")]
    #[case::seconds(59, "just now")]
    #[case::zero(0, "just now")]
    #[case::negative(-7_200, "just now")]
    fn formats_elapsed(#[case] seconds: i64, #[case] expected: &str) {
        assert_eq!(format_elapsed(seconds), expected);
    }

    fn pull_request() -> PullRequestContext {
        PullRequestContext {
            number: 42,
            owner: "octo".to_owned(),
            repository: "repo".to_owned(),
            url: "https://github.com/octo/repo/pull/42".to_owned(),
        }
    }

    fn decision(
        request: ReviewRequest,
        delay: i64,
        enabled: bool,
        should_ping: bool,
    ) -> PingDecision {
        PingDecision {
            request,
            delay,
            enabled,
            integrations: Vec::new(),
            should_ping,
        }
    }

    #[rstest]
    fn prepare_splits_active_and_disabled() {
        let now = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(10);
        let ninety_minutes = now - TimeDelta::minutes(90);
        let decisions = [
            decision(ReviewRequest::user("alice", ninety_minutes), 0, true, true),
            decision(ReviewRequest::team("core", ninety_minutes), 0, true, true),
            decision(ReviewRequest::user("bob", ninety_minutes), 86_400, true, false),
            decision(ReviewRequest::user("carol", ninety_minutes), 0, false, false),
        ];
        let borrowed: Vec<&PingDecision> = decisions.iter().collect();

        let data = TemplateData::prepare(&borrowed, &pull_request(), now, false);

        assert_eq!(data.active_reviewers, ["alice", "core (team)"]);
        assert_eq!(
            data.disabled_reviewers,
            [
                "bob (2h ago, delay: 86400s), status: waiting",
                "carol (2h ago, delay: 0s), status: disabled",
            ]
        );
        assert_eq!(data.pr_number, "42");
        assert_eq!(data.repo_owner, "octo");
        assert_eq!(data.repo_name, "repo");
    }

    #[rstest]
    fn prepare_with_full_info_describes_active_reviewers() {
        let now = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(10);
        let decisions = [decision(
            ReviewRequest::user("alice", now - TimeDelta::hours(27)),
            3_600,
            true,
            true,
        )];
        let borrowed: Vec<&PingDecision> = decisions.iter().collect();

        let data = TemplateData::prepare(&borrowed, &pull_request(), now, true);

        assert_eq!(
            data.active_reviewers,
            ["alice (1d 3h ago, delay: 3600s)"]
        );
        assert!(data.disabled_reviewers.is_empty());
    }
}
