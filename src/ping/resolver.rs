//! Turns review requests into ping decisions.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::model::{PingDecision, PingDefaults, ReviewRequest, Rule};
use super::rules::find_matching_rule;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whole seconds between `requested_at` and `now`, negative for future
/// timestamps.
#[must_use]
pub fn elapsed_seconds(now: DateTime<Utc>, requested_at: DateTime<Utc>) -> i64 {
    now.signed_duration_since(requested_at).num_seconds()
}

/// A disabled decision never pings. An enabled one pings once the delay has
/// elapsed; a delay of zero or less pings at once.
#[must_use]
pub const fn should_ping(enabled: bool, delay: i64, elapsed: i64) -> bool {
    enabled && (delay <= 0 || elapsed >= delay)
}

/// Resolves the effective settings for one request.
///
/// A matching rule replaces `delay` and `enabled` outright. Its integrations
/// replace the defaults only when it lists at least one.
#[must_use]
pub fn resolve(
    request: &ReviewRequest,
    defaults: &PingDefaults,
    rule: Option<&Rule>,
    now: DateTime<Utc>,
) -> PingDecision {
    let (delay, enabled, integrations) = match rule {
        Some(matched) => {
            let integrations = if matched.integrations.is_empty() {
                defaults.integrations.clone()
            } else {
                matched.integrations.clone()
            };
            (matched.delay, matched.enabled, integrations)
        }
        None => (
            defaults.delay,
            defaults.enabled,
            defaults.integrations.clone(),
        ),
    };

    let elapsed = elapsed_seconds(now, request.requested_at);
    PingDecision {
        request: request.clone(),
        delay,
        enabled,
        integrations,
        should_ping: should_ping(enabled, delay, elapsed),
    }
}

/// Resolves every request against the rule list, preserving input order.
#[must_use]
pub fn apply_rules(
    requests: &[ReviewRequest],
    rules: &[Rule],
    defaults: &PingDefaults,
    clock: &dyn Clock,
) -> Vec<PingDecision> {
    let now = clock.now();
    requests
        .iter()
        .map(|request| {
            let rule = find_matching_rule(request, rules);
            let decision = resolve(request, defaults, rule, now);
            debug!(
                reviewer = %request.from,
                matched_rule = rule.is_some(),
                delay = decision.delay,
                enabled = decision.enabled,
                should_ping = decision.should_ping,
                "resolved review request"
            );
            decision
        })
        .collect()
}
