//! Name-keyed channel table and the dispatch loop.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::dispatch::{DispatchGroup, DispatchPlan};
use super::format::PullRequestContext;
use crate::error::PingError;

/// Run-wide values every channel receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchContext {
    /// Pull request being reported on.
    pub pull_request: PullRequestContext,
    /// Describe side effects instead of performing them.
    pub dry_run: bool,
    /// Include elapsed time and delay for active reviewers.
    pub verbose: bool,
    /// Instant used for elapsed-time rendering.
    pub now: DateTime<Utc>,
}

/// A notification destination.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Integration type this channel serves.
    fn name(&self) -> &str;

    /// Delivers one group of due reviewers.
    async fn deliver(
        &self,
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<(), PingError>;
}

/// A channel failure recorded during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFailure {
    /// Integration type of the failing group.
    pub channel: String,
    /// What went wrong.
    pub error: PingError,
}

/// What happened to each group of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Types delivered successfully.
    pub delivered: Vec<String>,
    /// Types with no registered channel.
    pub skipped: Vec<String>,
    /// Types whose channel returned an error.
    pub failures: Vec<ChannelFailure>,
}

impl DispatchReport {
    /// Whether every group was delivered or skipped.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

}

/// Channels keyed by integration type.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Box<dyn Channel>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel under its own name, replacing any previous entry.
    pub fn register(&mut self, channel: impl Channel + 'static) {
        self.channels
            .insert(channel.name().to_owned(), Box::new(channel));
    }

    /// Builder-style [`Self::register`].
    #[must_use]
    pub fn with(mut self, channel: impl Channel + 'static) -> Self {
        self.register(channel);
        self
    }

    /// Looks up a channel by integration type.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&dyn Channel> {
        self.channels.get(kind).map(Box::as_ref)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.channels.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Delivers every group in plan order.
    ///
    /// Unknown types are logged and skipped. A failing channel does not stop
    /// the remaining groups; every failure is collected in the report.
    pub async fn dispatch(
        &self,
        plan: &DispatchPlan<'_>,
        context: &DispatchContext,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for group in plan.groups() {
            let Some(channel) = self.get(group.kind()) else {
                warn!(integration = group.kind(), "unknown integration type; skipping");
                report.skipped.push(group.kind().to_owned());
                continue;
            };

            debug!(
                integration = group.kind(),
                reviewers = group.pings().len(),
                dry_run = context.dry_run,
                "dispatching reviewers"
            );
            match channel.deliver(group, context).await {
                Ok(()) => report.delivered.push(group.kind().to_owned()),
                Err(error) => {
                    warn!(integration = group.kind(), %error, "integration failed");
                    report.failures.push(ChannelFailure {
                        channel: group.kind().to_owned(),
                        error,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::ping::dispatch::group_by_integration;
    use crate::ping::model::{Integration, PingDecision, ReviewRequest};

    type Deliveries = Arc<Mutex<Vec<(String, Vec<String>)>>>;

    struct RecordingChannel {
        name: &'static str,
        deliveries: Deliveries,
        fail_with: Option<PingError>,
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        fn name(&self) -> &str {
            self.name
        }

        async fn deliver(
            &self,
            group: &DispatchGroup<'_>,
            _context: &DispatchContext,
        ) -> Result<(), PingError> {
            let reviewers = group
                .pings()
                .iter()
                .map(|decision| decision.request.from.clone())
                .collect();
            self.deliveries
                .lock()
                .expect("deliveries lock")
                .push((self.name.to_owned(), reviewers));
            self.fail_with.clone().map_or(Ok(()), Err)
        }
    }

    fn recording(name: &'static str, deliveries: &Deliveries) -> RecordingChannel {
        RecordingChannel {
            name,
            deliveries: Arc::clone(deliveries),
            fail_with: None,
        }
    }

    fn due(from: &str, kinds: &[&str]) -> PingDecision {
        PingDecision {
            request: ReviewRequest::user(from, DateTime::<Utc>::UNIX_EPOCH),
            delay: 0,
            enabled: true,
            integrations: kinds.iter().copied().map(Integration::new).collect(),
            should_ping: true,
        }
    }

    #[fixture]
    fn context() -> DispatchContext {
        DispatchContext {
            pull_request: PullRequestContext {
                number: 7,
                owner: "octo".to_owned(),
                repository: "repo".to_owned(),
                url: "https://github.com/octo/repo/pull/7".to_owned(),
            },
            dry_run: false,
            verbose: false,
            now: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(1),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_integration_is_skipped(context: DispatchContext) {
        let deliveries = Deliveries::default();
        let registry = ChannelRegistry::new().with(recording("stdout", &deliveries));
        let decisions = vec![due("alice", &["pager", "stdout"])];
        let plan = group_by_integration(&decisions);

        let report = registry.dispatch(&plan, &context).await;

        assert_eq!(report.skipped, ["pager"]);
        assert_eq!(report.delivered, ["stdout"]);
        assert!(report.is_success());
        let recorded = deliveries.lock().expect("deliveries lock").clone();
        assert_eq!(
            recorded,
            vec![("stdout".to_owned(), vec!["alice".to_owned()])]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn failures_do_not_stop_other_channels(context: DispatchContext) {
        let deliveries = Deliveries::default();
        let failing = RecordingChannel {
            fail_with: Some(PingError::Channel {
                channel: "slack".to_owned(),
                message: "webhook returned 500".to_owned(),
            }),
            ..recording("slack", &deliveries)
        };
        let registry = ChannelRegistry::new()
            .with(failing)
            .with(recording("comment", &deliveries));
        let decisions = vec![due("alice", &["slack", "comment"])];
        let plan = group_by_integration(&decisions);

        let report = registry.dispatch(&plan, &context).await;

        assert_eq!(report.delivered, ["comment"]);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_success());
        assert_eq!(
            deliveries.lock().expect("deliveries lock").len(),
            2,
            "both channels should be invoked"
        );
        let failure = report.failures.first().expect("failure should be recorded");
        assert_eq!(failure.channel, "slack");
        assert!(
            failure.error.to_string().contains("webhook returned 500"),
            "unexpected error: {}",
            failure.error
        );
    }

    #[rstest]
    fn registry_lists_names_sorted() {
        let deliveries = Deliveries::default();
        let registry = ChannelRegistry::new()
            .with(recording("stdout", &deliveries))
            .with(recording("comment", &deliveries));
        assert_eq!(registry.names(), ["comment", "stdout"]);
        assert!(registry.get("stdout").is_some());
        assert!(registry.get("slack").is_none());
    }
}
