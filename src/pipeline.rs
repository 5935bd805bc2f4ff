//! One reminder run: fetch, resolve, group, dispatch.

use tracing::{debug, info};

use crate::error::PingError;
use crate::github::{
    PullRequestGateway, PullRequestLocator, PullRequestStatus, ReviewRequestIntake,
};
use crate::ping::{
    ChannelRegistry, Clock, DispatchContext, DispatchReport, PingDecision, PingDefaults,
    PullRequestContext, Rule, apply_rules, group_by_integration,
};

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct PingJob {
    /// Pull request to remind reviewers about.
    pub locator: PullRequestLocator,
    /// Settings applied when no rule matches.
    pub defaults: PingDefaults,
    /// Rules in priority order.
    pub rules: Vec<Rule>,
    /// Describe side effects without performing them.
    pub dry_run: bool,
    /// Include elapsed time and delay in active reviewer labels.
    pub verbose: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingOutcome {
    /// The pull request does not exist.
    PullRequestNotFound,
    /// The pull request is closed or merged.
    PullRequestClosed(PullRequestStatus),
    /// Nobody has a pending review request.
    NoReviewers,
    /// Reviewers are pending but none is due.
    NothingDue {
        /// Every resolved decision.
        decisions: Vec<PingDecision>,
    },
    /// At least one group was handed to the registry.
    Dispatched {
        /// Every resolved decision.
        decisions: Vec<PingDecision>,
        /// Per-channel results.
        report: DispatchReport,
    },
}

/// Runs reminder jobs against a gateway and a channel registry.
pub struct PingPipeline<'a> {
    gateway: &'a dyn PullRequestGateway,
    registry: &'a ChannelRegistry,
    clock: &'a dyn Clock,
}

impl<'a> PingPipeline<'a> {
    /// Creates a pipeline.
    #[must_use]
    pub const fn new(
        gateway: &'a dyn PullRequestGateway,
        registry: &'a ChannelRegistry,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            gateway,
            registry,
            clock,
        }
    }

    /// Executes one run.
    ///
    /// Informational early exits are reported as outcomes, not errors.
    /// Channel failures are logged and collected in the report.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure other than a missing pull request.
    pub async fn run(&self, job: &PingJob) -> Result<PingOutcome, PingError> {
        let owner = job.locator.owner().as_str();
        let repository = job.locator.repository().as_str();
        let number = job.locator.number().get();

        let pending = match ReviewRequestIntake::new(self.gateway).load(&job.locator).await {
            Ok(pending) => pending,
            Err(error) if error.is_not_found() => {
                info!(
                    "Pull Request #{number} was not found in {owner}/{repository}. \
                     Please check if the PR number and repository are correct."
                );
                return Ok(PingOutcome::PullRequestNotFound);
            }
            Err(error) => return Err(error),
        };

        if pending.snapshot.status != PullRequestStatus::Open {
            info!(
                "Pull Request #{number} is {}. No need to ping reviewers.",
                pending.snapshot.status.label()
            );
            return Ok(PingOutcome::PullRequestClosed(pending.snapshot.status));
        }
        debug!("Pull Request #{number} is open. Proceeding with reviewer checks.");

        if pending.requests.is_empty() {
            info!("No reviewers found for PR #{number}.");
            return Ok(PingOutcome::NoReviewers);
        }

        let decisions = apply_rules(&pending.requests, &job.rules, &job.defaults, self.clock);
        let plan = group_by_integration(&decisions);
        if plan.is_empty() {
            info!("No reviewers match delay criteria for PR #{number}.");
            return Ok(PingOutcome::NothingDue { decisions });
        }

        let context = DispatchContext {
            pull_request: PullRequestContext {
                number,
                owner: owner.to_owned(),
                repository: repository.to_owned(),
                url: pending
                    .snapshot
                    .html_url
                    .clone()
                    .unwrap_or_else(|| job.locator.web_url()),
            },
            dry_run: job.dry_run,
            verbose: job.verbose,
            now: self.clock.now(),
        };
        let report = self.registry.dispatch(&plan, &context).await;

        Ok(PingOutcome::Dispatched { decisions, report })
    }
}
