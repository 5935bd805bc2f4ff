//! The `ping` subcommand: wires configuration into a [`PingPipeline`] run.

use std::sync::Arc;

use tracing::debug;

use gong::channels::{ChannelSettings, ConsoleOutput, default_registry};
use gong::github::{OctocrabGateway, PullRequestGateway, PullRequestLocator};
use gong::local::current_repository;
use gong::ping::SystemClock;
use gong::{GongConfig, PingError, PingJob, PingOutcome, PingPipeline};

/// Resolves the repository, builds the gateway and channels, and runs once.
///
/// # Errors
///
/// Returns setup failures (repository detection, PR number validation, rule
/// file loading, client construction) and review-host failures other than a
/// missing pull request.
pub async fn run(config: &GongConfig) -> Result<PingOutcome, PingError> {
    let repository = resolve_repository(config)?;
    let number = config.require_pr_number()?;
    let locator = PullRequestLocator::new(config.api_url(), &repository, number)?;

    let rule_set = config.load_rule_set()?;
    debug!(
        rules = rule_set.rules.len(),
        integrations = rule_set.integrations.len(),
        "loaded rule set"
    );
    let defaults = config.defaults(rule_set.global_integrations());

    let token = config.resolve_token();
    if token.is_none() {
        debug!("no token configured; sending anonymous requests");
    }
    let gateway: Arc<dyn PullRequestGateway> =
        Arc::new(OctocrabGateway::connect(token.as_ref(), &locator)?);

    let registry = default_registry(ChannelSettings {
        gateway: Arc::clone(&gateway),
        locator: locator.clone(),
        slack_webhook: config.slack_webhook.clone(),
        output: ConsoleOutput::stdout(),
    });
    let job = PingJob {
        locator,
        defaults,
        rules: rule_set.rules,
        dry_run: config.dry_run,
        verbose: config.verbose,
    };

    PingPipeline::new(gateway.as_ref(), &registry, &SystemClock)
        .run(&job)
        .await
}

fn resolve_repository(config: &GongConfig) -> Result<String, PingError> {
    if let Some(repository) = config
        .repository
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return Ok(repository.to_owned());
    }

    let detected = current_repository()?;
    debug!(repository = %detected, "using detected repository");
    Ok(detected)
}
