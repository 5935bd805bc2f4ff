//! Notification channels and the default registry.

pub mod actions;
pub mod comment;
pub mod console;
pub mod output;
pub mod slack;
pub mod template;

use std::sync::Arc;

pub use actions::{ACTIONS_CHANNEL, ActionsChannel};
pub use comment::{COMMENT_CHANNEL, CommentChannel};
pub use console::{CONSOLE_CHANNEL, ConsoleChannel};
pub use output::ConsoleOutput;
pub use slack::{SLACK_CHANNEL, SlackChannel};

use crate::github::{PullRequestGateway, PullRequestLocator};
use crate::ping::ChannelRegistry;

/// Everything the built-in channels need to be constructed.
pub struct ChannelSettings {
    /// Gateway used to read and post comments.
    pub gateway: Arc<dyn PullRequestGateway>,
    /// Pull request the comment channel posts to.
    pub locator: PullRequestLocator,
    /// Slack incoming-webhook URL.
    pub slack_webhook: Option<String>,
    /// Terminal sink shared by the printing channels.
    pub output: ConsoleOutput,
}

/// Registers `stdout`, `comment`, `slack`, and `actions`.
#[must_use]
pub fn default_registry(settings: ChannelSettings) -> ChannelRegistry {
    let ChannelSettings {
        gateway,
        locator,
        slack_webhook,
        output,
    } = settings;

    ChannelRegistry::new()
        .with(ConsoleChannel::new(output.clone()))
        .with(CommentChannel::new(gateway, locator, output.clone()))
        .with(SlackChannel::new(slack_webhook))
        .with(ActionsChannel::from_env(output))
}
