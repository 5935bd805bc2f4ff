//! Prints reminder summaries to the terminal.

use async_trait::async_trait;

use super::output::ConsoleOutput;
use super::template::{CONSOLE_TEMPLATE, render};
use crate::error::PingError;
use crate::ping::{Channel, DispatchContext, DispatchGroup, TemplateData};

/// Registry name of the console channel.
pub const CONSOLE_CHANNEL: &str = "stdout";

/// Writes `Pinging: ...` and `Not pinging: ...` lines.
///
/// Reviewers routed here but not yet due are listed as not pinged, so the
/// output shows who is still waiting.
#[derive(Debug, Clone)]
pub struct ConsoleChannel {
    output: ConsoleOutput,
}

impl ConsoleChannel {
    /// Creates a channel writing to `output`.
    #[must_use]
    pub const fn new(output: ConsoleOutput) -> Self {
        Self { output }
    }

    /// Renders the message without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Template`] when a custom template is invalid.
    pub fn render(
        &self,
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<String, PingError> {
        let data = TemplateData::prepare(group.routed(), &context.pull_request, context.now, true);
        render(
            CONSOLE_CHANNEL,
            group.template().unwrap_or(CONSOLE_TEMPLATE),
            &data,
        )
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new(ConsoleOutput::stdout())
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        CONSOLE_CHANNEL
    }

    async fn deliver(
        &self,
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<(), PingError> {
        if context.dry_run {
            return self
                .output
                .write_line("[DRY RUN] Would output reviewer information to stdout");
        }

        let message = self.render(group, context)?;
        self.output.write_line(&message)
    }
}
