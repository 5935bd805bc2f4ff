//! Exposes reviewer lists to later GitHub Actions workflow steps.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::output::{ConsoleOutput, io_error};
use crate::error::PingError;
use crate::ping::format::describe_elapsed;
use crate::ping::{Channel, DispatchContext, DispatchGroup, PingDecision};

/// Registry name of the GitHub Actions channel.
pub const ACTIONS_CHANNEL: &str = "actions";

/// Appends step outputs to `$GITHUB_OUTPUT` and variables to `$GITHUB_ENV`.
#[derive(Debug, Clone)]
pub struct ActionsChannel {
    output_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
    output: ConsoleOutput,
}

impl ActionsChannel {
    /// Creates a channel writing to explicit file paths.
    #[must_use]
    pub const fn new(
        output_file: Option<PathBuf>,
        env_file: Option<PathBuf>,
        output: ConsoleOutput,
    ) -> Self {
        Self {
            output_file,
            env_file,
            output,
        }
    }

    /// Reads the file paths from `GITHUB_OUTPUT` and `GITHUB_ENV`.
    #[must_use]
    pub fn from_env(output: ConsoleOutput) -> Self {
        let path_from = |name: &str| {
            env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self::new(path_from("GITHUB_OUTPUT"), path_from("GITHUB_ENV"), output)
    }
}

/// Reviewer labels split by whether they are pinged now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ReviewerLists {
    enabled: Vec<String>,
    disabled: Vec<String>,
}

impl ReviewerLists {
    fn collect(decisions: &[&PingDecision], context: &DispatchContext) -> Self {
        let mut lists = Self::default();
        for decision in decisions {
            let reviewer = decision.request.display_name();
            if decision.should_ping {
                lists.enabled.push(reviewer);
            } else {
                lists.disabled.push(format!(
                    "{reviewer} ({} ago, status: {})",
                    describe_elapsed(decision, context.now),
                    decision.status()
                ));
            }
        }
        lists
    }

    fn details(&self) -> Vec<String> {
        self.enabled
            .iter()
            .map(|reviewer| format!("{reviewer} (status: enabled)"))
            .chain(self.disabled.iter().cloned())
            .collect()
    }

    fn file_block(&self, reviewers_key: &str, count_key: &str, details_key: &str) -> String {
        format!(
            "{reviewers_key}={}\n{count_key}={}\n{details_key}<<EOF\n{}\nEOF\n",
            self.enabled.join(","),
            self.enabled.len(),
            self.details().join("\n")
        )
    }

    fn summary(&self) -> String {
        if self.enabled.is_empty() && self.disabled.is_empty() {
            return "No pending review requests.".to_owned();
        }
        let mut lines = Vec::new();
        if !self.enabled.is_empty() {
            lines.push(format!(
                "Enabled reviewers ({}): {}",
                self.enabled.len(),
                self.enabled.join(", ")
            ));
        }
        if !self.disabled.is_empty() {
            lines.push(format!(
                "Disabled/waiting reviewers ({}): {}",
                self.disabled.len(),
                self.disabled.join(", ")
            ));
        }
        lines.join("\n")
    }
}

fn append(path: &Path, block: &str) -> Result<(), PingError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| PingError::Io {
            message: format!("failed to open {}: {error}", path.display()),
        })?;
    file.write_all(block.as_bytes())
        .map_err(|error| io_error(&error))
}

#[async_trait]
impl Channel for ActionsChannel {
    fn name(&self) -> &str {
        ACTIONS_CHANNEL
    }

    async fn deliver(
        &self,
        group: &DispatchGroup<'_>,
        context: &DispatchContext,
    ) -> Result<(), PingError> {
        if context.dry_run {
            return self.output.write_line(
                "[DRY RUN] Would write reviewer information to GitHub Actions environment variables",
            );
        }

        if self.output_file.is_none() && self.env_file.is_none() {
            return self.output.write_line(
                "GitHub Actions environment variables not detected. This integration is meant to be used in GitHub Actions.",
            );
        }

        let lists = ReviewerLists::collect(group.routed(), context);

        if let Some(path) = &self.output_file {
            append(
                path,
                &lists.file_block("reviewers", "reviewersCount", "reviewersDetails"),
            )?;
            debug!(path = %path.display(), "wrote step outputs");
        }
        if let Some(path) = &self.env_file {
            append(
                path,
                &lists.file_block(
                    "GONG_REVIEWERS",
                    "GONG_REVIEWERS_COUNT",
                    "GONG_REVIEWERS_DETAILS",
                ),
            )?;
            debug!(path = %path.display(), "wrote environment variables");
        }

        self.output.write_line(&format!(
            "GitHub Actions Integration results:\n{}",
            lists.summary()
        ))
    }
}
