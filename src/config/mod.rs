//! Run configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – no delay, reminders enabled, `stdout` output
//! 2. **Configuration file** – the first of `GONG_CONFIG_PATH`,
//!    `$XDG_CONFIG_HOME/gong/gong.toml`, `~/.gong.toml`, or `./.gong.toml`
//! 3. **Environment variables** – `GONG_*`, plus the legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--pr`/`-p`, `--repository`/`-r`, ...
//!
//! # Configuration File
//!
//! The same file carries the rule set read by [`RuleSet`]:
//!
//! ```toml
//! repository = "octo/repo"
//! delay = 3600
//! slack_webhook = "https://hooks.slack.com/services/T000/B000/XXXX"
//!
//! [[integrations]]
//! type = "comment"
//!
//! [[rules]]
//! match_name = "alice"
//! delay = 86400
//! enabled = true
//! ```

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ortho_config::{ConfigDiscovery, OrthoConfig};
use serde::{Deserialize, Serialize};

use crate::error::PingError;
use crate::github::{DEFAULT_API_URL, PersonalAccessToken, PullRequestNumber};
use crate::ping::{Integration, PingDefaults, RuleSet};

/// Application name used for platform configuration directories.
pub const APP_NAME: &str = "gong";

/// Hidden settings file searched in the home and working directories.
pub const DOTFILE_NAME: &str = ".gong.toml";

/// Settings file searched under `$XDG_CONFIG_HOME/gong/` and similar.
pub const CONFIG_FILE_NAME: &str = "gong.toml";

/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_VAR: &str = "GONG_CONFIG_PATH";

/// Environment variable consulted when no token is configured.
pub const LEGACY_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Settings for one reminder run.
///
/// # Example
///
/// ```no_run
/// use gong::GongConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GongConfig::load().expect("failed to load configuration");
/// let number = config.require_pr_number().expect("PR number required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GONG",
    discovery(
        dotfile_name = ".gong.toml",
        config_file_name = "gong.toml",
        app_name = "gong",
        env_var = "GONG_CONFIG_PATH"
    )
)]
pub struct GongConfig {
    /// Repository in `owner/repo` form.
    ///
    /// Detected from the local checkout when unset.
    ///
    /// Can be provided via:
    /// - CLI: `--repository <OWNER/REPO>` or `-r <OWNER/REPO>`
    /// - Environment: `GONG_REPOSITORY`
    /// - Config file: `repository = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Pull request number.
    ///
    /// Can be provided via:
    /// - CLI: `--pr <NUMBER>` or `-p <NUMBER>`
    /// - Environment: `GONG_PR`
    /// - Config file: `pr = "..."`
    #[ortho_config(cli_short = 'p')]
    pub pr: Option<String>,

    /// Seconds a reviewer may wait before being reminded.
    ///
    /// Zero or negative reminds immediately. Rules override it per reviewer.
    ///
    /// Can be provided via:
    /// - CLI: `--delay <SECONDS>` or `-d <SECONDS>`
    /// - Environment: `GONG_DELAY`
    /// - Config file: `delay = 3600`
    #[ortho_config(cli_short = 'd')]
    pub delay: i64,

    /// Suppresses reminders for reviewers no rule enables.
    ///
    /// Can be provided via:
    /// - CLI: `--disabled`
    /// - Environment: `GONG_DISABLED=true`
    /// - Config file: `disabled = true`
    #[ortho_config()]
    pub disabled: bool,

    /// Describes side effects without performing them.
    ///
    /// Can be provided via:
    /// - CLI: `--dry-run`
    /// - Environment: `GONG_DRY_RUN=true`
    /// - Config file: `dry_run = true`
    #[ortho_config()]
    pub dry_run: bool,

    /// Enables debug logging and elapsed-time details in chat messages.
    ///
    /// Can be provided via:
    /// - CLI: `--verbose` or `-v`
    /// - Environment: `GONG_VERBOSE=true`
    /// - Config file: `verbose = true`
    #[ortho_config(cli_short = 'v')]
    pub verbose: bool,

    /// Personal access token for the GitHub API.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `GONG_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API, for GitHub Enterprise installs.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>`
    /// - Environment: `GONG_API_URL`
    /// - Config file: `api_url = "..."`
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Slack incoming-webhook URL used by the `slack` integration.
    ///
    /// Can be provided via:
    /// - CLI: `--slack-webhook <URL>`
    /// - Environment: `GONG_SLACK_WEBHOOK`
    /// - Config file: `slack_webhook = "..."`
    #[ortho_config()]
    pub slack_webhook: Option<String>,

    /// TOML file holding `[[integrations]]` and `[[rules]]`.
    ///
    /// Defaults to the settings file found by [`discover_settings_file`].
    ///
    /// Can be provided via:
    /// - CLI: `--rules-file <PATH>`
    /// - Environment: `GONG_RULES_FILE`
    /// - Config file: `rules_file = "..."`
    #[ortho_config()]
    pub rules_file: Option<String>,
}

impl GongConfig {
    /// Returns the validated pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::MissingPullRequestNumber`] when unset and
    /// [`PingError::InvalidPullRequestNumber`] when not a positive integer.
    pub fn require_pr_number(&self) -> Result<PullRequestNumber, PingError> {
        let raw = self
            .pr
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(PingError::MissingPullRequestNumber)?;
        PullRequestNumber::parse(raw)
    }

    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// Returns `None` when neither provides a non-blank value; requests are
    /// then sent anonymously.
    #[must_use]
    pub fn resolve_token(&self) -> Option<PersonalAccessToken> {
        self.token
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| env::var(LEGACY_TOKEN_VAR).ok())
            .and_then(|value| PersonalAccessToken::new(value).ok())
    }

    /// Returns the API base URL, defaulting to public GitHub.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    /// Builds the settings applied when no rule matches a reviewer.
    #[must_use]
    pub const fn defaults(&self, integrations: Vec<Integration>) -> PingDefaults {
        PingDefaults {
            delay: self.delay,
            enabled: !self.disabled,
            integrations,
        }
    }

    /// Loads the rule set named by `rules_file`, or else the rules carried by
    /// the discovered settings file.
    ///
    /// Without either, the rule set is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Configuration`] when an explicit file is missing
    /// or any file is malformed.
    pub fn load_rule_set(&self) -> Result<RuleSet, PingError> {
        if let Some(path) = self.rules_file.as_deref().filter(|path| !path.is_empty()) {
            return RuleSet::load(Path::new(path));
        }
        discover_settings_file()
            .map_or_else(|| Ok(RuleSet::default()), |path| RuleSet::load(&path))
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Configuration`] when ortho-config fails to parse
    /// arguments or load configuration files.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, PingError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|error| PingError::Configuration {
            message: error.to_string(),
        })
    }
}

/// Discovery matching the one `GongConfig::load` performs.
fn settings_discovery() -> ConfigDiscovery {
    ConfigDiscovery::builder(APP_NAME)
        .env_var(CONFIG_PATH_VAR)
        .config_file_name(CONFIG_FILE_NAME)
        .dotfile_name(DOTFILE_NAME)
        .build()
}

/// Returns the settings file the scalar settings are read from, if any.
///
/// Candidates are checked in the same order as configuration loading:
/// `GONG_CONFIG_PATH`, the XDG directories, the home directory, then the
/// working directory.
#[must_use]
pub fn discover_settings_file() -> Option<PathBuf> {
    settings_discovery()
        .candidates()
        .into_iter()
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests;
