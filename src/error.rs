//! Error types shared by the review-host client, the channels, and the CLI.

use thiserror::Error;

/// Errors surfaced while configuring, fetching, or notifying reviewers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PingError {
    /// No pull request number was configured.
    #[error("pull request number is required (use --pr or GONG_PR)")]
    MissingPullRequestNumber,

    /// The pull request number is not a positive integer.
    #[error("pull request number must be a positive integer, got '{value}'")]
    InvalidPullRequestNumber {
        /// The rejected input.
        value: String,
    },

    /// The repository is not in `owner/repo` form.
    #[error("invalid repository format, expected owner/repo, got '{value}'")]
    InvalidRepository {
        /// The rejected input.
        value: String,
    },

    /// The authentication token was blank.
    #[error("personal access token is required")]
    MissingToken,

    /// The review host rejected the credentials.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// Error message returned with the 401/403 response.
        message: String,
    },

    /// The requested resource does not exist on the review host.
    #[error("not found: {message}")]
    NotFound {
        /// Which lookup failed.
        message: String,
    },

    /// The review host returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while talking to a remote service.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A notification template failed to parse or render.
    #[error("template error: {message}")]
    Template {
        /// Details reported by the template engine.
        message: String,
    },

    /// A notification channel failed to deliver.
    #[error("{channel} channel failed: {message}")]
    Channel {
        /// Registry name of the failing channel.
        channel: String,
        /// Failure detail.
        message: String,
    },

    /// Repository auto-detection from the local checkout failed.
    #[error("could not detect repository: {message}")]
    LocalDiscovery {
        /// Details about the discovery failure.
        message: String,
    },
}

impl PingError {
    /// Returns true when the error means the pull request does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for PingError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
