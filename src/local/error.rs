//! Errors raised while detecting the repository from a local checkout.

use thiserror::Error;

use crate::error::PingError;

/// Reasons the current directory could not be mapped to an `owner/repo` slug.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalDiscoveryError {
    /// The directory is not inside a Git working tree.
    #[error("not inside a Git repository")]
    NotARepository,

    /// The repository has no remotes at all.
    #[error("repository has no remotes configured")]
    NoRemotes,

    /// None of the remotes points at an `owner/repo` path.
    #[error("no remote points at an owner/repo path (checked: {checked})")]
    NoUsableRemote {
        /// Comma-separated remote names that were inspected.
        checked: String,
    },

    /// A remote URL could not be parsed.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The rejected URL.
        url: String,
    },

    /// libgit2 reported a failure.
    #[error("git error: {message}")]
    Git {
        /// Error detail from `git2`.
        message: String,
    },
}

impl From<git2::Error> for LocalDiscoveryError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}

impl From<LocalDiscoveryError> for PingError {
    fn from(error: LocalDiscoveryError) -> Self {
        Self::LocalDiscovery {
            message: format!("{error}. Please specify a repository using the --repository flag"),
        }
    }
}
