//! Remote URL parsing.
//!
//! Accepts the URL shapes Git itself accepts for a remote and reduces them to
//! the host plus the `owner/repo` pair the review host understands.

use super::error::LocalDiscoveryError;

/// Host and repository slug taken from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSlug {
    host: String,
    owner: String,
    repository: String,
}

impl RemoteSlug {
    /// Host name of the remote, lower-cased.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without any `.git` suffix.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns true for remotes on `github.com`.
    #[must_use]
    pub fn is_github_com(&self) -> bool {
        self.host == "github.com"
    }

    /// The `owner/repo` form accepted by `--repository`.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }
}

/// Parses a remote URL into a [`RemoteSlug`].
///
/// Handles `git@host:owner/repo.git`, `ssh://`, `git://`, `http://` and
/// `https://` forms. Trailing slashes and a `.git` suffix are ignored.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] when the URL has no host
/// or its path is not exactly `owner/repo`.
pub fn parse_remote_url(url: &str) -> Result<RemoteSlug, LocalDiscoveryError> {
    let trimmed = url.trim();
    let slug = if trimmed.contains("://") {
        url::Url::parse(trimmed)
            .ok()
            .and_then(|parsed| slug_from_path(parsed.host_str()?, parsed.path()))
    } else {
        split_scp(trimmed).and_then(|(host, path)| slug_from_path(host, path))
    };

    slug.ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
        url: url.to_owned(),
    })
}

/// `user@host:path`; a bare `host:path` is accepted too.
fn split_scp(url: &str) -> Option<(&str, &str)> {
    let (authority, path) = url.split_once(':')?;
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    Some((host, path))
}

fn slug_from_path(host: &str, path: &str) -> Option<RemoteSlug> {
    if host.is_empty() {
        return None;
    }
    let mut parts = path.trim_matches('/').split('/');
    let owner = parts.next().filter(|part| !part.is_empty())?;
    let raw_repository = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let repository = raw_repository
        .strip_suffix(".git")
        .unwrap_or(raw_repository);
    if repository.is_empty() {
        return None;
    }

    Some(RemoteSlug {
        host: host.to_ascii_lowercase(),
        owner: owner.to_owned(),
        repository: repository.to_owned(),
    })
}
