//! Detects the repository a run applies to from the local Git checkout.

use std::env;
use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use super::error::LocalDiscoveryError;
use super::remote::{RemoteSlug, parse_remote_url};

/// Environment variable that overrides remote inspection.
pub const REPOSITORY_OVERRIDE_VAR: &str = "GH_REPO";

/// Remote names tried first, in this order; forks point `upstream` at the
/// repository that owns the pull requests.
const PREFERRED_REMOTES: [&str; 3] = ["upstream", "github", "origin"];

/// A checkout together with the remote the slug was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    workdir: PathBuf,
    remote_name: String,
    remote: RemoteSlug,
}

impl LocalRepository {
    /// Working directory of the checkout.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Name of the remote that supplied the slug.
    #[must_use]
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// Parsed remote.
    #[must_use]
    pub const fn remote(&self) -> &RemoteSlug {
        &self.remote
    }

    /// The `owner/repo` slug.
    #[must_use]
    pub fn slug(&self) -> String {
        self.remote.slug()
    }
}

/// Finds the checkout containing `start_path` and picks its remote.
///
/// Remotes named `upstream`, `github`, then `origin` win; otherwise the
/// first remote, by name, whose URL parses is used.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError`] when `start_path` is outside a working tree,
/// the repository has no remotes, or none of them parses.
pub fn discover_repository(start_path: &Path) -> Result<LocalRepository, LocalDiscoveryError> {
    let repository = Repository::discover(start_path).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;
    let workdir = repository
        .workdir()
        .map(Path::to_path_buf)
        .ok_or(LocalDiscoveryError::NotARepository)?;

    let mut names: Vec<String> = repository
        .remotes()?
        .iter()
        .flatten()
        .map(str::to_owned)
        .collect();
    if names.is_empty() {
        return Err(LocalDiscoveryError::NoRemotes);
    }
    names.sort_by_key(|name| {
        let rank = PREFERRED_REMOTES
            .iter()
            .position(|preferred| *preferred == name.as_str())
            .unwrap_or(PREFERRED_REMOTES.len());
        (rank, name.clone())
    });

    for name in &names {
        let remote = repository.find_remote(name)?;
        let Some(url) = remote.url() else {
            continue;
        };
        match parse_remote_url(url) {
            Ok(slug) => {
                debug!(remote = %name, slug = %slug.slug(), "using local remote");
                return Ok(LocalRepository {
                    workdir,
                    remote_name: name.clone(),
                    remote: slug,
                });
            }
            Err(error) => debug!(remote = %name, %error, "skipping remote"),
        }
    }

    Err(LocalDiscoveryError::NoUsableRemote {
        checked: names.join(", "),
    })
}

/// Returns the `owner/repo` slug for the current directory.
///
/// `GH_REPO` takes precedence over the checkout when set and non-blank.
///
/// # Errors
///
/// Propagates [`discover_repository`] failures and reports an unreadable
/// current directory as [`LocalDiscoveryError::NotARepository`].
pub fn current_repository() -> Result<String, LocalDiscoveryError> {
    if let Some(slug) = env::var(REPOSITORY_OVERRIDE_VAR)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
    {
        debug!(slug = %slug, "using repository from {REPOSITORY_OVERRIDE_VAR}");
        return Ok(slug);
    }

    let cwd = env::current_dir().map_err(|_| LocalDiscoveryError::NotARepository)?;
    discover_repository(&cwd).map(|local| local.slug())
}
