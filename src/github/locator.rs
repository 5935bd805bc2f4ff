//! Repository coordinates and identity wrappers for pull request lookups.

use url::Url;

use crate::error::PingError;

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Option<Self> {
        (!value.is_empty()).then(|| Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Option<Self> {
        (!value.is_empty()).then(|| Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Parses a positive decimal pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::InvalidPullRequestNumber`] for non-numeric input
    /// or zero.
    pub fn parse(value: &str) -> Result<Self, PingError> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|number| *number > 0)
            .map(Self)
            .ok_or_else(|| PingError::InvalidPullRequestNumber {
                value: value.to_owned(),
            })
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, PingError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PingError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(****)")
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Splits `owner/repo` into validated parts.
///
/// # Errors
///
/// Returns [`PingError::InvalidRepository`] unless the input has exactly two
/// non-empty slash-separated parts.
pub fn parse_repository(value: &str) -> Result<(RepositoryOwner, RepositoryName), PingError> {
    let invalid = || PingError::InvalidRepository {
        value: value.to_owned(),
    };
    let mut parts = value.split('/');
    let owner = parts.next().and_then(RepositoryOwner::new).ok_or_else(invalid)?;
    let name = parts.next().and_then(RepositoryName::new).ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((owner, name))
}

/// Derives the web host serving pull request pages from an API base.
fn derive_web_base(api_base: &Url) -> String {
    let host = api_base.host_str().unwrap_or("github.com");
    if host.eq_ignore_ascii_case("api.github.com") {
        return "https://github.com".to_owned();
    }
    match api_base.port() {
        Some(port) => format!("{}://{host}:{port}", api_base.scheme()),
        None => format!("{}://{host}", api_base.scheme()),
    }
}

/// Identifies one pull request on one API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Builds a locator from an API base, an `owner/repo` slug, and a number.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Configuration`] when the API base is not a URL and
    /// [`PingError::InvalidRepository`] when the slug is malformed.
    pub fn new(
        api_base: &str,
        repository: &str,
        number: PullRequestNumber,
    ) -> Result<Self, PingError> {
        let base = Url::parse(api_base).map_err(|error| PingError::Configuration {
            message: format!("invalid API URL '{api_base}': {error}"),
        })?;
        let (owner, name) = parse_repository(repository)?;
        Ok(Self {
            api_base: base,
            owner,
            repository: name,
            number,
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// Web URL of the pull request, derived from the API host.
    #[must_use]
    pub fn web_url(&self) -> String {
        format!(
            "{}/{}/{}/pull/{}",
            derive_web_base(&self.api_base),
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn requested_reviewers_path(&self) -> String {
        format!("{}/requested_reviewers", self.pull_request_path())
    }

    pub(crate) fn timeline_path(&self) -> String {
        format!("{}/timeline", self.issue_path())
    }

    pub(crate) fn comments_path(&self) -> String {
        format!("{}/comments", self.issue_path())
    }

    fn issue_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}
