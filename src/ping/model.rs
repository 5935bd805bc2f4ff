//! Domain types flowing through rule matching, resolution, and dispatch.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use glob::Pattern;

/// Integration type used when nothing else is configured.
pub const DEFAULT_INTEGRATION: &str = "stdout";

/// Parameter key carrying a per-integration template override.
pub const TEMPLATE_PARAMETER: &str = "template";

/// One outstanding review request on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Reviewer login, or team name when `is_team` is set.
    pub from: String,
    /// Whether the request targets a team rather than a user.
    pub is_team: bool,
    /// When the review was requested.
    pub requested_at: DateTime<Utc>,
    /// Pull request title, if known.
    pub pr_title: Option<String>,
    /// Pull request author login, if known.
    pub pr_author: Option<String>,
}

impl ReviewRequest {
    /// Creates a request for an individual reviewer.
    #[must_use]
    pub fn user(login: impl Into<String>, requested_at: DateTime<Utc>) -> Self {
        Self {
            from: login.into(),
            is_team: false,
            requested_at,
            pr_title: None,
            pr_author: None,
        }
    }

    /// Creates a request for a team.
    #[must_use]
    pub fn team(name: impl Into<String>, requested_at: DateTime<Utc>) -> Self {
        Self {
            is_team: true,
            ..Self::user(name, requested_at)
        }
    }

    /// Attaches the pull request title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.pr_title = Some(title.into());
        self
    }

    /// Attaches the pull request author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.pr_author = Some(author.into());
        self
    }

    /// Reviewer label as shown to humans: `name` or `name (team)`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_team {
            format!("{} (team)", self.from)
        } else {
            self.from.clone()
        }
    }
}

/// A notification destination and its parameters.
///
/// `kind` selects the registered channel; parameters are opaque strings
/// interpreted by that channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Integration {
    /// Channel type, e.g. `stdout`, `comment`, `slack`, `actions`.
    pub kind: String,
    /// Channel-specific settings.
    pub parameters: BTreeMap<String, String>,
}

impl Integration {
    /// Creates an integration of the given type with no parameters.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Returns a non-empty parameter value.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the template override, if one is configured.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.parameter(TEMPLATE_PARAMETER)
    }
}

/// A shell-style glob compiled once at load time.
///
/// An empty source means "no constraint". A source that fails to compile
/// never matches anything.
#[derive(Clone, Default)]
pub struct GlobPattern {
    source: String,
    compiled: Option<Pattern>,
}

impl GlobPattern {
    /// Compiles `source`; compilation failures are retained as a never-match.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let text = source.into();
        let compiled = Pattern::new(&collapse_stars(&text)).ok();
        Self {
            source: text,
            compiled,
        }
    }

    /// Whether the pattern text is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Whether the pattern failed to compile.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        !self.source.is_empty() && self.compiled.is_none()
    }

    /// The pattern text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.source.as_str()
    }

    /// Matches the whole candidate against the pattern.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|pattern| pattern.matches(candidate))
    }
}

/// Folds `**` runs into a single `*` outside `[...]` classes.
///
/// Reviewer names and titles have no path structure, so a doubled star is
/// an ordinary wildcard rather than a recursive one.
fn collapse_stars(source: &str) -> String {
    let mut folded = String::with_capacity(source.len());
    let mut in_class = false;
    let mut previous_star = false;
    for character in source.chars() {
        let star = character == '*' && !in_class;
        if star && previous_star {
            continue;
        }
        match character {
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            _ => {}
        }
        previous_star = star;
        folded.push(character);
    }
    folded
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("GlobPattern")
            .field(&self.source)
            .finish()
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for GlobPattern {}

impl From<&str> for GlobPattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

/// A conditional override of ping behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    /// Pattern applied to the reviewer name.
    pub match_name: GlobPattern,
    /// Pattern applied to the pull request title.
    pub match_title: GlobPattern,
    /// Pattern applied to the pull request author.
    pub match_author: GlobPattern,
    /// Delay in seconds before pinging; zero or negative pings at once.
    pub delay: i64,
    /// Whether matching requests are pinged at all.
    pub enabled: bool,
    /// Replacement integrations; empty means inherit the global list.
    pub integrations: Vec<Integration>,
}

impl Rule {
    /// Sets the reviewer-name pattern.
    #[must_use]
    pub fn with_name(mut self, pattern: &str) -> Self {
        self.match_name = GlobPattern::new(pattern);
        self
    }

    /// Sets the title pattern.
    #[must_use]
    pub fn with_title(mut self, pattern: &str) -> Self {
        self.match_title = GlobPattern::new(pattern);
        self
    }

    /// Sets the author pattern.
    #[must_use]
    pub fn with_author(mut self, pattern: &str) -> Self {
        self.match_author = GlobPattern::new(pattern);
        self
    }

    /// Sets the delay in seconds.
    #[must_use]
    pub const fn with_delay(mut self, seconds: i64) -> Self {
        self.delay = seconds;
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Appends an integration override.
    #[must_use]
    pub fn with_integration(mut self, integration: Integration) -> Self {
        self.integrations.push(integration);
        self
    }

    /// A rule must constrain at least one field to take part in matching.
    #[must_use]
    pub const fn has_matcher(&self) -> bool {
        !self.match_name.is_empty() || !self.match_title.is_empty() || !self.match_author.is_empty()
    }
}

/// Global ping settings applied when no rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingDefaults {
    /// Delay in seconds.
    pub delay: i64,
    /// Whether pinging is on.
    pub enabled: bool,
    /// Integrations every decision starts from.
    pub integrations: Vec<Integration>,
}

impl Default for PingDefaults {
    fn default() -> Self {
        Self {
            delay: 0,
            enabled: true,
            integrations: vec![Integration::new(DEFAULT_INTEGRATION)],
        }
    }
}

/// Why a reviewer is or is not pinged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewerStatus {
    /// The reviewer is pinged now.
    Due,
    /// Pinging is on but the delay has not elapsed.
    Waiting,
    /// Pinging is switched off for this reviewer.
    Disabled,
}

impl ReviewerStatus {
    /// Lower-case label used in rendered output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Due => "enabled",
            Self::Waiting => "waiting",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ReviewerStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Effective ping settings for one review request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingDecision {
    /// The request this decision was made for.
    pub request: ReviewRequest,
    /// Effective delay in seconds.
    pub delay: i64,
    /// Effective enabled flag.
    pub enabled: bool,
    /// Effective integrations.
    pub integrations: Vec<Integration>,
    /// Whether the reviewer should be pinged now.
    pub should_ping: bool,
}

impl PingDecision {
    /// Classifies the decision for display.
    #[must_use]
    pub const fn status(&self) -> ReviewerStatus {
        if self.should_ping {
            ReviewerStatus::Due
        } else if self.enabled {
            ReviewerStatus::Waiting
        } else {
            ReviewerStatus::Disabled
        }
    }

    /// Returns the first integration of the given type.
    #[must_use]
    pub fn integration(&self, kind: &str) -> Option<&Integration> {
        self.integrations
            .iter()
            .find(|integration| integration.kind == kind)
    }

    /// Whether any integration of the given type is attached.
    #[must_use]
    pub fn routes_to(&self, kind: &str) -> bool {
        self.integration(kind).is_some()
    }
}
