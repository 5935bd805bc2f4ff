//! Rule matching and rule-file loading.
//!
//! Rules live in the same TOML file as the scalar settings, under
//! `[[integrations]]` and `[[rules]]` tables. The first rule whose patterns
//! all match a review request wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::model::{DEFAULT_INTEGRATION, GlobPattern, Integration, ReviewRequest, Rule};
use crate::error::PingError;

/// Returns the first rule that applies to `request`.
///
/// A rule applies when every non-empty pattern matches its field. Title and
/// author patterns never match a request that lacks that field.
#[must_use]
pub fn find_matching_rule<'rules>(
    request: &ReviewRequest,
    rules: &'rules [Rule],
) -> Option<&'rules Rule> {
    rules.iter().find(|rule| rule_applies(rule, request))
}

fn rule_applies(rule: &Rule, request: &ReviewRequest) -> bool {
    let checks = [
        check_field(&rule.match_name, Some(request.from.as_str())),
        check_field(&rule.match_title, non_empty(request.pr_title.as_deref())),
        check_field(&rule.match_author, non_empty(request.pr_author.as_deref())),
    ];

    let mut constrained = false;
    for outcome in checks.into_iter().flatten() {
        if !outcome {
            return false;
        }
        constrained = true;
    }
    constrained
}

/// `None` when the pattern imposes no constraint.
fn check_field(pattern: &GlobPattern, value: Option<&str>) -> Option<bool> {
    if pattern.is_empty() {
        return None;
    }
    Some(value.is_some_and(|candidate| pattern.matches(candidate)))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Global integrations and rules read from a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Integrations applied when no rule overrides them.
    pub integrations: Vec<Integration>,
    /// Rules in file order.
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Parses a rule set from TOML text.
    ///
    /// Integrations without a type and rules without any pattern are
    /// dropped. Non-string parameter values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Configuration`] when the text is not valid TOML
    /// or a known key has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, PingError> {
        let raw: RawRuleFile = toml::from_str(source).map_err(|error| PingError::Configuration {
            message: format!("invalid rules: {error}"),
        })?;
        Ok(raw.into())
    }

    /// Loads a rule set from an explicitly configured file.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Configuration`] when the file cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, PingError> {
        let text = fs::read_to_string(path).map_err(|error| PingError::Configuration {
            message: format!("failed to read rules file {}: {error}", path.display()),
        })?;
        let rule_set = Self::from_toml_str(&text).map_err(|error| PingError::Configuration {
            message: format!("{}: {error}", path.display()),
        })?;
        debug!(
            path = %path.display(),
            rules = rule_set.rules.len(),
            integrations = rule_set.integrations.len(),
            "loaded rules file"
        );
        Ok(rule_set)
    }

    /// Global integrations, falling back to a single `stdout` integration.
    #[must_use]
    pub fn global_integrations(&self) -> Vec<Integration> {
        if self.integrations.is_empty() {
            vec![Integration::new(DEFAULT_INTEGRATION)]
        } else {
            self.integrations.clone()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRuleFile {
    integrations: Vec<RawIntegration>,
    rules: Vec<RawRule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRule {
    #[serde(alias = "matchname")]
    match_name: String,
    #[serde(alias = "matchtitle")]
    match_title: String,
    #[serde(alias = "matchauthor")]
    match_author: String,
    delay: i64,
    enabled: bool,
    integrations: Vec<RawIntegration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIntegration {
    #[serde(rename = "type")]
    kind: String,
    #[serde(alias = "parameters")]
    params: BTreeMap<String, toml::Value>,
}

impl From<RawRuleFile> for RuleSet {
    fn from(raw: RawRuleFile) -> Self {
        let rules = raw
            .rules
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw_rule)| {
                let rule = Rule::from(raw_rule);
                if !rule.has_matcher() {
                    warn!(index, "ignoring rule without any match pattern");
                    return None;
                }
                for pattern in [&rule.match_name, &rule.match_title, &rule.match_author] {
                    if pattern.is_invalid() {
                        warn!(
                            index,
                            pattern = pattern.as_str(),
                            "invalid glob pattern; rule field will never match"
                        );
                    }
                }
                Some(rule)
            })
            .collect();

        Self {
            integrations: convert_integrations(raw.integrations),
            rules,
        }
    }
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        Self {
            match_name: GlobPattern::new(raw.match_name),
            match_title: GlobPattern::new(raw.match_title),
            match_author: GlobPattern::new(raw.match_author),
            delay: raw.delay,
            enabled: raw.enabled,
            integrations: convert_integrations(raw.integrations),
        }
    }
}

fn convert_integrations(raw: Vec<RawIntegration>) -> Vec<Integration> {
    raw.into_iter()
        .filter(|integration| !integration.kind.is_empty())
        .map(|integration| Integration {
            kind: integration.kind,
            parameters: integration
                .params
                .into_iter()
                .filter_map(|(key, value)| match value {
                    toml::Value::String(text) => Some((key, text)),
                    _ => None,
                })
                .collect(),
        })
        .collect()
}
