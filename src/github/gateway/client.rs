//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;

use crate::error::PingError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the API base, authenticated when a token is
/// supplied.
///
/// # Errors
///
/// Returns [`PingError::Configuration`] when the base URI cannot be parsed
/// or [`PingError::Api`] when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: Option<&PersonalAccessToken>,
    api_base: &str,
) -> Result<Octocrab, PingError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| PingError::Configuration {
            message: format!("invalid API URL '{api_base}': {error}"),
        })?;

    let builder = Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| PingError::Api {
            message: format!("build client failed: {error}"),
        })?;

    let client = match token {
        Some(secret) => builder.personal_token(secret.value().to_owned()).build(),
        None => builder.build(),
    };
    client.map_err(|error| map_octocrab_error("build client", &error))
}
