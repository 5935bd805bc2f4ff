//! Error mapping helpers for the Octocrab gateway.

use http::StatusCode;

use crate::error::PingError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_status(operation: &str, status: StatusCode, message: &str) -> PingError {
    if is_auth_failure(status) {
        PingError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else if status == StatusCode::NOT_FOUND {
        PingError::NotFound {
            message: format!("{operation}: {message}"),
        }
    } else {
        PingError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> PingError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_status(operation, source.status_code, &source.message);
    }

    if is_network_error(error) {
        return PingError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    PingError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED, "Authentication")]
    #[case(StatusCode::FORBIDDEN, "Authentication")]
    #[case(StatusCode::NOT_FOUND, "NotFound")]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, "Api")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, "Api")]
    fn statuses_map_to_variants(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status("pull request", status, "boom");
        let variant = match &error {
            PingError::Authentication { .. } => "Authentication",
            PingError::NotFound { .. } => "NotFound",
            PingError::Api { .. } => "Api",
            _ => "other",
        };
        assert_eq!(variant, expected, "status {status} mapped to {error:?}");
    }
}
