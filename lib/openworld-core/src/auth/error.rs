use std::time::Duration;

use http::StatusCode;

/// Errors raised while obtaining or presenting a token.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum AuthError {
    /// No successful refresh has happened yet.
    #[display("Token has not been acquired yet")]
    #[from(skip)]
    UninitializedToken,

    /// The authorization endpoint answered with a non-2xx status.
    #[display("Authentication rejected with status {status}")]
    #[from(skip)]
    Rejected {
        /// HTTP status returned by the authorization endpoint.
        status: StatusCode,
    },

    /// The authorization endpoint answered 2xx with a body that is not a token.
    #[display("Authentication response with status {status} could not be parsed: {source}")]
    #[from(skip)]
    InvalidResponse {
        /// HTTP status returned by the authorization endpoint.
        status: StatusCode,
        /// Decoding failure.
        source: serde_json::Error,
    },

    /// The authorization endpoint issued a token that expires within the
    /// safety margin, so it would be stale as soon as stored.
    #[display("Token lifetime of {}s is within the safety margin", lifetime.as_secs())]
    #[from(skip)]
    ShortLivedToken {
        /// Lifetime announced by the authorization endpoint.
        lifetime: Duration,
    },

    /// The token request could not be sent or its response not read.
    #[display("Authentication request failed: {_0}")]
    Transport(reqwest::Error),

    /// The credentials cannot be carried in an HTTP header.
    #[display("Invalid authorization header: {_0}")]
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// The grant form could not be encoded.
    #[display("Failed to encode token request: {_0}")]
    FormEncoding(serde_urlencoded::ser::Error),
}

impl AuthError {
    /// HTTP status reported by the authorization endpoint, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status } | Self::InvalidResponse { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::UninitializedToken
            | Self::ShortLivedToken { .. }
            | Self::InvalidHeaderValue(_)
            | Self::FormEncoding(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status() {
        let error = AuthError::Rejected {
            status: StatusCode::UNAUTHORIZED,
        };

        assert_eq!(
            error.to_string(),
            "Authentication rejected with status 401 Unauthorized"
        );
        assert_eq!(error.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn should_have_no_status_before_first_refresh() {
        assert_eq!(AuthError::UninitializedToken.status(), None);
    }

    #[test]
    fn should_display_short_lifetime() {
        let error = AuthError::ShortLivedToken {
            lifetime: Duration::from_secs(5),
        };

        assert_eq!(
            error.to_string(),
            "Token lifetime of 5s is within the safety margin"
        );
        assert_eq!(error.status(), None);
    }

    #[test]
    fn should_be_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthError>();
    }
}
