use std::convert::Infallible;
use std::error::Error;
use std::fmt::{self, Debug, Display};

use http::StatusCode;

use super::HeaderError;
use crate::auth::AuthError;
use crate::config::ConfigurationError;
use crate::model::ApiError;

/// Errors that can occur when calling an API through [`ApiClient`](crate::ApiClient).
///
/// `E` is the typed error of the operation, produced from its
/// [`ErrorTable`](crate::ErrorTable). Operations without a table use
/// [`Infallible`].
#[derive(Debug)]
pub enum ApiClientError<E = Infallible> {
    /// The client configuration is invalid.
    Configuration(ConfigurationError),

    /// The token could not be obtained.
    Authentication(AuthError),

    /// Connect, TLS, read or timeout failure during the exchange.
    Transport(reqwest::Error),

    /// The request URL could not be built.
    Url(url::ParseError),

    /// A request header is not valid HTTP.
    Header(HeaderError),

    /// The request body could not be serialized.
    Serialization(serde_json::Error),

    /// Non-2xx status listed in the operation's error table.
    Service {
        /// HTTP status of the response.
        status: StatusCode,
        /// The validated typed error.
        error: E,
    },

    /// Non-2xx status absent from the operation's error table.
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// The validated generic error.
        error: ApiError,
    },

    /// The response body could not be decoded as expected.
    ///
    /// `error.code` is always [`ErrorCode::ProtocolError`](crate::ErrorCode::ProtocolError)
    /// and `error.message` holds the truncated raw body.
    Protocol {
        /// HTTP status of the response.
        status: StatusCode,
        /// The synthetic protocol error.
        error: ApiError,
    },
}

impl<E> ApiClientError<E> {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } | Self::Api { status, .. } | Self::Protocol { status, .. } => {
                Some(*status)
            }
            Self::Authentication(err) => err.status(),
            Self::Transport(err) => err.status(),
            Self::Configuration(_) | Self::Url(_) | Self::Header(_) | Self::Serialization(_) => None,
        }
    }

    /// The typed error, for statuses listed in the error table.
    pub fn service_error(&self) -> Option<&E> {
        match self {
            Self::Service { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The generic or synthetic protocol error body, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } | Self::Protocol { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Converts the typed error, keeping every other variant.
    pub fn map_service<F>(self, convert: impl FnOnce(E) -> F) -> ApiClientError<F> {
        match self {
            Self::Configuration(err) => ApiClientError::Configuration(err),
            Self::Authentication(err) => ApiClientError::Authentication(err),
            Self::Transport(err) => ApiClientError::Transport(err),
            Self::Url(err) => ApiClientError::Url(err),
            Self::Header(err) => ApiClientError::Header(err),
            Self::Serialization(err) => ApiClientError::Serialization(err),
            Self::Service { status, error } => ApiClientError::Service {
                status,
                error: convert(error),
            },
            Self::Api { status, error } => ApiClientError::Api { status, error },
            Self::Protocol { status, error } => ApiClientError::Protocol { status, error },
        }
    }

    pub(crate) fn protocol(status: StatusCode, raw_body: &[u8]) -> Self {
        Self::Protocol {
            status,
            error: ApiError::protocol(raw_body),
        }
    }
}

impl<E: Display> Display for ApiClientError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "Invalid configuration: {err}"),
            Self::Authentication(err) => write!(f, "Authentication failed: {err}"),
            Self::Transport(err) => write!(f, "Transport failure: {err}"),
            Self::Url(err) => write!(f, "Invalid URL: {err}"),
            Self::Header(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "Failed to serialize request body: {err}"),
            Self::Service { status, error } => write!(f, "Request failed with status {status}: {error}"),
            Self::Api { status, error } => write!(f, "Request failed with status {status}: {error}"),
            Self::Protocol { status, error } => {
                write!(f, "Unexpected response with status {status}: {}", error.message)
            }
        }
    }
}

impl<E: Debug + Display> Error for ApiClientError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Authentication(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Url(err) => Some(err),
            Self::Header(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Service { .. } | Self::Api { .. } | Self::Protocol { .. } => None,
        }
    }
}

impl<E> From<ConfigurationError> for ApiClientError<E> {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

impl<E> From<AuthError> for ApiClientError<E> {
    fn from(value: AuthError) -> Self {
        Self::Authentication(value)
    }
}

impl<E> From<reqwest::Error> for ApiClientError<E> {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl<E> From<url::ParseError> for ApiClientError<E> {
    fn from(value: url::ParseError) -> Self {
        Self::Url(value)
    }
}

impl<E> From<HeaderError> for ApiClientError<E> {
    fn from(value: HeaderError) -> Self {
        Self::Header(value)
    }
}

impl<E> From<serde_json::Error> for ApiClientError<E> {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
