//! Client configuration.
//!
//! A [`ClientConfig`] is assembled once with [`ClientConfigBuilder`] and is
//! immutable afterwards. All invariants are checked in
//! [`ClientConfigBuilder::build`]:
//!
//! - the credential key and secret are non-empty,
//! - both endpoints are absolute `http`/`https` URLs,
//! - the request timeout is at least one second.
//!
//! ```rust
//! use std::time::Duration;
//! use openworld_core::{ClientConfig, Credentials};
//!
//! let config = ClientConfig::builder(Credentials::new("key", "secret")?)
//!     .with_api_endpoint("https://api.example.com/")
//!     .with_auth_endpoint("https://auth.example.com/oauth2/token")
//!     .with_request_timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! assert_eq!(config.request_timeout(), Duration::from_secs(5));
//! # Ok::<(), openworld_core::ConfigurationError>(())
//! ```

use std::time::Duration;

use url::Url;

use crate::auth::SecureString;
use crate::client::{HeaderError, SdkInfo};

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Smallest accepted request timeout.
pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Errors raised when a configuration violates its invariants.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum ConfigurationError {
    /// The credential key is empty.
    #[display("Credential key must not be empty")]
    EmptyKey,

    /// The credential secret is empty.
    #[display("Credential secret must not be empty")]
    EmptySecret,

    /// A required endpoint was not provided.
    #[display("Missing {name}")]
    MissingEndpoint {
        /// Which endpoint is missing.
        name: &'static str,
    },

    /// An endpoint is not an absolute `http`/`https` URL.
    #[display("Invalid {name} '{value}': {reason}")]
    InvalidEndpoint {
        /// Which endpoint is invalid.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request timeout is shorter than [`MIN_REQUEST_TIMEOUT`].
    #[display("Request timeout must be at least {min:?}, got {value:?}")]
    TimeoutTooShort {
        /// The rejected timeout.
        value: Duration,
        /// The minimum.
        min: Duration,
    },

    /// The SDK identity does not produce a valid `User-Agent`.
    #[display("Invalid SDK identity: {_0}")]
    InvalidSdkInfo(HeaderError),

    /// The HTTP client could not be initialized.
    #[display("Failed to build HTTP client: {_0}")]
    HttpClient(reqwest::Error),
}

/// API key and secret.
///
/// The secret is held in a [`SecureString`] and never printed.
#[derive(Debug, Clone)]
pub struct Credentials {
    key: String,
    secret: SecureString,
}

impl Credentials {
    /// Creates credentials from a key and secret.
    ///
    /// # Errors
    ///
    /// Returns an error if either is empty.
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<SecureString>,
    ) -> Result<Self, ConfigurationError> {
        let key = key.into();
        let secret = secret.into();
        if key.is_empty() {
            return Err(ConfigurationError::EmptyKey);
        }
        if secret.is_empty() {
            return Err(ConfigurationError::EmptySecret);
        }
        Ok(Self { key, secret })
    }

    /// The API key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn secret(&self) -> &SecureString {
        &self.secret
    }
}

/// Immutable configuration of an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credentials: Credentials,
    api_endpoint: Url,
    auth_endpoint: Url,
    request_timeout: Duration,
    sdk_info: SdkInfo,
}

impl ClientConfig {
    /// Starts building a configuration for the given credentials.
    pub fn builder(credentials: Credentials) -> ClientConfigBuilder {
        ClientConfigBuilder::new(credentials)
    }

    /// The credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL of the API.
    pub fn api_endpoint(&self) -> &Url {
        &self.api_endpoint
    }

    /// URL of the authorization endpoint.
    pub fn auth_endpoint(&self) -> &Url {
        &self.auth_endpoint
    }

    /// Timeout applied to every HTTP exchange.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Identity of the SDK, used in the `User-Agent`.
    pub fn sdk_info(&self) -> &SdkInfo {
        &self.sdk_info
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    credentials: Credentials,
    api_endpoint: Option<String>,
    auth_endpoint: Option<String>,
    request_timeout: Duration,
    sdk_info: SdkInfo,
}

impl ClientConfigBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_endpoint: None,
            auth_endpoint: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sdk_info: SdkInfo::default(),
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the authorization endpoint URL.
    #[must_use]
    pub fn with_auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the request timeout (default: 10 seconds).
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the SDK identity reported in the `User-Agent`.
    #[must_use]
    pub fn with_sdk_info(mut self, sdk_info: SdkInfo) -> Self {
        self.sdk_info = sdk_info;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is missing or not an absolute
    /// `http`/`https` URL, or if the timeout is below one second.
    pub fn build(self) -> Result<ClientConfig, ConfigurationError> {
        let api_endpoint = parse_endpoint("API endpoint", self.api_endpoint)?;
        let auth_endpoint = parse_endpoint("auth endpoint", self.auth_endpoint)?;

        if self.request_timeout < MIN_REQUEST_TIMEOUT {
            return Err(ConfigurationError::TimeoutTooShort {
                value: self.request_timeout,
                min: MIN_REQUEST_TIMEOUT,
            });
        }

        Ok(ClientConfig {
            credentials: self.credentials,
            api_endpoint,
            auth_endpoint,
            request_timeout: self.request_timeout,
            sdk_info: self.sdk_info,
        })
    }
}

fn parse_endpoint(name: &'static str, value: Option<String>) -> Result<Url, ConfigurationError> {
    let value = value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigurationError::MissingEndpoint { name })?;

    let url = Url::parse(&value).map_err(|err| ConfigurationError::InvalidEndpoint {
        name,
        value: value.clone(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigurationError::InvalidEndpoint {
            name,
            value,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}
