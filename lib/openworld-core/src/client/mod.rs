use tracing::debug;
use url::Url;

mod call;
pub use self::call::{NO_BODY, Response};

mod dispatch;
pub use self::dispatch::{ErrorTable, ResponseModels, dispatch};

mod error;
pub use self::error::ApiClientError;

mod headers;
pub use self::headers::{HeaderComposer, HeaderError, RequestHeaders, SdkInfo, TRANSACTION_ID};

mod logging;

mod pagination;
pub use self::pagination::{Page, Paginator, TOTAL_RESULTS};

#[cfg(test)]
mod tests;

use crate::auth::AuthClient;
use crate::config::{ClientConfig, ConfigurationError};
use crate::redaction::Redactions;

/// HTTP client façade shared by every API operation.
///
/// Each call refreshes the token when needed, composes the headers, sends the
/// JSON body with the configured timeout, logs the exchange with sensitive
/// values masked, and dispatches the response. Nothing is retried.
///
/// The client owns its auth client, built by the factory given to [`new`](Self::new).
/// Neither the auth client nor its token is reachable from outside:
///
/// ```rust,compile_fail
/// # use openworld_core::{ApiClient, OAuth2AuthClient};
/// fn leak(client: &ApiClient<OAuth2AuthClient>) -> &OAuth2AuthClient {
///     client.auth_client()
/// }
/// ```
///
/// ```rust,no_run
/// use http::Method;
/// use openworld_core::{
///     ApiClient, ClientConfig, Credentials, ErrorTable, NO_BODY, OAuth2AuthClient, RequestHeaders,
///     ResponseModels,
/// };
///
/// # #[derive(serde::Deserialize)]
/// # struct Status { healthy: bool }
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::builder(Credentials::new("key", "secret")?)
///     .with_api_endpoint("https://api.example.com/")
///     .with_auth_endpoint("https://api.example.com/identity/oauth2/v3/token/")
///     .build()?;
/// let client = ApiClient::new(config, OAuth2AuthClient::new)?;
///
/// let status: Option<Status> = client
///     .call(
///         Method::GET,
///         client.endpoint("status")?,
///         NO_BODY,
///         &RequestHeaders::new(),
///         &ResponseModels::single(),
///         &ErrorTable::<std::convert::Infallible>::new(),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient<A> {
    config: ClientConfig,
    http: reqwest::Client,
    auth: A,
    composer: HeaderComposer,
    redactions: Redactions,
}

impl<A: AuthClient> ApiClient<A> {
    /// Builds the HTTP client and the auth client.
    ///
    /// The factory receives the configuration and the HTTP client, so the
    /// auth client shares its connection pool and timeout.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be initialized or the SDK identity
    /// yields an invalid `User-Agent`.
    pub fn new(
        config: ClientConfig,
        auth_factory: impl FnOnce(&ClientConfig, reqwest::Client) -> A,
    ) -> Result<Self, ConfigurationError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ConfigurationError::HttpClient)?;
        let composer =
            HeaderComposer::new(config.sdk_info()).map_err(ConfigurationError::InvalidSdkInfo)?;
        let auth = auth_factory(&config, http.clone());
        debug!(api_endpoint = %config.api_endpoint(), timeout = ?config.request_timeout(), "API client ready");

        Ok(Self {
            config,
            http,
            auth,
            composer,
            redactions: Redactions::default(),
        })
    }
}

impl<A> ApiClient<A> {
    /// Resolves `path` against the API endpoint.
    ///
    /// The endpoint is treated as a directory even without a trailing slash.
    ///
    /// # Errors
    ///
    /// Fails if `path` does not form a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut base = self.config.api_endpoint().clone();
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        base.join(path.trim_start_matches('/'))
    }
}
