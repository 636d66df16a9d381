//! # Open World Core
//!
//! Runtime core shared by the Open World SDK clients.
//!
//! It authenticates, sends requests, decodes responses and raises typed errors:
//!
//! - **[`AuthClient`]**: token lifecycle, with the OAuth2 client-credentials
//!   grant ([`OAuth2AuthClient`]) or locally computed signatures
//!   ([`SignatureAuthClient`]). Tokens are renewed [`SAFETY_MARGIN`] before
//!   they expire, at most once per stale token.
//! - **[`ApiClient`]**: the request pipeline. Header composition, JSON body
//!   without `null` fields, configured timeout and one redacted log record
//!   per exchange.
//! - **[`dispatch`]**: maps a response to the first matching
//!   [`ResponseModels`] candidate, or to the typed error declared in the
//!   operation's [`ErrorTable`].
//! - **[`discriminated_union!`]**: tagged unions selected by a discriminator field.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use http::{Method, StatusCode};
//! use openworld_core::{
//!     ApiClient, ApiClientError, ApiError, ClientConfig, Credentials, ErrorTable,
//!     OAuth2AuthClient, RequestHeaders, ResponseModels,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct ScreenRequest { order_id: String }
//!
//! #[derive(Debug, Deserialize)]
//! struct ScreenResponse { risk_id: String, decision: String }
//!
//! #[derive(Debug, derive_more::Display)]
//! enum ScreenError {
//!     #[display("{_0}")]
//!     BadRequest(ApiError),
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder(Credentials::new("key", "secret")?)
//!     .with_api_endpoint("https://api.example.com/")
//!     .with_auth_endpoint("https://api.example.com/identity/oauth2/v3/token/")
//!     .build()?;
//! let client = ApiClient::new(config, OAuth2AuthClient::new)?;
//!
//! let models = ResponseModels::<ScreenResponse>::single();
//! let errors = ErrorTable::new().with(StatusCode::BAD_REQUEST, ScreenError::BadRequest);
//!
//! let body = ScreenRequest { order_id: "1234".into() };
//! match client
//!     .call(Method::POST, client.endpoint("screen")?, Some(&body), &RequestHeaders::new(), &models, &errors)
//!     .await
//! {
//!     Ok(Some(response)) => println!("{}: {}", response.risk_id, response.decision),
//!     Ok(None) => println!("no decision"),
//!     Err(ApiClientError::Service { status, error }) => println!("{status}: {error}"),
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod model;
pub mod redaction;

pub use self::auth::{
    AccessToken, AuthClient, AuthError, BEARER, Clock, OAuth2AuthClient, SAFETY_MARGIN,
    SIGNATURE_LIFETIME, SecureString, SharedClock, SignatureAuthClient, SystemClock, TokenStore,
};
pub use self::client::{
    ApiClient, ApiClientError, ErrorTable, HeaderComposer, HeaderError, NO_BODY, Page, Paginator,
    RequestHeaders, Response, ResponseModels, SdkInfo, TOTAL_RESULTS, TRANSACTION_ID, dispatch,
};
pub use self::config::{
    ClientConfig, ClientConfigBuilder, ConfigurationError, Credentials, DEFAULT_REQUEST_TIMEOUT,
    MIN_REQUEST_TIMEOUT,
};
pub use self::model::{ApiError, BODY_MAX_LENGTH, ErrorCause, ErrorCode};

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;

    pub use crate::model::{decode_variant, encode_variant};
}
