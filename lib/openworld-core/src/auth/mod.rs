//! Authentication: credentials, tokens and the clients that obtain them.
//!
//! Two [`AuthClient`] implementations are provided:
//!
//! - [`OAuth2AuthClient`]: OAuth2 client-credentials grant against the
//!   configured authorization endpoint, presenting `Bearer` tokens.
//! - [`SignatureAuthClient`]: locally computed `EAN` signatures that are
//!   renewed every five minutes, with no network round-trip.
//!
//! Both keep a single [`TokenStore`] behind a lock and renew it with a
//! double-checked pattern: the expiry predicate is first read under a shared
//! lock, and only when it says "stale" is the exclusive lock taken, the
//! predicate re-checked and the refresh performed. Concurrent callers that
//! observe the same stale token therefore trigger exactly one refresh.

use std::future::Future;

mod clock;
mod error;
mod oauth2;
mod secure;
mod signature;
mod token;

#[cfg(test)]
pub(crate) use self::clock::ManualClock;
pub use self::clock::{Clock, SharedClock, SystemClock};
pub use self::error::AuthError;
pub use self::oauth2::OAuth2AuthClient;
pub use self::secure::SecureString;
pub use self::signature::{SIGNATURE_LIFETIME, SignatureAuthClient};
pub use self::token::{AccessToken, BEARER, SAFETY_MARGIN, TokenStore};

/// Obtains and presents the credential injected into every API request.
///
/// An [`ApiClient`](crate::ApiClient) owns exactly one auth client, built by the
/// factory passed to [`ApiClient::new`](crate::ApiClient::new).
pub trait AuthClient: std::fmt::Debug + Send + Sync {
    /// Ensures a fresh token is stored.
    ///
    /// On success the token does not need a refresh. A call while the current
    /// token is still valid is a no-op.
    fn refresh_if_needed(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Returns the `Authorization` header value for the stored token.
    fn authorization_value(&self) -> impl Future<Output = Result<String, AuthError>> + Send;
}
