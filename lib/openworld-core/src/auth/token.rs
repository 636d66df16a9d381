//! Access tokens and the store that decides when to refresh them.

use std::fmt;
use std::time::{Duration, Instant};

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::AuthError;
use crate::redaction::OMITTED;

/// Lead time before server-side expiry at which a token is renewed.
pub const SAFETY_MARGIN: Duration = Duration::from_secs(10);

/// Authorization scheme of OAuth2 access tokens.
pub const BEARER: &str = "Bearer";

/// A token with its issue instant and lifetime.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken {
    value: String,
    #[zeroize(skip)]
    issued_at: Instant,
    #[zeroize(skip)]
    lifetime: Duration,
}

impl AccessToken {
    /// Creates a token issued at `issued_at` and valid for `lifetime`.
    pub fn new(value: impl Into<String>, issued_at: Instant, lifetime: Duration) -> Self {
        Self {
            value: value.into(),
            issued_at,
            lifetime,
        }
    }

    /// Returns the token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When the token was obtained.
    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    /// How long the server considers the token valid.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// `issued_at + lifetime`.
    pub fn expires_at(&self) -> Instant {
        self.issued_at + self.lifetime
    }

    /// `true` once `now >= issued_at + lifetime - SAFETY_MARGIN`.
    pub fn is_about_to_expire(&self, now: Instant) -> bool {
        now + SAFETY_MARGIN >= self.expires_at()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &OMITTED)
            .field("issued_at", &self.issued_at)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// In-memory record of the last obtained token.
///
/// The store holds no lock of its own; auth clients guard it.
#[derive(Debug)]
pub struct TokenStore {
    scheme: &'static str,
    token: Option<AccessToken>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::bearer()
    }
}

impl TokenStore {
    /// An empty store for OAuth2 bearer tokens.
    pub fn bearer() -> Self {
        Self::with_scheme(BEARER)
    }

    /// An empty store presenting tokens under the given authorization scheme.
    pub fn with_scheme(scheme: &'static str) -> Self {
        Self {
            scheme,
            token: None,
        }
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Returns `true` if no token was obtained yet or the current one is
    /// about to expire.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh_at(Instant::now())
    }

    /// [`Self::needs_refresh`] evaluated at `now`.
    pub fn needs_refresh_at(&self, now: Instant) -> bool {
        self.token
            .as_ref()
            .is_none_or(|token| token.is_about_to_expire(now))
    }

    /// Returns `"<scheme> <value>"`, e.g. `"Bearer abc"`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UninitializedToken`] if no refresh succeeded yet.
    pub fn authorization_value(&self) -> Result<String, AuthError> {
        self.token
            .as_ref()
            .map(|token| format!("{} {}", self.scheme, token.value()))
            .ok_or(AuthError::UninitializedToken)
    }

    /// Stores a freshly obtained token, returning the previous one.
    pub fn replace(&mut self, token: AccessToken) -> Option<AccessToken> {
        self.token.replace(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_need_refresh_when_empty() {
        let store = TokenStore::bearer();

        assert!(store.needs_refresh());
        assert!(matches!(
            store.authorization_value(),
            Err(AuthError::UninitializedToken)
        ));
    }

    #[test]
    fn should_apply_safety_margin() {
        let t0 = Instant::now();
        let mut store = TokenStore::bearer();
        store.replace(AccessToken::new("token", t0, Duration::from_secs(300)));

        assert!(!store.needs_refresh_at(t0));
        assert!(!store.needs_refresh_at(t0 + Duration::from_secs(289)));
        assert!(store.needs_refresh_at(t0 + Duration::from_secs(290)));
        assert!(store.needs_refresh_at(t0 + Duration::from_secs(295)));
        assert!(store.needs_refresh_at(t0 + Duration::from_secs(600)));
    }

    #[test]
    fn should_treat_short_lifetime_as_expired() {
        let t0 = Instant::now();
        let mut store = TokenStore::bearer();
        store.replace(AccessToken::new("token", t0, Duration::from_secs(5)));

        assert!(store.needs_refresh_at(t0));
    }

    #[test]
    fn should_format_authorization_value() {
        let mut store = TokenStore::bearer();
        store.replace(AccessToken::new(
            "abc",
            Instant::now(),
            Duration::from_secs(3600),
        ));

        assert_eq!(
            store.authorization_value().expect("initialized"),
            "Bearer abc"
        );
    }

    #[test]
    fn should_use_custom_scheme() {
        let mut store = TokenStore::with_scheme("EAN");
        store.replace(AccessToken::new(
            "APIKey=k",
            Instant::now(),
            Duration::from_secs(300),
        ));

        assert_eq!(
            store.authorization_value().expect("initialized"),
            "EAN APIKey=k"
        );
    }

    #[test]
    fn should_return_previous_token_on_replace() {
        let t0 = Instant::now();
        let mut store = TokenStore::bearer();

        assert!(store.replace(AccessToken::new("first", t0, Duration::from_secs(60))).is_none());
        let previous = store
            .replace(AccessToken::new("second", t0, Duration::from_secs(60)))
            .expect("previous token");

        assert_eq!(previous.value(), "first");
        assert_eq!(store.token().map(AccessToken::value), Some("second"));
    }

    #[test]
    fn should_redact_debug_output() {
        let token = AccessToken::new("secret-token", Instant::now(), Duration::from_secs(60));

        let debug_str = format!("{token:?}");

        assert!(debug_str.contains(OMITTED));
        assert!(!debug_str.contains("secret-token"));
    }
}
