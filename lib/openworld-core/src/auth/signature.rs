//! Signature authentication (`Authorization: EAN APIKey=...,Signature=...,timestamp=...`).

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha512};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{AccessToken, AuthClient, AuthError, SharedClock, SystemClock, TokenStore};
use crate::config::{ClientConfig, Credentials};

/// How long a computed signature is accepted by the server.
pub const SIGNATURE_LIFETIME: Duration = Duration::from_secs(300);

const SCHEME: &str = "EAN";

/// Auth client signing requests with `sha512(key ‖ secret ‖ timestamp)`.
///
/// The signature is computed locally and renewed once it is within the
/// safety margin of [`SIGNATURE_LIFETIME`].
#[derive(Debug)]
pub struct SignatureAuthClient {
    credentials: Credentials,
    clock: SharedClock,
    store: RwLock<TokenStore>,
}

impl SignatureAuthClient {
    /// Creates the client. The HTTP client is unused: signatures need no
    /// round-trip.
    pub fn new(config: &ClientConfig, _http: reqwest::Client) -> Self {
        Self {
            credentials: config.credentials().clone(),
            clock: Arc::new(SystemClock),
            store: RwLock::new(TokenStore::with_scheme(SCHEME)),
        }
    }

    /// Replaces the clock used for timestamps and expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    fn sign(&self) -> AccessToken {
        let timestamp = self.clock.unix_timestamp();
        let key = self.credentials.key();
        let signature = signature(key, self.credentials.secret().as_str(), timestamp);

        AccessToken::new(
            format!("APIKey={key},Signature={signature},timestamp={timestamp}"),
            self.clock.now(),
            SIGNATURE_LIFETIME,
        )
    }
}

fn signature(key: &str, secret: &str, timestamp: u64) -> String {
    let mut hasher = Sha512::new();
    hasher.update(key.as_bytes());
    hasher.update(secret.as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

impl AuthClient for SignatureAuthClient {
    async fn refresh_if_needed(&self) -> Result<(), AuthError> {
        if !self.store.read().await.needs_refresh_at(self.clock.now()) {
            return Ok(());
        }

        let mut store = self.store.write().await;
        if !store.needs_refresh_at(self.clock.now()) {
            debug!("signature already renewed by a concurrent caller");
            return Ok(());
        }

        info!("refreshing token");
        store.replace(self.sign());
        info!(
            expires_in = SIGNATURE_LIFETIME.as_secs(),
            "new token expires in {} seconds",
            SIGNATURE_LIFETIME.as_secs()
        );

        Ok(())
    }

    async fn authorization_value(&self) -> Result<String, AuthError> {
        self.store.read().await.authorization_value()
    }
}
