//! OAuth2 client-credentials grant.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use super::{AccessToken, AuthClient, AuthError, SharedClock, SystemClock, TokenStore};
use crate::config::{ClientConfig, Credentials};

const CLIENT_CREDENTIALS_GRANT: [(&str, &str); 1] = [("grant_type", "client_credentials")];

/// Success body of the token endpoint. Other fields (`id_token`,
/// `refresh_token`, ...) are accepted and ignored.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Auth client performing the OAuth2 client-credentials grant.
///
/// The grant is a `POST` to the configured authorization endpoint with HTTP
/// Basic credentials and the form body `grant_type=client_credentials`. Tokens
/// are renewed [`SAFETY_MARGIN`](super::SAFETY_MARGIN) before they expire.
#[derive(Debug)]
pub struct OAuth2AuthClient {
    credentials: Credentials,
    auth_endpoint: Url,
    http: reqwest::Client,
    clock: SharedClock,
    store: RwLock<TokenStore>,
}

impl OAuth2AuthClient {
    /// Creates the client; no token is requested until the first refresh.
    ///
    /// The signature matches the factory expected by
    /// [`ApiClient::new`](crate::ApiClient::new).
    pub fn new(config: &ClientConfig, http: reqwest::Client) -> Self {
        Self {
            credentials: config.credentials().clone(),
            auth_endpoint: config.auth_endpoint().clone(),
            http,
            clock: Arc::new(SystemClock),
            store: RwLock::new(TokenStore::bearer()),
        }
    }

    /// Replaces the clock used for expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    async fn request_token(&self) -> Result<AccessToken, AuthError> {
        let issued_at = self.clock.now();

        let basic = STANDARD.encode(format!(
            "{}:{}",
            self.credentials.key(),
            self.credentials.secret().as_str()
        ));
        let mut authorization = HeaderValue::from_str(&format!("Basic {basic}"))?;
        authorization.set_sensitive(true);
        let form = serde_urlencoded::to_string(CLIENT_CREDENTIALS_GRANT)?;

        let response = self
            .http
            .post(self.auth_endpoint.clone())
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .body(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            warn!(%status, "token request rejected");
            return Err(AuthError::Rejected { status });
        }

        let token: TokenResponse = serde_json::from_slice(&body)
            .map_err(|source| AuthError::InvalidResponse { status, source })?;
        debug!(token_type = ?token.token_type, scope = ?token.scope, "token received");

        Ok(AccessToken::new(
            token.access_token,
            issued_at,
            Duration::from_secs(token.expires_in),
        ))
    }
}

impl AuthClient for OAuth2AuthClient {
    async fn refresh_if_needed(&self) -> Result<(), AuthError> {
        if !self.store.read().await.needs_refresh_at(self.clock.now()) {
            return Ok(());
        }

        let mut store = self.store.write().await;
        if !store.needs_refresh_at(self.clock.now()) {
            debug!("token already refreshed by a concurrent caller");
            return Ok(());
        }

        info!("refreshing token");
        let token = self.request_token().await?;
        let expires_in = token.lifetime().as_secs();
        if token.is_about_to_expire(self.clock.now()) {
            warn!(expires_in, "new token lifetime is within the safety margin");
            return Err(AuthError::ShortLivedToken {
                lifetime: token.lifetime(),
            });
        }
        store.replace(token);
        info!(expires_in, "new token expires in {expires_in} seconds");

        Ok(())
    }

    async fn authorization_value(&self) -> Result<String, AuthError> {
        self.store.read().await.authorization_value()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::{Clock, ManualClock};

    const T0: u64 = 1_700_000_000;

    fn token_body(access_token: &str, expires_in: u64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "expires_in": expires_in,
            "token_type": "bearer",
            "scope": "fraud-prevention",
            "id_token": "ignored"
        }))
    }

    fn auth_client(server: &MockServer, clock: Arc<ManualClock>) -> OAuth2AuthClient {
        let credentials = Credentials::new("key", "secret").expect("valid credentials");
        let config = ClientConfig::builder(credentials)
            .with_api_endpoint(server.uri())
            .with_auth_endpoint(format!("{}/token", server.uri()))
            .build()
            .expect("valid config");
        OAuth2AuthClient::new(&config, reqwest::Client::new()).with_clock(clock)
    }

    async fn token_requests(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .expect("request recording enabled")
            .len()
    }

    #[tokio::test]
    async fn should_request_token_with_client_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("authorization", "Basic a2V5OnNlY3JldA=="))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=client_credentials"))
            .respond_with(token_body("token-1", 300))
            .expect(1)
            .mount(&server)
            .await;
        let client = auth_client(&server, Arc::new(ManualClock::new(T0)));

        client.refresh_if_needed().await.expect("refresh succeeds");

        let value = client.authorization_value().await.expect("token stored");
        assert_eq!(value, "Bearer token-1");
    }

    #[tokio::test]
    async fn should_not_refresh_valid_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("token-1", 300))
            .expect(1)
            .mount(&server)
            .await;
        let client = auth_client(&server, Arc::new(ManualClock::new(T0)));

        client.refresh_if_needed().await.expect("first refresh");
        client.refresh_if_needed().await.expect("second refresh");
    }

    #[tokio::test]
    async fn should_follow_token_lifecycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("token", 300))
            .expect(3)
            .mount(&server)
            .await;
        let clock = Arc::new(ManualClock::new(T0));
        let client = auth_client(&server, Arc::clone(&clock));

        client.refresh_if_needed().await.expect("initial refresh");
        assert_eq!(token_requests(&server).await, 1);

        clock.set(Duration::from_secs(289));
        client.refresh_if_needed().await.expect("still valid");
        assert_eq!(token_requests(&server).await, 1);

        clock.set(Duration::from_secs(295));
        client.refresh_if_needed().await.expect("within margin");
        assert_eq!(token_requests(&server).await, 2);

        clock.set(Duration::from_secs(600));
        client.refresh_if_needed().await.expect("second expiry");
        assert_eq!(token_requests(&server).await, 3);
    }

    async fn expires_at(client: &OAuth2AuthClient) -> Option<std::time::Instant> {
        client.store.read().await.token().map(AccessToken::expires_at)
    }

    #[tokio::test]
    async fn should_never_move_expiry_backwards() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("token", 300))
            .mount(&server)
            .await;
        let clock = Arc::new(ManualClock::new(T0));
        let client = auth_client(&server, Arc::clone(&clock));

        let mut previous = None;
        for elapsed in [0, 120, 295, 591, 900] {
            clock.set(Duration::from_secs(elapsed));
            client.refresh_if_needed().await.expect("refresh succeeds");

            let current = expires_at(&client).await;
            assert!(current.is_some());
            assert!(current >= previous, "expiry moved backwards at {elapsed}s");
            assert!(!client.store.read().await.needs_refresh_at(clock.now()));
            previous = current;
        }
    }

    #[rstest::rstest]
    #[case::below_margin(5)]
    #[case::at_margin(10)]
    #[tokio::test]
    async fn should_reject_token_within_safety_margin(#[case] expires_in: u64) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("short", expires_in))
            .mount(&server)
            .await;
        let client = auth_client(&server, Arc::new(ManualClock::new(T0)));

        let error = client.refresh_if_needed().await.expect_err("short token rejected");

        assert!(matches!(
            error,
            AuthError::ShortLivedToken { lifetime } if lifetime == Duration::from_secs(expires_in)
        ));
        assert!(client.store.read().await.needs_refresh_at(client.clock.now()));
        assert!(matches!(
            client.authorization_value().await,
            Err(AuthError::UninitializedToken)
        ));
    }

    #[tokio::test]
    async fn should_keep_previous_token_when_renewal_is_short_lived() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("token-1", 300))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(token_body("token-2", 3))
            .mount(&server)
            .await;
        let clock = Arc::new(ManualClock::new(T0));
        let client = auth_client(&server, Arc::clone(&clock));
        client.refresh_if_needed().await.expect("initial refresh");
        let first_expiry = expires_at(&client).await;

        clock.set(Duration::from_secs(295));
        let error = client.refresh_if_needed().await.expect_err("renewal rejected");

        assert!(matches!(error, AuthError::ShortLivedToken { .. }));
        assert_eq!(expires_at(&client).await, first_expiry);
        assert_eq!(
            client.authorization_value().await.expect("previous token kept"),
            "Bearer token-1"
        );
    }

    #[tokio::test]
    async fn should_refresh_once_for_concurrent_callers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("shared", 300).set_delay(Duration::from_millis(200)))
            .expect(1)
            .mount(&server)
            .await;
        let client = auth_client(&server, Arc::new(ManualClock::new(T0)));

        let (first, second, third) = tokio::join!(
            client.refresh_if_needed(),
            client.refresh_if_needed(),
            client.refresh_if_needed()
        );

        first.expect("first caller");
        second.expect("second caller");
        third.expect("third caller");
        assert_eq!(
            client.authorization_value().await.expect("token stored"),
            "Bearer shared"
        );
    }

    #[tokio::test]
    async fn should_fail_with_status_on_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid client"))
            .mount(&server)
            .await;
        let client = auth_client(&server, Arc::new(ManualClock::new(T0)));

        let error = client.refresh_if_needed().await.expect_err("should be rejected");

        assert!(matches!(error, AuthError::Rejected { status } if status == StatusCode::UNAUTHORIZED));
        assert!(matches!(
            client.authorization_value().await,
            Err(AuthError::UninitializedToken)
        ));
    }

    #[tokio::test]
    async fn should_fail_on_unparseable_token_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not a token"))
            .mount(&server)
            .await;
        let client = auth_client(&server, Arc::new(ManualClock::new(T0)));

        let error = client.refresh_if_needed().await.expect_err("should fail");

        assert!(matches!(error, AuthError::InvalidResponse { status, .. } if status == StatusCode::OK));
    }

    #[tokio::test]
    async fn should_keep_previous_token_when_refresh_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(token_body("token-1", 300))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let clock = Arc::new(ManualClock::new(T0));
        let client = auth_client(&server, Arc::clone(&clock));
        client.refresh_if_needed().await.expect("initial refresh");

        clock.set(Duration::from_secs(295));
        let error = client.refresh_if_needed().await.expect_err("refresh fails");

        assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            client.authorization_value().await.expect("previous token kept"),
            "Bearer token-1"
        );
    }

    #[tokio::test]
    async fn should_surface_transport_failure() {
        let client = {
            let credentials = Credentials::new("key", "secret").expect("valid credentials");
            let config = ClientConfig::builder(credentials)
                .with_api_endpoint("http://127.0.0.1:9/")
                .with_auth_endpoint("http://127.0.0.1:9/token")
                .build()
                .expect("valid config");
            OAuth2AuthClient::new(&config, reqwest::Client::new())
        };

        let error = client.refresh_if_needed().await.expect_err("nothing listens");

        assert!(matches!(error, AuthError::Transport(_)));
    }
}
