use http::Method;
use openworld_core::{
    ApiClient, ApiClientError, AuthClient, ClientConfig, ClientConfigBuilder, ConfigurationError,
    Credentials, ErrorTable, OAuth2AuthClient, RequestHeaders, ResponseModels, SdkInfo,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

mod error;
pub use self::error::{AccountScreenError, AccountUpdateError, OrderUpdateError, ScreenError};

use crate::model::{
    AccountScreenRequest, AccountScreenResponse, AccountUpdateRequest, AccountUpdateResponse,
    OrderPurchaseScreenRequest, OrderPurchaseScreenResponse, OrderPurchaseUpdateRequest,
    OrderPurchaseUpdateResponse,
};

/// Production API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.expediagroup.com/";

/// Production OAuth2 token endpoint.
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://api.expediagroup.com/identity/oauth2/v3/token/";

const SCREEN_PATH: &str = "fraud-prevention/v2/order/purchase/screen";
const ORDER_UPDATE_PATH: &str = "fraud-prevention/v2/order/purchase/update";
const ACCOUNT_SCREEN_PATH: &str = "fraud-prevention/v2/account/screen";
const ACCOUNT_UPDATE_PATH: &str = "fraud-prevention/v2/account/update";

/// Identity reported in the `User-Agent` of this client.
pub fn sdk_info() -> SdkInfo {
    SdkInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Client of the Fraud Prevention V2 API.
///
/// Every operation takes an optional transaction id, sent as the
/// `transaction-id` header. A fresh one is generated when none is given.
///
/// With a listed error status, an operation fails with
/// [`ApiClientError::Service`] carrying its typed error. Other statuses
/// surface as [`ApiClientError::Api`] or [`ApiClientError::Protocol`].
///
/// The underlying [`ApiClient`] stays private:
///
/// ```rust,compile_fail
/// # use openworld_fraud_prevention::FraudPreventionClient;
/// fn inner(client: &FraudPreventionClient) {
///     let _ = client.api_client();
/// }
/// ```
///
/// ```rust,no_run
/// use openworld_core::Credentials;
/// use openworld_fraud_prevention::FraudPreventionClient;
///
/// # async fn example(request: openworld_fraud_prevention::model::OrderPurchaseScreenRequest) -> Result<(), Box<dyn std::error::Error>> {
/// let client = FraudPreventionClient::new(Credentials::new("key", "secret")?)?;
///
/// if let Some(response) = client.screen(None, &request).await? {
///     println!("{:?}: {:?}", response.risk_id, response.decision);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FraudPreventionClient<A = OAuth2AuthClient> {
    client: ApiClient<A>,
    screen_models: ResponseModels<OrderPurchaseScreenResponse>,
    screen_errors: ErrorTable<ScreenError>,
    order_update_models: ResponseModels<OrderPurchaseUpdateResponse>,
    order_update_errors: ErrorTable<OrderUpdateError>,
    account_screen_models: ResponseModels<AccountScreenResponse>,
    account_screen_errors: ErrorTable<AccountScreenError>,
    account_update_models: ResponseModels<AccountUpdateResponse>,
    account_update_errors: ErrorTable<AccountUpdateError>,
}

impl FraudPreventionClient {
    /// A client of the production endpoints.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, ConfigurationError> {
        Self::from_config(Self::config_builder(credentials).build()?)
    }

    /// A configuration builder preset with the production endpoints and the
    /// identity of this client.
    pub fn config_builder(credentials: Credentials) -> ClientConfigBuilder {
        ClientConfig::builder(credentials)
            .with_api_endpoint(DEFAULT_API_ENDPOINT)
            .with_auth_endpoint(DEFAULT_AUTH_ENDPOINT)
            .with_sdk_info(sdk_info())
    }

    /// A client authenticated with the OAuth2 client-credentials grant.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigurationError> {
        Self::with_auth_client(config, OAuth2AuthClient::new)
    }
}

impl<A: AuthClient> FraudPreventionClient<A> {
    /// A client whose auth client is built by `auth_factory`.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn with_auth_client(
        config: ClientConfig,
        auth_factory: impl FnOnce(&ClientConfig, reqwest::Client) -> A,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            client: ApiClient::new(config, auth_factory)?,
            screen_models: ResponseModels::single(),
            screen_errors: ScreenError::table(),
            order_update_models: ResponseModels::single(),
            order_update_errors: OrderUpdateError::table(),
            account_screen_models: ResponseModels::single(),
            account_screen_errors: AccountScreenError::table(),
            account_update_models: ResponseModels::single(),
            account_update_errors: AccountUpdateError::table(),
        })
    }

    /// Fraud recommendation for an order purchase: accept, review or reject.
    ///
    /// # Errors
    ///
    /// See [`ScreenError`] for the typed errors.
    #[instrument(skip(self, body), fields(operation = "screen"))]
    pub async fn screen(
        &self,
        transaction_id: Option<Uuid>,
        body: &OrderPurchaseScreenRequest,
    ) -> Result<Option<OrderPurchaseScreenResponse>, ApiClientError<ScreenError>> {
        self.post(SCREEN_PATH, transaction_id, body, &self.screen_models, &self.screen_errors)
            .await
    }

    /// Notifies a change of an order screened before: status, chargeback,
    /// insult, refund or payment.
    ///
    /// # Errors
    ///
    /// See [`OrderUpdateError`] for the typed errors.
    #[instrument(skip(self, body), fields(operation = "notify_with_order_update", risk_id = body.risk_id()))]
    pub async fn notify_with_order_update(
        &self,
        transaction_id: Option<Uuid>,
        body: &OrderPurchaseUpdateRequest,
    ) -> Result<Option<OrderPurchaseUpdateResponse>, ApiClientError<OrderUpdateError>> {
        self.post(
            ORDER_UPDATE_PATH,
            transaction_id,
            body,
            &self.order_update_models,
            &self.order_update_errors,
        )
        .await
    }

    /// Fraud recommendation for an account transaction: accept, challenge or reject.
    ///
    /// # Errors
    ///
    /// See [`AccountScreenError`] for the typed errors.
    #[instrument(skip(self, body), fields(operation = "screen_account"))]
    pub async fn screen_account(
        &self,
        transaction_id: Option<Uuid>,
        body: &AccountScreenRequest,
    ) -> Result<Option<AccountScreenResponse>, ApiClientError<AccountScreenError>> {
        self.post(
            ACCOUNT_SCREEN_PATH,
            transaction_id,
            body,
            &self.account_screen_models,
            &self.account_screen_errors,
        )
        .await
    }

    /// Notifies an account lifecycle transition: multi-factor authentication
    /// outcome or remediation.
    ///
    /// # Errors
    ///
    /// See [`AccountUpdateError`] for the typed errors.
    #[instrument(skip(self, body), fields(operation = "notify_with_account_update"))]
    pub async fn notify_with_account_update(
        &self,
        transaction_id: Option<Uuid>,
        body: &AccountUpdateRequest,
    ) -> Result<Option<AccountUpdateResponse>, ApiClientError<AccountUpdateError>> {
        self.post(
            ACCOUNT_UPDATE_PATH,
            transaction_id,
            body,
            &self.account_update_models,
            &self.account_update_errors,
        )
        .await
    }

    async fn post<B, T, E>(
        &self,
        path: &str,
        transaction_id: Option<Uuid>,
        body: &B,
        models: &ResponseModels<T>,
        errors: &ErrorTable<E>,
    ) -> Result<Option<T>, ApiClientError<E>>
    where
        B: Serialize,
    {
        let url = self.client.endpoint(path)?;
        let headers = match transaction_id {
            Some(transaction_id) => RequestHeaders::new().with_transaction_id(transaction_id),
            None => RequestHeaders::new(),
        };

        self.client
            .call(Method::POST, url, Some(body), &headers, models, errors)
            .await
    }
}
