//! # Open World Fraud Prevention
//!
//! Client of the Fraud Prevention V2 API, built on [`openworld_core`].
//!
//! | Operation | Endpoint |
//! |---|---|
//! | [`screen`](FraudPreventionClient::screen) | `POST /fraud-prevention/v2/order/purchase/screen` |
//! | [`notify_with_order_update`](FraudPreventionClient::notify_with_order_update) | `POST /fraud-prevention/v2/order/purchase/update` |
//! | [`screen_account`](FraudPreventionClient::screen_account) | `POST /fraud-prevention/v2/account/screen` |
//! | [`notify_with_account_update`](FraudPreventionClient::notify_with_account_update) | `POST /fraud-prevention/v2/account/update` |
//!
//! Card numbers, gift card PINs and bank account numbers are masked in the
//! exchange logs, never on the wire.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openworld_core::{ApiClientError, Credentials};
//! use openworld_fraud_prevention::model::{OrderPurchaseUpdateRequest, OrderStatus, OrderUpdate};
//! use openworld_fraud_prevention::{FraudPreventionClient, OrderUpdateError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FraudPreventionClient::config_builder(Credentials::new("key", "secret")?)
//!     .with_request_timeout(std::time::Duration::from_secs(5))
//!     .build()?;
//! let client = FraudPreventionClient::from_config(config)?;
//!
//! let update = OrderPurchaseUpdateRequest::OrderUpdate(OrderUpdate {
//!     risk_id: "1234567".into(),
//!     order_status: OrderStatus::Cancelled,
//!     acquirer_reference_number: None,
//!     cancellation_reason: None,
//! });
//!
//! match client.notify_with_order_update(None, &update).await {
//!     Ok(response) => println!("acknowledged: {response:?}"),
//!     Err(ApiClientError::Service { error, .. }) if error.is_retryable() => println!("retry later"),
//!     Err(ApiClientError::Service { error: OrderUpdateError::OrderPurchaseUpdateNotFound(_), .. }) => {
//!         println!("unknown risk id");
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod client;
pub mod model;

pub use self::client::{
    AccountScreenError, AccountUpdateError, DEFAULT_API_ENDPOINT, DEFAULT_AUTH_ENDPOINT,
    FraudPreventionClient, OrderUpdateError, ScreenError, sdk_info,
};
