//! Error bodies returned by the Fraud Prevention API.
//!
//! Two families share the same shape: [`Error`] carries the order purchase
//! codes, [`AccountTakeoverError`] the account codes. The statuses common to
//! every operation (403, 404, 429, 500, 502, 504) are answered with the
//! account family, the order operations included.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code of an order purchase [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderErrorCode {
    /// `UNAUTHORIZED`
    Unauthorized,
    /// `FORBIDDEN`
    Forbidden,
    /// `NOT_FOUND`
    NotFound,
    /// `ORDER_PURCHASE_UPDATE_NOT_FOUND`
    OrderPurchaseUpdateNotFound,
    /// `TOO_MANY_REQUESTS`
    TooManyRequests,
    /// `INTERNAL_SERVER_ERROR`
    InternalServerError,
    /// `BAD_GATEWAY`
    BadGateway,
    /// `RETRYABLE_ORDER_PURCHASE_SCREEN_FAILURE`
    RetryableOrderPurchaseScreenFailure,
    /// `RETRYABLE_ORDER_PURCHASE_UPDATE_FAILURE`
    RetryableOrderPurchaseUpdateFailure,
    /// `GATEWAY_TIMEOUT`
    GatewayTimeout,
    /// `BAD_REQUEST`
    BadRequest,
}

impl OrderErrorCode {
    /// The wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::OrderPurchaseUpdateNotFound => "ORDER_PURCHASE_UPDATE_NOT_FOUND",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::BadGateway => "BAD_GATEWAY",
            Self::RetryableOrderPurchaseScreenFailure => "RETRYABLE_ORDER_PURCHASE_SCREEN_FAILURE",
            Self::RetryableOrderPurchaseUpdateFailure => "RETRYABLE_ORDER_PURCHASE_UPDATE_FAILURE",
            Self::GatewayTimeout => "GATEWAY_TIMEOUT",
            Self::BadRequest => "BAD_REQUEST",
        }
    }
}

impl fmt::Display for OrderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code of an [`AccountTakeoverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountErrorCode {
    /// `UNAUTHORIZED`
    Unauthorized,
    /// `FORBIDDEN`
    Forbidden,
    /// `NOT_FOUND`
    NotFound,
    /// `ACCOUNT_UPDATE_NOT_FOUND`
    AccountUpdateNotFound,
    /// `TOO_MANY_REQUESTS`
    TooManyRequests,
    /// `INTERNAL_SERVER_ERROR`
    InternalServerError,
    /// `BAD_GATEWAY`
    BadGateway,
    /// `RETRYABLE_ACCOUNT_SCREEN_FAILURE`
    RetryableAccountScreenFailure,
    /// `RETRYABLE_ACCOUNT_UPDATE_FAILURE`
    RetryableAccountUpdateFailure,
    /// `GATEWAY_TIMEOUT`
    GatewayTimeout,
    /// `BAD_REQUEST`
    BadRequest,
}

impl AccountErrorCode {
    /// The wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::AccountUpdateNotFound => "ACCOUNT_UPDATE_NOT_FOUND",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::BadGateway => "BAD_GATEWAY",
            Self::RetryableAccountScreenFailure => "RETRYABLE_ACCOUNT_SCREEN_FAILURE",
            Self::RetryableAccountUpdateFailure => "RETRYABLE_ACCOUNT_UPDATE_FAILURE",
            Self::GatewayTimeout => "GATEWAY_TIMEOUT",
            Self::BadRequest => "BAD_REQUEST",
        }
    }
}

impl fmt::Display for AccountErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code of a [`Cause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CauseCode {
    /// `MISSING_MANDATORY_PARAM`
    MissingMandatoryParam,
    /// `INVALID_PARAM`
    InvalidParam,
    /// `INVALID_FORMAT`
    InvalidFormat,
}

/// One reason a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cause {
    /// Missing, invalid or malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CauseCode>,
    /// JSON path of the offending field, e.g. `$.transaction.customer_account.account_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error body of the order purchase operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(deny_unknown_fields)]
#[display("{code}: {message}")]
pub struct Error {
    /// Machine-readable error code.
    pub code: OrderErrorCode,
    /// Human-readable explanation.
    pub message: String,
}

/// Body of a 401 on the order purchase operations.
pub type UnauthorizedError = Error;
/// Body of a 404 when the updated order is unknown.
pub type OrderPurchaseUpdateNotFoundError = Error;
/// Body of a 503 on `screen`. The request can be retried.
pub type RetryableOrderPurchaseScreenFailure = Error;
/// Body of a 503 on `notify_with_order_update`. The request can be retried.
pub type RetryableOrderPurchaseUpdateFailure = Error;

/// A rejected order purchase request, with the failing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(deny_unknown_fields)]
#[display("{code}: {message}")]
pub struct BadRequestError {
    /// Machine-readable error code, usually `BAD_REQUEST`.
    pub code: OrderErrorCode,
    /// Human-readable explanation.
    pub message: String,
    /// Every field that failed validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<Cause>>,
}

/// Error body of the account operations, and of the statuses shared by all operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(deny_unknown_fields)]
#[display("{code}: {message}")]
pub struct AccountTakeoverError {
    /// Machine-readable error code.
    pub code: AccountErrorCode,
    /// Human-readable explanation.
    pub message: String,
}

/// Body of a 401 on the account operations.
pub type AccountTakeoverUnauthorizedError = AccountTakeoverError;
/// Body of a 404 when the updated account screen is unknown.
pub type AccountUpdateNotFoundError = AccountTakeoverError;
/// Body of a 503 on the account operations. The request can be retried.
pub type ServiceUnavailableError = AccountTakeoverError;
/// 403
pub type ForbiddenError = AccountTakeoverError;
/// 404
pub type NotFoundError = AccountTakeoverError;
/// 429
pub type TooManyRequestsError = AccountTakeoverError;
/// 500
pub type InternalServerError = AccountTakeoverError;
/// 502
pub type BadGatewayError = AccountTakeoverError;
/// 504
pub type GatewayTimeoutError = AccountTakeoverError;

/// A rejected account request, with the failing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(deny_unknown_fields)]
#[display("{code}: {message}")]
pub struct AccountTakeoverBadRequestError {
    /// Machine-readable error code, usually `BAD_REQUEST`.
    pub code: AccountErrorCode,
    /// Human-readable explanation.
    pub message: String,
    /// Every field that failed validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<Cause>>,
}
