use http::StatusCode;
use openworld_core::ErrorTable;

use crate::model::{
    AccountTakeoverBadRequestError, AccountTakeoverUnauthorizedError, AccountUpdateNotFoundError,
    BadGatewayError, BadRequestError, ForbiddenError, GatewayTimeoutError, InternalServerError,
    NotFoundError, OrderPurchaseUpdateNotFoundError, RetryableOrderPurchaseScreenFailure,
    RetryableOrderPurchaseUpdateFailure, ServiceUnavailableError, TooManyRequestsError,
    UnauthorizedError,
};

/// Typed errors of [`FraudPreventionClient::screen`](crate::FraudPreventionClient::screen).
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ScreenError {
    /// 400
    #[display("bad request: {_0}")]
    BadRequest(BadRequestError),
    /// 401
    #[display("unauthorized: {_0}")]
    Unauthorized(UnauthorizedError),
    /// 403
    #[display("forbidden: {_0}")]
    Forbidden(ForbiddenError),
    /// 404
    #[display("not found: {_0}")]
    NotFound(NotFoundError),
    /// 429
    #[display("too many requests: {_0}")]
    TooManyRequests(TooManyRequestsError),
    /// 500
    #[display("internal server error: {_0}")]
    InternalServer(InternalServerError),
    /// 502
    #[display("bad gateway: {_0}")]
    BadGateway(BadGatewayError),
    /// 503, the screen may be retried.
    #[display("retryable screen failure: {_0}")]
    RetryableOrderPurchaseScreenFailure(RetryableOrderPurchaseScreenFailure),
    /// 504
    #[display("gateway timeout: {_0}")]
    GatewayTimeout(GatewayTimeoutError),
}

impl ScreenError {
    pub(crate) fn table() -> ErrorTable<Self> {
        ErrorTable::new()
            .with(StatusCode::BAD_REQUEST, Self::BadRequest)
            .with(StatusCode::UNAUTHORIZED, Self::Unauthorized)
            .with(StatusCode::FORBIDDEN, Self::Forbidden)
            .with(StatusCode::NOT_FOUND, Self::NotFound)
            .with(StatusCode::TOO_MANY_REQUESTS, Self::TooManyRequests)
            .with(StatusCode::INTERNAL_SERVER_ERROR, Self::InternalServer)
            .with(StatusCode::BAD_GATEWAY, Self::BadGateway)
            .with(StatusCode::SERVICE_UNAVAILABLE, Self::RetryableOrderPurchaseScreenFailure)
            .with(StatusCode::GATEWAY_TIMEOUT, Self::GatewayTimeout)
    }

    /// Whether the service asked for the screen to be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RetryableOrderPurchaseScreenFailure(_))
    }
}

/// Typed errors of [`FraudPreventionClient::notify_with_order_update`](crate::FraudPreventionClient::notify_with_order_update).
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum OrderUpdateError {
    /// 400, the update failed validation.
    #[display("bad request: {_0}")]
    BadRequest(BadRequestError),
    /// 401
    #[display("unauthorized: {_0}")]
    Unauthorized(UnauthorizedError),
    /// 403
    #[display("forbidden: {_0}")]
    Forbidden(ForbiddenError),
    /// 404, no order matches the `risk_id`.
    #[display("order purchase update not found: {_0}")]
    OrderPurchaseUpdateNotFound(OrderPurchaseUpdateNotFoundError),
    /// 429
    #[display("too many requests: {_0}")]
    TooManyRequests(TooManyRequestsError),
    /// 500
    #[display("internal server error: {_0}")]
    InternalServer(InternalServerError),
    /// 502
    #[display("bad gateway: {_0}")]
    BadGateway(BadGatewayError),
    /// 503, the update may be retried.
    #[display("retryable update failure: {_0}")]
    RetryableOrderPurchaseUpdateFailure(RetryableOrderPurchaseUpdateFailure),
    /// 504
    #[display("gateway timeout: {_0}")]
    GatewayTimeout(GatewayTimeoutError),
}

impl OrderUpdateError {
    pub(crate) fn table() -> ErrorTable<Self> {
        ErrorTable::new()
            .with(StatusCode::BAD_REQUEST, Self::BadRequest)
            .with(StatusCode::UNAUTHORIZED, Self::Unauthorized)
            .with(StatusCode::FORBIDDEN, Self::Forbidden)
            .with(StatusCode::NOT_FOUND, Self::OrderPurchaseUpdateNotFound)
            .with(StatusCode::TOO_MANY_REQUESTS, Self::TooManyRequests)
            .with(StatusCode::INTERNAL_SERVER_ERROR, Self::InternalServer)
            .with(StatusCode::BAD_GATEWAY, Self::BadGateway)
            .with(StatusCode::SERVICE_UNAVAILABLE, Self::RetryableOrderPurchaseUpdateFailure)
            .with(StatusCode::GATEWAY_TIMEOUT, Self::GatewayTimeout)
    }

    /// Whether the service asked for the update to be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RetryableOrderPurchaseUpdateFailure(_))
    }
}

/// Typed errors of [`FraudPreventionClient::screen_account`](crate::FraudPreventionClient::screen_account).
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum AccountScreenError {
    /// 400, the screen failed validation.
    #[display("bad request: {_0}")]
    AccountTakeoverBadRequest(AccountTakeoverBadRequestError),
    /// 401
    #[display("unauthorized: {_0}")]
    AccountTakeoverUnauthorized(AccountTakeoverUnauthorizedError),
    /// 403
    #[display("forbidden: {_0}")]
    Forbidden(ForbiddenError),
    /// 404
    #[display("not found: {_0}")]
    NotFound(NotFoundError),
    /// 429
    #[display("too many requests: {_0}")]
    TooManyRequests(TooManyRequestsError),
    /// 500
    #[display("internal server error: {_0}")]
    InternalServer(InternalServerError),
    /// 502
    #[display("bad gateway: {_0}")]
    BadGateway(BadGatewayError),
    /// 503, the screen may be retried later.
    #[display("service unavailable: {_0}")]
    ServiceUnavailable(ServiceUnavailableError),
    /// 504
    #[display("gateway timeout: {_0}")]
    GatewayTimeout(GatewayTimeoutError),
}

impl AccountScreenError {
    pub(crate) fn table() -> ErrorTable<Self> {
        ErrorTable::new()
            .with(StatusCode::BAD_REQUEST, Self::AccountTakeoverBadRequest)
            .with(StatusCode::UNAUTHORIZED, Self::AccountTakeoverUnauthorized)
            .with(StatusCode::FORBIDDEN, Self::Forbidden)
            .with(StatusCode::NOT_FOUND, Self::NotFound)
            .with(StatusCode::TOO_MANY_REQUESTS, Self::TooManyRequests)
            .with(StatusCode::INTERNAL_SERVER_ERROR, Self::InternalServer)
            .with(StatusCode::BAD_GATEWAY, Self::BadGateway)
            .with(StatusCode::SERVICE_UNAVAILABLE, Self::ServiceUnavailable)
            .with(StatusCode::GATEWAY_TIMEOUT, Self::GatewayTimeout)
    }
}

/// Typed errors of [`FraudPreventionClient::notify_with_account_update`](crate::FraudPreventionClient::notify_with_account_update).
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum AccountUpdateError {
    /// 400, the update failed validation.
    #[display("bad request: {_0}")]
    AccountTakeoverBadRequest(AccountTakeoverBadRequestError),
    /// 401
    #[display("unauthorized: {_0}")]
    AccountTakeoverUnauthorized(AccountTakeoverUnauthorizedError),
    /// 403
    #[display("forbidden: {_0}")]
    Forbidden(ForbiddenError),
    /// 404, no account screen matches the `risk_id`.
    #[display("account update not found: {_0}")]
    AccountUpdateNotFound(AccountUpdateNotFoundError),
    /// 429
    #[display("too many requests: {_0}")]
    TooManyRequests(TooManyRequestsError),
    /// 500
    #[display("internal server error: {_0}")]
    InternalServer(InternalServerError),
    /// 502
    #[display("bad gateway: {_0}")]
    BadGateway(BadGatewayError),
    /// 503, the update may be retried later.
    #[display("service unavailable: {_0}")]
    ServiceUnavailable(ServiceUnavailableError),
    /// 504
    #[display("gateway timeout: {_0}")]
    GatewayTimeout(GatewayTimeoutError),
}

impl AccountUpdateError {
    pub(crate) fn table() -> ErrorTable<Self> {
        ErrorTable::new()
            .with(StatusCode::BAD_REQUEST, Self::AccountTakeoverBadRequest)
            .with(StatusCode::UNAUTHORIZED, Self::AccountTakeoverUnauthorized)
            .with(StatusCode::FORBIDDEN, Self::Forbidden)
            .with(StatusCode::NOT_FOUND, Self::AccountUpdateNotFound)
            .with(StatusCode::TOO_MANY_REQUESTS, Self::TooManyRequests)
            .with(StatusCode::INTERNAL_SERVER_ERROR, Self::InternalServer)
            .with(StatusCode::BAD_GATEWAY, Self::BadGateway)
            .with(StatusCode::SERVICE_UNAVAILABLE, Self::ServiceUnavailable)
            .with(StatusCode::GATEWAY_TIMEOUT, Self::GatewayTimeout)
    }
}
