//! Order purchase update notifications.
//!
//! An [`OrderPurchaseUpdateRequest`] is selected by its `type`. A
//! `REFUND_UPDATE` is itself a [`RefundUpdate`], selected by its
//! `refund_status`.

use chrono::{DateTime, Utc};
use openworld_core::discriminated_union;
use serde::{Deserialize, Serialize};

use super::common::Amount;

/// Discriminator of [`OrderPurchaseUpdateRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateType {
    /// `ORDER_UPDATE`
    OrderUpdate,
    /// `CHARGEBACK_FEEDBACK`
    ChargebackFeedback,
    /// `INSULT_FEEDBACK`
    InsultFeedback,
    /// `REFUND_UPDATE`
    RefundUpdate,
    /// `PAYMENT_UPDATE`
    PaymentUpdate,
}

/// New status of an updated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// `COMPLETED`
    Completed,
    /// `CHANGE_COMPLETED`
    ChangeCompleted,
    /// `CANCELLED`
    Cancelled,
    /// `FAILED`
    Failed,
    /// `CHANGE_FAILED`
    ChangeFailed,
}

/// Discriminator of [`RefundUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    /// `ISSUED`
    Issued,
    /// `SETTLED`
    Settled,
}

/// Stage of a chargeback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargebackStatus {
    /// `RECEIVED`
    Received,
    /// `REVERSAL`
    Reversal,
}

/// Whether a chargeback was raised for fraud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargebackReason {
    /// `FRAUD`
    Fraud,
    /// `NON_FRAUD`
    NonFraud,
}

/// Why an order was cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CancellationReason {
    /// Code of the main reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_reason_code: Option<String>,
    /// Code refining the main reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_reason_code: Option<String>,
    /// Description of the main reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_reason_description: Option<String>,
    /// Description of the refining reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_reason_description: Option<String>,
}

/// Change of status of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderUpdate {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// New status of the order.
    pub order_status: OrderStatus,
    /// ARN of the payment, once settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquirer_reference_number: Option<String>,
    /// Why the order was cancelled, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<CancellationReason>,
}

/// A chargeback raised on the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChargebackDetail {
    /// Received or reversed.
    pub chargeback_status: ChargebackStatus,
    /// Fraud or not.
    pub chargeback_reason: ChargebackReason,
    /// Amount charged back.
    pub chargeback_amount: Amount,
    /// Reason code of the issuing bank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_reason_code: Option<String>,
    /// When the chargeback was reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chargeback_reported_date_time: Option<DateTime<Utc>>,
}

/// Report of a chargeback on a screened order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChargebackFeedback {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// The chargeback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chargeback_detail: Option<ChargebackDetail>,
}

/// When a wrongful rejection was reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsultDetail {
    /// When the customer complained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insult_reported_date_time: Option<DateTime<Utc>>,
}

/// Report that a legitimate customer was wrongly rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsultFeedback {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// When it was reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insult_detail: Option<InsultDetail>,
}

/// A refund issued to the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuedRefundUpdateDetails {
    /// When the refund was issued.
    pub refund_issued_date_time: DateTime<Utc>,
    /// Amount refunded.
    pub refund_issued_amount: Amount,
}

/// A refund settled by the acquirer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettledRefundUpdateDetails {
    /// When the refund was settled.
    pub refund_settlement_date_time: DateTime<Utc>,
    /// When the funds reached the customer.
    pub refund_deposit_date_time: DateTime<Utc>,
    /// ARN of the refund.
    pub acquirer_reference_number: String,
    /// Identifier of the settlement batch.
    pub settlement_id: String,
    /// Amount settled.
    pub refund_settled_amount: Amount,
}

/// Refund of an order, `refund_status: ISSUED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuedRefundUpdate {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// The issued refund.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_details: Option<IssuedRefundUpdateDetails>,
}

/// Refund of an order, `refund_status: SETTLED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettledRefundUpdate {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// The settled refund.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_details: Option<SettledRefundUpdateDetails>,
}

/// A refund update whose status has no dedicated variant.
///
/// Fields beyond the shared ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundUpdateGeneric {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// Status of the refund, echoed as is.
    pub refund_status: RefundStatus,
}

discriminated_union! {
    /// Refund of an order, selected by its `refund_status`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RefundUpdate : "refund_status" {
        /// `ISSUED`
        Issued(IssuedRefundUpdate) = "ISSUED",
        /// `SETTLED`
        Settled(SettledRefundUpdate) = "SETTLED",
    }
    fallback
        /// A refund whose status is known but whose body matches no variant.
        Generic(RefundUpdateGeneric)
}

/// The payment of an order was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentUpdate {
    /// The `risk_id` of the screened order.
    pub risk_id: String,
    /// Order code of the merchant at the processor.
    pub merchant_order_code: String,
}

/// An update whose type has no dedicated variant.
///
/// Fields beyond the shared ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPurchaseUpdateRequestGeneric {
    /// Type of the update, echoed as is.
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    /// The `risk_id` of the screened order.
    pub risk_id: String,
}

discriminated_union! {
    /// Body of [`FraudPreventionClient::notify_with_order_update`](crate::FraudPreventionClient::notify_with_order_update).
    #[derive(Debug, Clone, PartialEq)]
    pub enum OrderPurchaseUpdateRequest : "type" {
        /// `ORDER_UPDATE`
        OrderUpdate(OrderUpdate) = "ORDER_UPDATE",
        /// `CHARGEBACK_FEEDBACK`
        ChargebackFeedback(ChargebackFeedback) = "CHARGEBACK_FEEDBACK",
        /// `INSULT_FEEDBACK`
        InsultFeedback(InsultFeedback) = "INSULT_FEEDBACK",
        /// `REFUND_UPDATE`
        RefundUpdate(RefundUpdate) = "REFUND_UPDATE",
        /// `PAYMENT_UPDATE`
        PaymentUpdate(PaymentUpdate) = "PAYMENT_UPDATE",
    }
    fallback
        /// An update whose type is known but whose body matches no variant.
        Generic(OrderPurchaseUpdateRequestGeneric)
}

impl OrderPurchaseUpdateRequest {
    /// The `risk_id` of the screened order.
    pub fn risk_id(&self) -> &str {
        match self {
            Self::OrderUpdate(update) => &update.risk_id,
            Self::ChargebackFeedback(update) => &update.risk_id,
            Self::InsultFeedback(update) => &update.risk_id,
            Self::RefundUpdate(RefundUpdate::Issued(update)) => &update.risk_id,
            Self::RefundUpdate(RefundUpdate::Settled(update)) => &update.risk_id,
            Self::RefundUpdate(RefundUpdate::Generic(update)) => &update.risk_id,
            Self::PaymentUpdate(update) => &update.risk_id,
            Self::Generic(update) => &update.risk_id,
        }
    }
}

/// Acknowledgement of an order purchase update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPurchaseUpdateResponse {
    /// The `risk_id` of the updated order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_id: Option<String>,
}
