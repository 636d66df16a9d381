use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Address, Name, Telephone};
use super::payment::Payment;
use super::travel::TravelProduct;

/// Recommendation of the order purchase screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudDecision {
    /// `ACCEPT`
    Accept,
    /// `REVIEW`
    Review,
    /// `REJECT`
    Reject,
}

/// Status of the order when it is screened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrentOrderStatus {
    /// `IN_PROGRESS`
    InProgress,
    /// `COMPLETED`
    Completed,
}

/// Whether the order is new or changes an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// `CREATE`
    Create,
    /// `CHANGE`
    Change,
}

/// Kind of a [`CustomerAccount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// `GUEST`
    Guest,
    /// `STANDARD`
    Standard,
}

/// The site the order was placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// ISO 3166-1 alpha-3 country code.
    pub country_code: String,
    /// Whether a call center agent placed the order.
    pub agent_assisted: bool,
}

/// The device the order was placed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceDetails {
    /// Channel of the device, such as `WEBSITE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Device fingerprint blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_box: Option<String>,
    /// IPv4 or IPv6 address.
    pub ip_address: String,
}

/// The customer placing the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerAccount {
    /// Identifier of the customer on the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Guest or registered account.
    pub account_type: AccountType,
    /// Name of the account holder.
    pub name: Name,
    /// Email address of the account.
    pub email_address: String,
    /// Contact numbers of the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephones: Option<Vec<Telephone>>,
    /// Address of the account holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// When the account was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_time: Option<DateTime<Utc>>,
}

/// A person traveling on the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Traveler {
    /// Name of the traveler.
    pub traveler_name: Name,
    /// Email address of the traveler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Contact numbers of the traveler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephones: Option<Vec<Telephone>>,
    /// Whether this traveler is the primary one of the order.
    pub primary: bool,
    /// Age of the traveler at the time of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    /// ISO 3166-1 alpha-3 code of the traveler's citizenship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizenship_country_code: Option<String>,
    /// Identifier referenced by [`TravelProductDetails::travelers_references`](super::TravelProductDetails::travelers_references).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traveler_id: Option<String>,
}

impl Traveler {
    /// A traveler with only a name.
    pub fn new(traveler_name: Name, primary: bool) -> Self {
        Self {
            traveler_name,
            email_address: None,
            telephones: None,
            primary,
            age: None,
            birth_date: None,
            citizenship_country_code: None,
            traveler_id: None,
        }
    }
}

/// What is being purchased, by whom, and how it is paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionDetails {
    /// Identifier of the order on the site.
    pub order_id: String,
    /// Status of the order when it is screened.
    pub current_order_status: CurrentOrderStatus,
    /// New order or change of an existing one.
    pub order_type: OrderType,
    /// Between 1 and 20 products.
    pub travel_products: Vec<TravelProduct>,
    /// Between 1 and 30 travelers.
    pub travelers: Vec<Traveler>,
    /// Between 1 and 30 payments, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<Payment>>,
}

/// The order purchase being screened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPurchaseTransaction {
    /// Site the order was placed on.
    pub site_info: SiteInfo,
    /// Device the order was placed from.
    pub device_details: DeviceDetails,
    /// Customer placing the order.
    pub customer_account: CustomerAccount,
    /// Products, travelers and payments.
    pub transaction_details: TransactionDetails,
}

/// Body of [`FraudPreventionClient::screen`](crate::FraudPreventionClient::screen).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPurchaseScreenRequest {
    /// The order to screen.
    pub transaction: OrderPurchaseTransaction,
}

/// Fraud recommendation for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPurchaseScreenResponse {
    /// Identifier of the screen, to send back with the order updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_id: Option<String>,
    /// Accept, review or reject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<FraudDecision>,
}
