use chrono::{DateTime, Utc};
use openworld_core::discriminated_union;
use serde::{Deserialize, Serialize};

use super::common::{Address, Amount, Name, Telephone};

/// Brand of a payment instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Brand {
    /// `AMERICAN_EXPRESS`
    AmericanExpress,
    /// `DINERS_CLUB_INTERNATIONAL`
    DinersClubInternational,
    /// `BC_CARD`
    BcCard,
    /// `DISCOVER`
    Discover,
    /// `JCB`
    Jcb,
    /// `MASTER_CARD`
    MasterCard,
    /// `MAESTRO`
    Maestro,
    /// `POSTEPAY_MASTERCARD`
    PostepayMastercard,
    /// `SOLO`
    Solo,
    /// `SWITCH`
    Switch,
    /// `CHINA_UNION_PAY`
    ChinaUnionPay,
    /// `VISA`
    Visa,
    /// `VISA_DELTA`
    VisaDelta,
    /// `VISA_ELECTRON`
    VisaElectron,
    /// `CARTA_SI`
    CartaSi,
    /// `CARTE_BLEUE`
    CarteBleue,
    /// `VISA_DANKORT`
    VisaDankort,
    /// `POSTEPAY_VISA_ELECTRON`
    PostepayVisaElectron,
    /// `PAYPAL`
    Paypal,
    /// `EXPEDIA_REWARDS`
    ExpediaRewards,
    /// `AMEX_POINTS`
    AmexPoints,
    /// `BANK_OF_AMERICA_REWARDS`
    BankOfAmericaRewards,
    /// `DISCOVER_POINTS`
    DiscoverPoints,
    /// `MASTER_CARD_POINTS`
    MasterCardPoints,
    /// `CITI_THANK_YOU_POINTS`
    CitiThankYouPoints,
    /// `MERRILL_LYNCH_REWARDS`
    MerrillLynchRewards,
    /// `WELLS_FARGO_POINTS`
    WellsFargoPoints,
    /// `DELTA_SKY_MILES`
    DeltaSkyMiles,
    /// `UNITED_POINTS`
    UnitedPoints,
    /// `DISCOVER_MILES`
    DiscoverMiles,
    /// `ALASKA_MILES`
    AlaskaMiles,
    /// `RBC_REWARDS`
    RbcRewards,
    /// `BILT_REWARDS`
    BiltRewards,
    /// `ORBUCKS`
    Orbucks,
    /// `CHEAP_CASH`
    CheapCash,
    /// `BONUS_PLUS`
    BonusPlus,
    /// `ULTIMATE_REWARDS`
    UltimateRewards,
    /// `UATP`
    Uatp,
    /// `UATP_SUPPLY`
    UatpSupply,
    /// `AIR_PLUS`
    AirPlus,
    /// `US_PASS_PLUS`
    UsPassPlus,
    /// `GIFT_CARD`
    GiftCard,
    /// `IBP`
    Ibp,
    /// `LOCAL_DEBIT_CARD`
    LocalDebitCard,
    /// `SOFORT`
    Sofort,
    /// `YANDEX`
    Yandex,
    /// `WEB_MONEY`
    WebMoney,
    /// `QIWI`
    Qiwi,
    /// `BITCOIN`
    Bitcoin,
    /// `ELV`
    Elv,
    /// `INTER_COMPANY`
    InterCompany,
}

/// Discriminator of [`Payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// `CREDIT_CARD`
    CreditCard,
    /// `PAYPAL`
    Paypal,
    /// `POINTS`
    Points,
    /// `GIFT_CARD`
    GiftCard,
    /// `INTERNET_BANK_PAYMENT`
    InternetBankPayment,
    /// `DIRECT_DEBIT`
    DirectDebit,
}

/// Why a payment is taken: in full, as a deposit or on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentReason {
    /// `FULL`
    Full,
    /// `DEPOSIT`
    Deposit,
    /// `SCHEDULED`
    Scheduled,
    /// `SUBSEQUENT`
    Subsequent,
    /// `DEFERRED`
    Deferred,
}

/// Network of a [`CreditCard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    /// `AMERICAN_EXPRESS`
    AmericanExpress,
    /// `DINERS_CLUB`
    DinersClub,
    /// `DISCOVER`
    Discover,
    /// `JCB`
    Jcb,
    /// `MASTER_CARD`
    MasterCard,
    /// `SOLO`
    Solo,
    /// `SWITCH`
    Switch,
    /// `MAESTRO`
    Maestro,
    /// `CHINA_UNION_PAY`
    ChinaUnionPay,
    /// `VISA`
    Visa,
}

/// How a card was verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationType {
    /// `CVV`
    #[serde(rename = "CVV")]
    Cvv,
    /// `3DS`
    #[serde(rename = "3DS")]
    ThreeDs,
}

/// Outcome status of a [`PaymentOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// `COMPLETED`
    Completed,
    /// `FAILED`
    Failed,
}

/// 3-D Secure hints of a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentThreeDsCriteria {
    /// Whether 3-D Secure authentication is likely to be triggered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probable_flag: Option<bool>,
    /// Transaction model agreed with the acquirer for 3-D Secure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_model: Option<String>,
}

/// Result of a [`PaymentOperation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentOutcome {
    /// Completed or failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Response code of the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Response description of the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One operation performed on a payment: authorization, capture, refund...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentOperation {
    /// Identifier of the operation at the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Amount of the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Result of the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PaymentOutcome>,
}

/// Authorization of a payment.
pub type Authorize = PaymentOperation;
/// Reversal of an earlier authorization.
pub type AuthorizeReversal = PaymentOperation;
/// Capture of authorized funds.
pub type Capture = PaymentOperation;
/// Refund of captured funds.
pub type Refund = PaymentOperation;

/// A verification of the payment instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Verify {
    /// Identifier of the verification at the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Amount verified, usually zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Result of the verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PaymentOutcome>,
    /// CVV or 3-D Secure.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub verification_type: Option<VerificationType>,
}

/// Operations performed on a payment so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operations {
    /// Verification of the instrument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<Verify>,
    /// Authorization of the funds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize: Option<Authorize>,
    /// Reversal of the authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize_reversal: Option<AuthorizeReversal>,
    /// Capture of the funds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Capture>,
    /// At most 20 refunds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunds: Option<Vec<Refund>>,
}

/// Fields shared by every payment method.
///
/// Flattened into each [`Payment`] variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Brand of the instrument.
    pub brand: Brand,
    /// Why this payment is taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<PaymentReason>,
    /// Name of the person billed.
    pub billing_name: Name,
    /// Billing address of the instrument.
    pub billing_address: Address,
    /// Email address of the person billed.
    pub billing_email_address: String,
    /// Amount authorized so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_amount: Option<Amount>,
    /// Amount verified so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_amount: Option<Amount>,
    /// 3-D Secure hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_digits_secure_criteria: Option<PaymentThreeDsCriteria>,
    /// Operations performed on the payment so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Operations>,
}

impl PaymentDetails {
    /// Details with only the mandatory billing information.
    pub fn new(
        brand: Brand,
        billing_name: Name,
        billing_address: Address,
        billing_email_address: impl Into<String>,
    ) -> Self {
        Self {
            brand,
            reason: None,
            billing_name,
            billing_address,
            billing_email_address: billing_email_address.into(),
            authorized_amount: None,
            verified_amount: None,
            three_digits_secure_criteria: None,
            operations: None,
        }
    }
}

/// Payment by credit card.
///
/// `card_number`, `card_cvv_response` and `card_avs_response` are masked
/// in the logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Card network.
    pub card_type: CardType,
    /// Full card number, without separators.
    pub card_number: String,
    /// Expiry date of the card.
    pub expiry_date: DateTime<Utc>,
    /// ECI returned by the 3-D Secure authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electronic_commerce_indicator: Option<String>,
    /// Whether the card is a virtual card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_credit_card_flag: Option<bool>,
    /// Digital wallet the card was provided through, such as `APPLE_PAY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<String>,
    /// Address verification result of the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_avs_response: Option<String>,
    /// CVV verification result of the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_cvv_response: Option<String>,
    /// Between 1 and 20 numbers.
    pub telephones: Vec<Telephone>,
    /// Order code of the merchant at the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_order_code: Option<String>,
    /// Failed authentication attempts before this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_authentication_failure_count: Option<u32>,
}

/// Payment through PayPal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayPal {
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// PayPal identifier of the payer.
    pub payer_id: String,
    /// PayPal identifier of the transaction.
    pub transaction_id: String,
    /// Order code of the merchant at PayPal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_order_code: Option<String>,
}

/// Payment with loyalty points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Points {
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Loyalty account the points are taken from.
    pub account_id: String,
}

/// Payment by gift card. The `pin` is masked in the logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Gift card number.
    pub card_number: String,
    /// Name printed on the card.
    pub card_holder_name: String,
    /// PIN that unlocks the card.
    pub pin: String,
}

/// Payment redirected to the customer's online bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternetBankPayment {
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Identifier of the bank.
    pub bank_id: String,
    /// Branch of the bank.
    pub bank_branch_code: String,
    /// Contact numbers of the payer.
    pub telephones: Vec<Telephone>,
}

/// Payment by direct debit. The `account_number` is masked in the logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectDebit {
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Routing number of the bank.
    pub routing_number: String,
    /// Bank account debited.
    pub account_number: String,
    /// Contact numbers of the payer.
    pub telephones: Vec<Telephone>,
}

/// A payment whose method has no dedicated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentGeneric {
    /// Method of the payment, echoed as is.
    pub method: PaymentMethod,
    /// Billing information.
    #[serde(flatten)]
    pub details: PaymentDetails,
}

discriminated_union! {
    /// A payment of the order, selected by its `method`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Payment : "method" {
        /// `CREDIT_CARD`
        CreditCard(CreditCard) = "CREDIT_CARD",
        /// `PAYPAL`
        PayPal(PayPal) = "PAYPAL",
        /// `POINTS`
        Points(Points) = "POINTS",
        /// `GIFT_CARD`
        GiftCard(GiftCard) = "GIFT_CARD",
        /// `INTERNET_BANK_PAYMENT`
        InternetBankPayment(InternetBankPayment) = "INTERNET_BANK_PAYMENT",
        /// `DIRECT_DEBIT`
        DirectDebit(DirectDebit) = "DIRECT_DEBIT",
    }
    fallback
        /// A payment whose `method` is known but whose body matches no variant.
        Generic(PaymentGeneric)
}

impl Payment {
    /// The details shared by every method.
    pub fn details(&self) -> &PaymentDetails {
        match self {
            Self::CreditCard(payment) => &payment.details,
            Self::PayPal(payment) => &payment.details,
            Self::Points(payment) => &payment.details,
            Self::GiftCard(payment) => &payment.details,
            Self::InternetBankPayment(payment) => &payment.details,
            Self::DirectDebit(payment) => &payment.details,
            Self::Generic(payment) => &payment.details,
        }
    }
}
