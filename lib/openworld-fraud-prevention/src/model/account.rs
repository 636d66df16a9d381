//! Account takeover screening and account updates.

use chrono::{DateTime, Utc};
use openworld_core::discriminated_union;
use serde::{Deserialize, Serialize};

use super::common::{Address, Telephone};

/// Recommendation of the account screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountTakeoverFraudDecision {
    /// `ACCEPT`
    Accept,
    /// `CHALLENGE`
    Challenge,
    /// `REJECT`
    Reject,
}

/// Page of the site the account transaction happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementName {
    /// `LOGIN`
    Login,
    /// `PASSWORD_RESET`
    PasswordReset,
}

/// The site the account transaction happened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountTakeoverSiteInfo {
    /// Locale as `ll-CC`, e.g. `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Name of the site, such as `expedia.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Brand the site belongs to.
    pub brand_name: String,
    /// Login or password reset page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_name: Option<PlacementName>,
}

/// Form factor and channel of an [`AccountTakeoverDeviceDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    /// `WEBSITE`
    Website,
    /// `PHONE_WEB`
    PhoneWeb,
    /// `TABLET_WEB`
    TabletWeb,
    /// `PHONE_APP`
    PhoneApp,
    /// `TABLET_APP`
    TabletApp,
}

/// The device the account transaction came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountTakeoverDeviceDetails {
    /// Channel of the device, such as `WEBSITE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Device fingerprint blob.
    pub device_box: String,
    /// IPv4 or IPv6 address.
    pub ip_address: String,
    /// `User-Agent` header sent by the device.
    pub user_agent: String,
    /// Website or app, on phone or tablet.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
}

/// Kind of an [`AccountTakeoverCustomerAccount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountTakeoverAccountType {
    /// `INDIVIDUAL`
    Individual,
    /// `BUSINESS`
    Business,
}

/// Role of the user within a business account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    /// `USER`
    User,
    /// `MANAGER`
    Manager,
    /// `ADMIN`
    Admin,
}

/// Name of an account holder.
pub type AccountTakeoverName = super::common::Name;

/// The account being accessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountTakeoverCustomerAccount {
    /// Identifier of the account on the site.
    pub user_id: String,
    /// Individual or business.
    pub account_type: AccountTakeoverAccountType,
    /// Role of the user, for business accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_role: Option<AccountRole>,
    /// Name of the account holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<AccountTakeoverName>,
    /// Login of the account.
    pub username: String,
    /// Email address of the account.
    pub email_address: String,
    /// At most 20 numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephones: Option<Vec<Telephone>>,
    /// Address of the account holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// When the account was created.
    pub registered_time: DateTime<Utc>,
    /// Whether the account is active.
    pub active_flag: bool,
    /// Loyalty program number of the holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_member_id: Option<String>,
}

/// Kind of a [`ChallengeDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeType {
    /// `CAPTCHA`
    Captcha,
    /// `TWO_FACTOR`
    TwoFactor,
}

/// Outcome of a [`ChallengeDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeStatus {
    /// `SUCCESS`
    Success,
    /// `FAILED`
    Failed,
}

/// A challenge presented during the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChallengeDetail {
    /// Whether the challenge was shown to the user.
    pub displayed_flag: bool,
    /// Captcha or two-factor.
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    /// Passed or failed.
    pub status: ChallengeStatus,
}

/// The session the transaction belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentUserSession {
    /// Identifier of the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// When the session started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<DateTime<Utc>>,
    /// Challenge presented during the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_detail: Option<ChallengeDetail>,
}

/// Discriminator of [`AccountTakeoverTransactionDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountTransactionType {
    /// `LOGIN`
    Login,
}

/// How the user authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationType {
    /// `CREDENTIALS`
    Credentials,
    /// `PASSWORD_RESET`
    PasswordReset,
    /// `SOCIAL`
    Social,
    /// `SINGLE_SIGN_ON`
    SingleSignOn,
    /// `MULTI_FACTOR_AUTHENTICATION`
    MultiFactorAuthentication,
}

/// Provider or channel refining an [`AuthenticationType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationSubType {
    /// `EMAIL`
    Email,
    /// `PHONE`
    Phone,
    /// `GOOGLE`
    Google,
    /// `FACEBOOK`
    Facebook,
    /// `APPLE`
    Apple,
}

/// Why a login failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailedLoginReason {
    /// `INVALID_CREDENTIALS`
    InvalidCredentials,
    /// `ACCOUNT_NOT_FOUND`
    AccountNotFound,
    /// `VERIFICATION_FAILED`
    VerificationFailed,
    /// `ACCOUNT_LOCKED`
    AccountLocked,
}

/// A login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginTransactionDetails {
    /// When the login was attempted.
    pub transaction_date_time: DateTime<Utc>,
    /// Identifier of the attempt on the site.
    pub transaction_id: String,
    /// Session of the attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_session: Option<CurrentUserSession>,
    /// How the user authenticated.
    pub authentication_type: AuthenticationType,
    /// Provider or channel of the authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_sub_type: Option<AuthenticationSubType>,
    /// Whether the login succeeded.
    pub successful_login_flag: bool,
    /// Why the login failed, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_login_reason: Option<FailedLoginReason>,
}

/// Transaction details whose type has no dedicated variant.
///
/// Fields beyond the shared ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTakeoverTransactionDetailsGeneric {
    /// Type of the transaction, echoed as is.
    #[serde(rename = "type")]
    pub transaction_type: AccountTransactionType,
    /// When the transaction happened.
    pub transaction_date_time: DateTime<Utc>,
    /// Identifier of the transaction on the site.
    pub transaction_id: String,
    /// Session of the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_session: Option<CurrentUserSession>,
}

discriminated_union! {
    /// The account transaction, selected by its `type`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum AccountTakeoverTransactionDetails : "type" {
        /// `LOGIN`
        Login(LoginTransactionDetails) = "LOGIN",
    }
    fallback
        /// A transaction whose type is known but whose body matches no variant.
        Generic(AccountTakeoverTransactionDetailsGeneric)
}

/// The account transaction being screened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountTransaction {
    /// Site the transaction happened on.
    pub site_info: AccountTakeoverSiteInfo,
    /// Device the transaction came from.
    pub device_details: AccountTakeoverDeviceDetails,
    /// Account being accessed.
    pub customer_account: AccountTakeoverCustomerAccount,
    /// What the user did.
    pub transaction_details: AccountTakeoverTransactionDetails,
}

/// Body of [`FraudPreventionClient::screen_account`](crate::FraudPreventionClient::screen_account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountScreenRequest {
    /// The transaction to screen.
    pub transaction: AccountTransaction,
}

/// Fraud recommendation for an account transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountScreenResponse {
    /// Identifier of the screen, to send back with the account updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_id: Option<String>,
    /// Accept, challenge or reject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<AccountTakeoverFraudDecision>,
}

/// Discriminator of [`AccountUpdateRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountUpdateType {
    /// `MULTI_FACTOR_AUTHENTICATION_UPDATE`
    MultiFactorAuthenticationUpdate,
    /// `REMEDIATION_UPDATE`
    RemediationUpdate,
}

/// Channel a one-time code was sent through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    /// `EMAIL`
    Email,
    /// `SMS`
    Sms,
    /// `VOICE`
    Voice,
    /// `PUSH`
    Push,
}

/// Outcome of a [`MultiFactorAuthenticationAttempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiFactorAuthenticationStatus {
    /// `SUCCESS`
    Success,
    /// `ABANDON`
    Abandon,
    /// `FAILED`
    Failed,
}

/// One attempt at a multi-factor challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiFactorAuthenticationAttempt {
    /// Channel the code was sent through.
    pub delivery_method: DeliveryMethod,
    /// Success, abandon or failure.
    pub status: MultiFactorAuthenticationStatus,
    /// Identifier of the attempt at the provider.
    pub reference_id: String,
    /// Provider that sent the code.
    pub provider_name: String,
    /// Number of codes entered.
    pub attempt_count: f64,
    /// When the challenge started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_start_date_time: Option<DateTime<Utc>>,
    /// When the challenge ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_end_date_time: Option<DateTime<Utc>>,
    /// Number the code was sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<Telephone>,
    /// Address the code was sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Outcome of a multi-factor authentication challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiFactorAuthenticationUpdate {
    /// The `risk_id` of the screened account transaction.
    pub risk_id: String,
    /// Between 1 and 20 attempts.
    pub multi_factor_authentication_attempts: Vec<MultiFactorAuthenticationAttempt>,
}

/// Action taken to secure an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemediationActionName {
    /// `PASSWORD_RESET`
    PasswordReset,
    /// `DISABLE_ACCOUNT`
    DisableAccount,
    /// `TERMINATE_ALL_SESSIONS`
    TerminateAllSessions,
}

/// Outcome of a [`RemediationUpdateAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemediationActionStatus {
    /// `SUCCESS`
    Success,
    /// `FAILED`
    Failed,
}

/// One remediation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemediationUpdateAction {
    /// What was done.
    pub action_name: RemediationActionName,
    /// Whether it succeeded.
    pub status: RemediationActionStatus,
    /// When it completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_end_date_time: Option<DateTime<Utc>>,
}

/// Remediation actions taken on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemediationUpdate {
    /// The `risk_id` of the screened account transaction.
    pub risk_id: String,
    /// Between 1 and 20 actions.
    pub remediation_update_actions: Vec<RemediationUpdateAction>,
}

/// An account update whose type has no dedicated variant.
///
/// Fields beyond the shared ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateRequestGeneric {
    /// Type of the update, echoed as is.
    #[serde(rename = "type")]
    pub update_type: AccountUpdateType,
    /// The `risk_id` of the screened account transaction.
    pub risk_id: String,
}

discriminated_union! {
    /// Body of [`FraudPreventionClient::notify_with_account_update`](crate::FraudPreventionClient::notify_with_account_update).
    #[derive(Debug, Clone, PartialEq)]
    pub enum AccountUpdateRequest : "type" {
        /// `MULTI_FACTOR_AUTHENTICATION_UPDATE`
        MultiFactorAuthenticationUpdate(MultiFactorAuthenticationUpdate) = "MULTI_FACTOR_AUTHENTICATION_UPDATE",
        /// `REMEDIATION_UPDATE`
        RemediationUpdate(RemediationUpdate) = "REMEDIATION_UPDATE",
    }
    fallback
        /// An update whose type is known but whose body matches no variant.
        Generic(AccountUpdateRequestGeneric)
}

/// Acknowledgement of an account update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountUpdateResponse {
    /// The `risk_id` of the updated account transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_tag_remediation_update() {
        let update = AccountUpdateRequest::RemediationUpdate(RemediationUpdate {
            risk_id: "R-7".to_owned(),
            remediation_update_actions: vec![RemediationUpdateAction {
                action_name: RemediationActionName::TerminateAllSessions,
                status: RemediationActionStatus::Success,
                update_end_date_time: None,
            }],
        });

        let json = serde_json::to_value(&update).expect("serializable");

        assert_eq!(
            json,
            json!({
                "type": "REMEDIATION_UPDATE",
                "risk_id": "R-7",
                "remediation_update_actions": [{"action_name": "TERMINATE_ALL_SESSIONS", "status": "SUCCESS"}]
            })
        );
    }

    #[test]
    fn should_decode_login_transaction_details() {
        let details: AccountTakeoverTransactionDetails = serde_json::from_value(json!({
            "type": "LOGIN",
            "transaction_date_time": "2025-05-04T10:11:12Z",
            "transaction_id": "T-1",
            "authentication_type": "CREDENTIALS",
            "successful_login_flag": false,
            "failed_login_reason": "INVALID_CREDENTIALS"
        }))
        .expect("decodable");

        let AccountTakeoverTransactionDetails::Login(login) = details else {
            panic!("expected a login, got {details:?}");
        };
        assert_eq!(login.failed_login_reason, Some(FailedLoginReason::InvalidCredentials));
        assert!(!login.successful_login_flag);
    }

    #[test]
    fn should_fall_back_when_login_lacks_authentication_type() {
        let details: AccountTakeoverTransactionDetails = serde_json::from_value(json!({
            "type": "LOGIN",
            "transaction_date_time": "2025-05-04T10:11:12Z",
            "transaction_id": "T-1",
            "successful_login_flag": true
        }))
        .expect("decodable");

        assert!(matches!(details, AccountTakeoverTransactionDetails::Generic(_)));
    }

    #[test]
    fn should_accept_challenge_decision() {
        let response: AccountScreenResponse =
            serde_json::from_value(json!({"risk_id": "1", "decision": "CHALLENGE"})).expect("decodable");

        assert_eq!(response.decision, Some(AccountTakeoverFraudDecision::Challenge));
    }
}
