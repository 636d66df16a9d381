#![allow(dead_code)]

use anyhow::Context;
use chrono::{DateTime, Utc};
use openworld_core::Credentials;
use openworld_fraud_prevention::FraudPreventionClient;
use openworld_fraud_prevention::model::{
    AccountScreenRequest, AccountTakeoverAccountType, AccountTakeoverCustomerAccount,
    AccountTakeoverDeviceDetails, AccountTakeoverSiteInfo, AccountTakeoverTransactionDetails,
    AccountTransaction, AccountType, Address, Amount, AuthenticationType, Brand, CardType, CreditCard,
    CurrentOrderStatus, CustomerAccount, DeviceDetails, GiftCard, Hotel, InventorySource,
    LoginTransactionDetails, Name, OrderPurchaseScreenRequest, OrderPurchaseTransaction,
    OrderType, Payment, PaymentDetails, SiteInfo, Telephone, TransactionDetails, TravelProduct,
    TravelProductDetails, Traveler,
};
use rstest::fixture;
use serde_json::{Value, json};
use tracing::info;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const SCREEN_PATH: &str = "/fraud-prevention/v2/order/purchase/screen";
pub const ORDER_UPDATE_PATH: &str = "/fraud-prevention/v2/order/purchase/update";
pub const ACCOUNT_SCREEN_PATH: &str = "/fraud-prevention/v2/account/screen";
pub const ACCOUNT_UPDATE_PATH: &str = "/fraud-prevention/v2/account/update";

pub const CARD_NUMBER: &str = "4111111111111111";

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A mocked Fraud Prevention API and a client pointed at it.
pub struct TestApi {
    pub server: MockServer,
    pub client: FraudPreventionClient,
}

impl TestApi {
    pub async fn start() -> anyhow::Result<Self> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fraud-token",
                "expires_in": 3600,
                "token_type": "bearer"
            })))
            .mount(&server)
            .await;

        let config = FraudPreventionClient::config_builder(Credentials::new("key", "secret")?)
            .with_api_endpoint(server.uri())
            .with_auth_endpoint(format!("{}/token", server.uri()))
            .build()?;
        let client = FraudPreventionClient::from_config(config)?;

        Ok(Self { server, client })
    }

    pub async fn respond(&self, endpoint: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received on `endpoint`, oldest first.
    pub async fn received(&self, endpoint: &str) -> anyhow::Result<Vec<Request>> {
        let requests = self
            .server
            .received_requests()
            .await
            .context("request recording is enabled")?;
        Ok(requests
            .into_iter()
            .filter(|request| request.url.path() == endpoint)
            .collect())
    }

    /// The only JSON body received on `endpoint`.
    pub async fn received_body(&self, endpoint: &str) -> anyhow::Result<Value> {
        let requests = self.received(endpoint).await?;
        let [request] = requests.as_slice() else {
            anyhow::bail!("expected one request on {endpoint}, got {}", requests.len());
        };
        Ok(serde_json::from_slice(&request.body)?)
    }
}

#[fixture]
pub async fn api() -> TestApi {
    init_tracing();
    match TestApi::start().await {
        Ok(api) => api,
        Err(error) => {
            panic!("fail to start test API: {error:?}");
        }
    }
}

pub fn date_time(value: &str) -> DateTime<Utc> {
    match value.parse() {
        Ok(value) => value,
        Err(error) => panic!("invalid date time {value}: {error}"),
    }
}

fn billing_details(brand: Brand) -> PaymentDetails {
    PaymentDetails::new(
        brand,
        Name::new("Ada", "Lovelace"),
        Address {
            address_line1: Some("12 St James's Square".to_owned()),
            city: Some("London".to_owned()),
            country_code: Some("GBR".to_owned()),
            ..Address::default()
        },
        "ada@example.com",
    )
}

pub fn credit_card() -> Payment {
    Payment::CreditCard(CreditCard {
        details: billing_details(Brand::Visa),
        card_type: CardType::Visa,
        card_number: CARD_NUMBER.to_owned(),
        expiry_date: date_time("2030-12-01T00:00:00Z"),
        electronic_commerce_indicator: None,
        virtual_credit_card_flag: Some(false),
        wallet_type: None,
        card_avs_response: Some("Y".to_owned()),
        card_cvv_response: Some("M".to_owned()),
        telephones: vec![Telephone::new("44", "20", "79460000")],
        merchant_order_code: None,
        card_authentication_failure_count: None,
    })
}

pub fn gift_card() -> Payment {
    Payment::GiftCard(GiftCard {
        details: billing_details(Brand::GiftCard),
        card_number: "ABCD1234".to_owned(),
        card_holder_name: "Ada Lovelace".to_owned(),
        pin: "8642".to_owned(),
    })
}

pub fn order_screen_request(payments: Vec<Payment>) -> OrderPurchaseScreenRequest {
    let hotel = TravelProduct::Hotel(Hotel {
        details: TravelProductDetails {
            travelers_references: Some(vec!["T1".to_owned()]),
            ..TravelProductDetails::new(
                Amount::new(250.0, "USD"),
                "Merchant",
                InventorySource::Merchant,
            )
        },
        hotel_id: "8883333999221".to_owned(),
        price_withheld: None,
        hotel_name: "Hotel Expedia".to_owned(),
        room_count: Some(1),
        address: Address {
            city: Some("Chicago".to_owned()),
            country_code: Some("USA".to_owned()),
            ..Address::default()
        },
        checkin_time: date_time("2025-07-01T15:00:00Z"),
        checkout_time: date_time("2025-07-03T11:00:00Z"),
    });

    OrderPurchaseScreenRequest {
        transaction: OrderPurchaseTransaction {
            site_info: SiteInfo {
                country_code: "USA".to_owned(),
                agent_assisted: false,
            },
            device_details: DeviceDetails {
                source: None,
                device_box: None,
                ip_address: "192.168.32.48".to_owned(),
            },
            customer_account: CustomerAccount {
                user_id: None,
                account_type: AccountType::Standard,
                name: Name::new("Ada", "Lovelace"),
                email_address: "ada@example.com".to_owned(),
                telephones: None,
                address: None,
                registered_time: None,
            },
            transaction_details: TransactionDetails {
                order_id: "1000000234".to_owned(),
                current_order_status: CurrentOrderStatus::InProgress,
                order_type: OrderType::Create,
                travel_products: vec![hotel],
                travelers: vec![Traveler {
                    traveler_id: Some("T1".to_owned()),
                    ..Traveler::new(Name::new("Ada", "Lovelace"), true)
                }],
                payments: Some(payments),
            },
        },
    }
}

pub fn account_screen_request() -> AccountScreenRequest {
    AccountScreenRequest {
        transaction: AccountTransaction {
            site_info: AccountTakeoverSiteInfo {
                locale: Some("en-US".to_owned()),
                name: Some("expedia.com".to_owned()),
                brand_name: "Expedia".to_owned(),
                placement_name: None,
            },
            device_details: AccountTakeoverDeviceDetails {
                source: None,
                device_box: "device-box".to_owned(),
                ip_address: "192.168.32.48".to_owned(),
                user_agent: "Mozilla/5.0".to_owned(),
                device_type: None,
            },
            customer_account: AccountTakeoverCustomerAccount {
                user_id: "U-1".to_owned(),
                account_type: AccountTakeoverAccountType::Individual,
                account_role: None,
                name: None,
                username: "ada".to_owned(),
                email_address: "ada@example.com".to_owned(),
                telephones: None,
                address: None,
                registered_time: date_time("2020-01-01T00:00:00Z"),
                active_flag: true,
                loyalty_member_id: None,
            },
            transaction_details: AccountTakeoverTransactionDetails::Login(LoginTransactionDetails {
                transaction_date_time: date_time("2025-05-04T10:11:12Z"),
                transaction_id: "T-1".to_owned(),
                current_user_session: None,
                authentication_type: AuthenticationType::Credentials,
                authentication_sub_type: None,
                successful_login_flag: true,
                failed_login_reason: None,
            }),
        },
    }
}
