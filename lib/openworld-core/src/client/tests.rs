use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert2::{check, let_assert};
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::*;
use crate::auth::OAuth2AuthClient;
use crate::config::Credentials;
use crate::model::ErrorCode;

const SCREEN_PATH: &str = "/fraud-prevention/v2/order/purchase/screen";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreenResponse {
    risk_id: String,
    decision: String,
}

#[derive(Debug, Serialize)]
struct ScreenRequest {
    transaction_id: String,
    note: Option<String>,
    payments: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display)]
enum ScreenError {
    #[display("bad request: {}", _0.message)]
    BadRequest(crate::ApiError),
    #[display("unauthorized: {}", _0.message)]
    Unauthorized(crate::ApiError),
}

fn screen_request() -> ScreenRequest {
    ScreenRequest {
        transaction_id: "T-1".to_owned(),
        note: None,
        payments: vec![json!({
            "method": "CREDIT_CARD",
            "card_number": "4111111111111111",
            "card_cvv_response": "M",
            "brand": "VISA"
        })],
    }
}

fn models() -> ResponseModels<ScreenResponse> {
    ResponseModels::single()
}

fn errors() -> ErrorTable<ScreenError> {
    ErrorTable::new()
        .with(StatusCode::BAD_REQUEST, ScreenError::BadRequest)
        .with(StatusCode::UNAUTHORIZED, ScreenError::Unauthorized)
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "api-token",
            "expires_in": 3600,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

fn client_with_timeout(server: &MockServer, timeout: Duration) -> ApiClient<OAuth2AuthClient> {
    let credentials = Credentials::new("key", "secret").expect("valid credentials");
    let config = ClientConfig::builder(credentials)
        .with_api_endpoint(server.uri())
        .with_auth_endpoint(format!("{}/token", server.uri()))
        .with_request_timeout(timeout)
        .with_sdk_info(SdkInfo::new("openworld-test", "0.0.1"))
        .build()
        .expect("valid config");
    ApiClient::new(config, OAuth2AuthClient::new).expect("valid client")
}

fn client(server: &MockServer) -> ApiClient<OAuth2AuthClient> {
    client_with_timeout(server, Duration::from_secs(5))
}

async fn screen(
    client: &ApiClient<OAuth2AuthClient>,
    headers: &RequestHeaders,
) -> Result<Option<ScreenResponse>, ApiClientError<ScreenError>> {
    let url = client.endpoint(SCREEN_PATH).expect("valid url");
    client
        .call(Method::POST, url, Some(&screen_request()), headers, &models(), &errors())
        .await
}

async fn api_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == SCREEN_PATH)
        .collect()
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let buffer = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn should_decode_success_response() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .and(header("authorization", "Bearer api-token"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(header_exists("transaction-id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"risk_id": "1234567", "decision": "ACCEPT"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;

    let_assert!(Ok(Some(response)) = result);
    check!(response.risk_id == "1234567");
    check!(response.decision == "ACCEPT");
}

#[tokio::test]
async fn should_raise_typed_error_from_table() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "BAD_REQUEST",
            "message": "An input validation error was encountered.",
            "causes": [{
                "code": "MISSING_MANDATORY_PARAM",
                "field": "$.transaction.customer_account.account_type",
                "message": "The value of a field should not be null."
            }]
        })))
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;

    let_assert!(Err(ApiClientError::Service { status, error: ScreenError::BadRequest(error) }) = result);
    check!(status == StatusCode::BAD_REQUEST);
    let_assert!(Some(causes) = error.causes);
    check!(causes.first().and_then(|cause| cause.field.as_deref()) == Some("$.transaction.customer_account.account_type"));
}

#[tokio::test]
async fn should_raise_generic_error_for_unlisted_status() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(418).set_body_json(json!({
            "code": "INTERNAL_SERVER_ERROR",
            "message": "I'm a teapot"
        })))
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;

    let_assert!(Err(ApiClientError::Api { status, error }) = result);
    check!(status.as_u16() == 418);
    check!(error.code == ErrorCode::InternalServerError);
}

#[tokio::test]
async fn should_raise_protocol_error_for_html_error_page() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;

    let_assert!(Err(ApiClientError::Protocol { status, error }) = result);
    check!(status == StatusCode::BAD_GATEWAY);
    check!(error.message == "<html>Bad Gateway</html>");
}

#[tokio::test]
async fn should_mask_sensitive_fields_in_logs_only() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"risk_id": "1234567", "decision": "ACCEPT"})),
        )
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;
    let_assert!(Ok(Some(_)) = result);

    let logged = logs.contents();
    check!(logged.contains(r#""card_number": "<-- omitted -->""#));
    check!(logged.contains(r#""card_cvv_response": "<-- omitted -->""#));
    check!(logged.contains(r#""brand": "VISA""#));
    check!(!logged.contains("4111111111111111"));
    check!(!logged.contains("api-token"));
    check!(logged.contains("Response status: 200 OK"));

    let requests = api_requests(&server).await;
    let_assert!(Some(request) = requests.first());
    let sent: Value = serde_json::from_slice(&request.body).expect("JSON body");
    check!(sent["payments"][0]["card_number"] == "4111111111111111");
}

#[tokio::test]
async fn should_send_body_without_null_fields() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;
    let_assert!(Ok(None) = result);

    let requests = api_requests(&server).await;
    let_assert!(Some(request) = requests.first());
    let sent: Value = serde_json::from_slice(&request.body).expect("JSON body");
    check!(sent.get("note").is_none());
    check!(sent["transaction_id"] == "T-1");
}

#[tokio::test]
async fn should_apply_header_precedence() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let headers = RequestHeaders::new()
        .with_header("User-Agent", "custom-agent/1.0")
        .with_header("Authorization", "Bearer forged")
        .with_header("transaction-id", "caller-transaction");

    let result = screen(&client(&server), &headers).await;
    let_assert!(Ok(None) = result);

    let requests = api_requests(&server).await;
    let_assert!(Some(request) = requests.first());
    let header_value = |name: &str| {
        request
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    check!(header_value("user-agent").as_deref() == Some("custom-agent/1.0"));
    check!(header_value("authorization").as_deref() == Some("Bearer api-token"));
    check!(header_value("transaction-id").as_deref() == Some("caller-transaction"));
}

#[tokio::test]
async fn should_send_fresh_transaction_id_per_call() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;
    let client = client(&server);

    let _ = screen(&client, &RequestHeaders::new()).await;
    let _ = screen(&client, &RequestHeaders::new()).await;

    let ids = api_requests(&server)
        .await
        .iter()
        .filter_map(|request| request.headers.get("transaction-id").and_then(|value| value.to_str().ok()).map(str::to_owned))
        .collect::<Vec<_>>();
    check!(ids.len() == 2);
    check!(ids.first() != ids.last());
}

#[tokio::test]
async fn should_reuse_token_across_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "api-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&server)
        .await;
    let client = client(&server);

    for _ in 0..3 {
        let result = screen(&client, &RequestHeaders::new()).await;
        let_assert!(Ok(None) = result);
    }
}

#[tokio::test]
#[tracing_test::traced_test]
async fn should_surface_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = screen(&client(&server), &RequestHeaders::new()).await;

    let_assert!(Err(error) = result);
    let_assert!(ApiClientError::Authentication(_) = &error);
    check!(error.status() == Some(StatusCode::UNAUTHORIZED));
    assert!(logs_contain("refreshing token"));
    assert!(logs_contain("token request rejected"));
}

#[tokio::test]
#[tracing_test::traced_test]
async fn should_surface_timeout_as_transport_failure() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let result = screen(&client_with_timeout(&server, Duration::from_secs(1)), &RequestHeaders::new()).await;

    let_assert!(Err(ApiClientError::Transport(error)) = result);
    check!(error.is_timeout());
    assert!(logs_contain("transport failure"));
}

#[tokio::test]
async fn should_return_status_and_headers() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(SCREEN_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-request-id", "req-1")
                .set_body_json(json!({"risk_id": "1", "decision": "REVIEW"})),
        )
        .mount(&server)
        .await;
    let client = client(&server);
    let url = client.endpoint(SCREEN_PATH).expect("valid url");

    let response = client
        .call_with_response(
            Method::POST,
            url,
            Some(&screen_request()),
            &RequestHeaders::new(),
            &models(),
            &errors(),
        )
        .await
        .expect("successful call");

    check!(response.status == StatusCode::CREATED);
    check!(response.headers.get("x-request-id").and_then(|value| value.to_str().ok()) == Some("req-1"));
    check!(response.body.map(|body| body.decision) == Some("REVIEW".to_owned()));
}

#[tokio::test]
async fn should_walk_paginated_collection() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("pagination-total-results", "3")
                .set_body_json(json!(["c"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("pagination-total-results", "3")
                .insert_header("link", r#"</orders?page=2>; rel="next""#)
                .set_body_json(json!(["a", "b"])),
        )
        .mount(&server)
        .await;
    let client = client(&server);
    let first_page = client.endpoint("orders").expect("valid url");

    let mut pages = client.paginate(
        first_page,
        RequestHeaders::new().with_header("transaction-id", "ignored"),
        ResponseModels::<Vec<String>>::single(),
        ErrorTable::<std::convert::Infallible>::new(),
    );

    let_assert!(Ok(Some(first)) = pages.next_page().await);
    check!(first.body == Some(vec!["a".to_owned(), "b".to_owned()]));
    check!(pages.has_next());
    check!(pages.total_results() == Some(3));

    let_assert!(Ok(Some(second)) = pages.next_page().await);
    check!(second.body == Some(vec!["c".to_owned()]));
    check!(!pages.has_next());
    let_assert!(Ok(None) = pages.next_page().await);

    let received = server.received_requests().await.expect("request recording enabled");
    let ids = received
        .iter()
        .filter(|request| request.url.path() == "/orders")
        .filter_map(|request| request.headers.get("transaction-id").and_then(|value| value.to_str().ok()).map(str::to_owned))
        .collect::<Vec<_>>();
    check!(ids.len() == 2);
    check!(!ids.contains(&"ignored".to_owned()));
    check!(ids.first() != ids.last());
}

#[test]
fn should_resolve_endpoint_paths() {
    let credentials = Credentials::new("key", "secret").expect("valid credentials");
    let config = ClientConfig::builder(credentials)
        .with_api_endpoint("https://api.example.com/base")
        .with_auth_endpoint("https://api.example.com/token")
        .build()
        .expect("valid config");
    let client = ApiClient::new(config, OAuth2AuthClient::new).expect("valid client");

    let url = client.endpoint("/fraud-prevention/v2/account/screen").expect("valid url");

    check!(url.as_str() == "https://api.example.com/base/fraud-prevention/v2/account/screen");
}
