use std::env;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use indexmap::IndexMap;
use sysinfo::System;
use tracing::warn;
use uuid::Uuid;

use super::logging::is_sensitive_header;

/// Correlation header sent with every call.
pub const TRANSACTION_ID: &str = "transaction-id";

/// Invalid header name or value.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum HeaderError {
    /// The header name is not a valid HTTP token.
    #[display("Invalid header name: {_0}")]
    InvalidName(http::header::InvalidHeaderName),

    /// The header value contains forbidden characters.
    #[display("Invalid header value: {_0}")]
    InvalidValue(http::header::InvalidHeaderValue),
}

/// Identity reported in the `User-Agent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkInfo {
    name: String,
    version: String,
}

const RUSTC_VERSION: &str = env!("OPENWORLD_RUSTC_VERSION");

impl SdkInfo {
    /// Creates the identity of an SDK.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// SDK name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SDK version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<name>/<version> (Rust <rust-version>; <os-name> <os-version>)`.
    ///
    /// `<rust-version>` is the compiler that built this crate.
    pub fn user_agent(&self) -> String {
        let os_name = System::name().unwrap_or_else(|| env::consts::OS.to_owned());
        let os_version = System::os_version().unwrap_or_else(|| "unknown".to_owned());
        format!(
            "{}/{} (Rust {}; {os_name} {os_version})",
            self.name,
            self.version,
            RUSTC_VERSION
        )
    }
}

impl Default for SdkInfo {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// Per-call request headers.
///
/// Names are case-insensitive and stored lowercase. The `Authorization` header
/// is reserved to the auth client and cannot be set here.
///
/// ```rust
/// use openworld_core::RequestHeaders;
///
/// let headers = RequestHeaders::new()
///     .with_header("X-Partner", "ow")
///     .with_header("Authorization", "Bearer stolen");
///
/// assert_eq!(headers.get("x-partner"), Some("ow"));
/// assert_eq!(headers.get("authorization"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    headers: IndexMap<String, String>,
}

impl RequestHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        if name == AUTHORIZATION.as_str() {
            warn!("ignoring per-call Authorization header");
            return self;
        }
        self.headers.insert(name, value.into());
        self
    }

    /// Sets the `transaction-id` header.
    #[must_use]
    pub fn with_transaction_id(self, transaction_id: Uuid) -> Self {
        self.with_header(TRANSACTION_ID, transaction_id.to_string())
    }

    /// Value of a header, looked up case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Merges another header set into this one. Entries of `other` win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self
    }

    /// Whether no header is set.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// The headers as a plain map, in insertion order.
    pub fn into_map(self) -> IndexMap<String, String> {
        self.headers
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |headers, (name, value)| headers.with_header(name, value))
    }
}

/// Builds the outbound headers of each call.
///
/// Defaults are computed once. Each [`compose`](Self::compose) layers, later
/// entries winning: the defaults, a fresh `transaction-id`, the per-call
/// headers, and finally `Authorization`.
#[derive(Debug, Clone)]
pub struct HeaderComposer {
    defaults: HeaderMap,
}

impl HeaderComposer {
    /// Computes the SDK-wide defaults.
    ///
    /// # Errors
    ///
    /// Fails if the `User-Agent` built from `sdk_info` is not a valid header value.
    pub fn new(sdk_info: &SdkInfo) -> Result<Self, HeaderError> {
        let mut defaults = HeaderMap::new();
        defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));
        defaults.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        defaults.insert(USER_AGENT, HeaderValue::from_str(&sdk_info.user_agent())?);
        Ok(Self { defaults })
    }

    /// The SDK-wide default headers.
    pub fn defaults(&self) -> &HeaderMap {
        &self.defaults
    }

    /// Merges the defaults, the per-call headers and the authorization value.
    ///
    /// # Errors
    ///
    /// Fails on a header name or value that is not valid HTTP.
    pub fn compose(
        &self,
        per_call: &RequestHeaders,
        authorization: &str,
    ) -> Result<HeaderMap, HeaderError> {
        let mut headers = self.defaults.clone();
        headers.insert(
            HeaderName::from_static(TRANSACTION_ID),
            HeaderValue::from_str(&Uuid::new_v4().to_string())?,
        );

        for (name, value) in per_call.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let mut value = HeaderValue::from_str(value)?;
            value.set_sensitive(is_sensitive_header(name.as_str()));
            headers.insert(name, value);
        }

        let mut authorization = HeaderValue::from_str(authorization)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        Ok(headers)
    }
}
