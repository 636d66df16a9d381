use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on the raw body kept in a synthetic protocol error.
pub const BODY_MAX_LENGTH: usize = 1024;

/// Machine-readable code of the generic [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// `BAD_REQUEST`
    BadRequest,
    /// `UNAUTHORIZED`
    Unauthorized,
    /// `FORBIDDEN`
    Forbidden,
    /// `NOT_FOUND`
    NotFound,
    /// `CONFLICT`
    Conflict,
    /// `TOO_MANY_REQUESTS`
    TooManyRequests,
    /// `INTERNAL_SERVER_ERROR`
    InternalServerError,
    /// `BAD_GATEWAY`
    BadGateway,
    /// `SERVICE_UNAVAILABLE`
    ServiceUnavailable,
    /// `GATEWAY_TIMEOUT`
    GatewayTimeout,
    /// `PROTOCOL_ERROR`, never sent by a server: raised for bodies that
    /// cannot be decoded.
    ProtocolError,
}

impl ErrorCode {
    /// The wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::BadGateway => "BAD_GATEWAY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::GatewayTimeout => "GATEWAY_TIMEOUT",
            Self::ProtocolError => "PROTOCOL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cause of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorCause {
    /// Machine-readable cause code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// JSON path of the offending field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generic error body, used for statuses absent from an operation's error table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Detailed causes, in server order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<ErrorCause>>,
}

impl ApiError {
    /// Creates an error without causes.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            causes: None,
        }
    }

    /// Synthetic `PROTOCOL_ERROR` carrying the (truncated) raw body.
    pub fn protocol(raw_body: &[u8]) -> Self {
        Self::new(ErrorCode::ProtocolError, truncate(raw_body))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

fn truncate(raw_body: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw_body);
    if text.len() <= BODY_MAX_LENGTH {
        return text.into_owned();
    }

    let mut end = BODY_MAX_LENGTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let head = text.get(..end).unwrap_or_default();
    format!("{head}... (truncated)")
}
