use std::fmt::{self, Display};

use http::header::{AUTHORIZATION, HeaderMap};
use http::{Method, StatusCode};
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::redaction::{OMITTED, Redactions};

const CREDENTIAL_MARKERS: [&str; 4] = ["key", "secret", "username", "password"];

/// One API exchange as written to the logs.
///
/// Sensitive headers and the fields of the redaction set are masked; the
/// redaction works on a copy of the body.
pub(super) struct ExchangeLog<'a> {
    pub(super) method: &'a Method,
    pub(super) url: &'a Url,
    pub(super) headers: &'a HeaderMap,
    pub(super) body: Option<&'a Value>,
    pub(super) status: StatusCode,
    pub(super) redactions: &'a Redactions,
}

impl ExchangeLog<'_> {
    pub(super) fn emit(&self) {
        info!(
            method = %self.method,
            url = %self.url,
            status = self.status.as_u16(),
            "{self}"
        );
    }
}

pub(super) fn is_sensitive_header(name: &str) -> bool {
    name == AUTHORIZATION.as_str() || CREDENTIAL_MARKERS.iter().any(|marker| name.contains(marker))
}

impl Display for ExchangeLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Request: {}", self.url)?;
        writeln!(f, "Method: {}", self.method)?;

        writeln!(f, "Headers:")?;
        let mut headers = self.headers.iter().collect::<Vec<_>>();
        headers.sort_by(|(left, _), (right, _)| left.as_str().cmp(right.as_str()));
        for (name, value) in headers {
            let shown = if value.is_sensitive() || is_sensitive_header(name.as_str()) {
                OMITTED
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            writeln!(f, "  {name}: {shown}")?;
        }

        match self.body {
            None => writeln!(f, "Body: <none>")?,
            Some(body) => {
                let rendered = self
                    .redactions
                    .redact(body)
                    .ok()
                    .and_then(|redacted| serde_json::to_string_pretty(&redacted).ok());
                writeln!(f, "Body:")?;
                writeln!(f, "{}", rendered.as_deref().unwrap_or(OMITTED))?;
            }
        }

        write!(f, "Response status: {}", self.status)
    }
}
