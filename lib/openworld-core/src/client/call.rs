use http::header::HeaderMap;
use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::logging::ExchangeLog;
use super::{ApiClient, ApiClientError, ErrorTable, RequestHeaders, ResponseModels, dispatch};
use crate::auth::AuthClient;

/// Body argument of a call that sends none.
pub const NO_BODY: Option<&()> = None;

/// A dispatched 2xx response with its status and headers.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The decoded body, `None` when no model matched.
    pub body: Option<T>,
}

pub(super) struct RawResponse {
    pub(super) status: StatusCode,
    pub(super) headers: HeaderMap,
    pub(super) body: Vec<u8>,
}

impl<A: AuthClient> ApiClient<A> {
    /// Performs one API call and dispatches its response.
    ///
    /// Returns the first of `models` that decodes a 2xx body, or `None`.
    ///
    /// # Errors
    ///
    /// - [`ApiClientError::Authentication`] if the token cannot be obtained,
    /// - [`ApiClientError::Transport`] on connect, TLS, read or timeout failures,
    /// - [`ApiClientError::Service`], [`ApiClientError::Api`] or
    ///   [`ApiClientError::Protocol`] for error responses, see [`dispatch`].
    pub async fn call<B, T, E>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        headers: &RequestHeaders,
        models: &ResponseModels<T>,
        errors: &ErrorTable<E>,
    ) -> Result<Option<T>, ApiClientError<E>>
    where
        B: Serialize + ?Sized,
    {
        self.call_with_response(method, url, body, headers, models, errors)
            .await
            .map(|response| response.body)
    }

    /// Like [`call`](Self::call), keeping the response status and headers.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn call_with_response<B, T, E>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        headers: &RequestHeaders,
        models: &ResponseModels<T>,
        errors: &ErrorTable<E>,
    ) -> Result<Response<T>, ApiClientError<E>>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(encode_body).transpose()?;
        let raw = self.exchange::<E>(method, url, body, headers).await?;
        let decoded = dispatch(raw.status, &raw.body, models, errors)?;

        Ok(Response {
            status: raw.status,
            headers: raw.headers,
            body: decoded,
        })
    }

    pub(super) async fn exchange<E>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        per_call: &RequestHeaders,
    ) -> Result<RawResponse, ApiClientError<E>> {
        self.auth.refresh_if_needed().await?;
        let authorization = self.auth.authorization_value().await?;
        let headers = self.composer.compose(per_call, &authorization)?;

        let mut request = reqwest::Request::new(method.clone(), url.clone());
        *request.headers_mut() = headers.clone();
        if let Some(body) = &body {
            *request.body_mut() = Some(serde_json::to_vec(body)?.into());
        }

        debug!(?request, "sending...");
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %url, timeout = err.is_timeout(), "transport failure: {err}");
                return Err(ApiClientError::Transport(err));
            }
        };
        debug!(?response, "...receiving");

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_body = response.bytes().await?.to_vec();

        ExchangeLog {
            method: &method,
            url: &url,
            headers: &headers,
            body: body.as_ref(),
            status,
            redactions: &self.redactions,
        }
        .emit();

        Ok(RawResponse {
            status,
            headers: response_headers,
            body: response_body,
        })
    }
}

/// Serializes a request body, dropping `null` object fields.
pub(super) fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(body)?;
    strip_nulls(&mut value);
    Ok(value)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            fields.retain(|_, field| !field.is_null());
            fields.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
