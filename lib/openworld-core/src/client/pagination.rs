use std::sync::LazyLock;

use http::header::{HeaderMap, LINK};
use http::{Method, StatusCode};
use regex::Regex;
use tracing::debug;
use url::Url;

use super::{ApiClient, ApiClientError, ErrorTable, RequestHeaders, ResponseModels, TRANSACTION_ID, dispatch};
use crate::auth::AuthClient;

/// Header carrying the size of the whole collection.
pub const TOTAL_RESULTS: &str = "pagination-total-results";

static NEXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>\s*;\s*rel\s*=\s*"?next"?"#).expect("a valid regex")
});

/// One page of a paginated collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// HTTP status of the page.
    pub status: StatusCode,
    /// Response headers of the page.
    pub headers: HeaderMap,
    /// The decoded page, `None` when no model matched.
    pub body: Option<T>,
}

/// Walks a `GET` collection following `Link: <...>; rel="next"` headers.
///
/// Each page is dispatched like [`ApiClient::call`] and gets its own
/// `transaction-id`.
#[derive(Debug)]
pub struct Paginator<'a, A, T, E> {
    client: &'a ApiClient<A>,
    next: Option<Url>,
    headers: RequestHeaders,
    models: ResponseModels<T>,
    errors: ErrorTable<E>,
    total_results: Option<u64>,
}

impl<A: AuthClient> ApiClient<A> {
    /// Starts a pagination from the first page URL.
    ///
    /// A caller-supplied `transaction-id` is dropped so that every page gets a fresh one.
    pub fn paginate<T, E>(
        &self,
        first_page: Url,
        headers: RequestHeaders,
        models: ResponseModels<T>,
        errors: ErrorTable<E>,
    ) -> Paginator<'_, A, T, E> {
        let headers = headers
            .into_map()
            .into_iter()
            .filter(|(name, _)| name != TRANSACTION_ID)
            .collect();

        Paginator {
            client: self,
            next: Some(first_page),
            headers,
            models,
            errors,
            total_results: None,
        }
    }
}

impl<A: AuthClient, T, E> Paginator<'_, A, T, E> {
    /// Whether another page remains.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Size of the collection as last reported by the server.
    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    /// Fetches the next page, `None` once the last one was returned.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`]. The pagination stops after an error.
    pub async fn next_page(&mut self) -> Result<Option<Page<T>>, ApiClientError<E>> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let raw = self
            .client
            .exchange::<E>(Method::GET, url.clone(), None, &self.headers)
            .await?;
        let body = dispatch(raw.status, &raw.body, &self.models, &self.errors)?;

        if let Some(total) = total_results(&raw.headers) {
            self.total_results = Some(total);
        }
        self.next = next_link(&url, &raw.headers);
        debug!(next = ?self.next, total = ?self.total_results, "page fetched");

        Ok(Some(Page {
            status: raw.status,
            headers: raw.headers,
            body,
        }))
    }
}

fn total_results(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_RESULTS)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

fn next_link(current: &Url, headers: &HeaderMap) -> Option<Url> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| NEXT_LINK.captures(value))
        .and_then(|captures| captures.get(1))
        .and_then(|target| current.join(target.as_str()).ok())
}
