use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::ApiClientError;
use crate::model::ApiError;

type DecodeError = serde_path_to_error::Error<serde_json::Error>;

type Decoder<T> = fn(&Value) -> Result<T, DecodeError>;

type ErrorDecoder<E> = Box<dyn Fn(&Value) -> Result<E, DecodeError> + Send + Sync>;

fn decode_as<M, T>(value: &Value) -> Result<T, DecodeError>
where
    M: DeserializeOwned + Into<T>,
{
    serde_path_to_error::deserialize::<_, M>(value).map(Into::into)
}

fn model_name<M>() -> &'static str {
    let name = type_name::<M>();
    name.rsplit("::").next().unwrap_or(name)
}

struct Candidate<T> {
    model: &'static str,
    decode: Decoder<T>,
}

impl<T> Candidate<T> {
    fn of<M>() -> Self
    where
        M: DeserializeOwned + Into<T>,
    {
        Self {
            model: model_name::<M>(),
            decode: decode_as::<M, T>,
        }
    }

    fn decode(&self, status: StatusCode, value: &Value) -> Option<T> {
        match (self.decode)(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(%status, model = self.model, path = %err.path(), error = %err.inner(), "response does not match model");
                None
            }
        }
    }
}

/// Candidate models for a 2xx body, decoded into `T`.
///
/// By default candidates are tried in declaration order and the first that
/// decodes wins; a body matching none yields `None`. A model pinned to a status
/// with [`for_status`](Self::for_status) is the only one tried for that status.
///
/// ```rust
/// use std::convert::Infallible;
///
/// use http::StatusCode;
/// use openworld_core::{ErrorTable, ResponseModels, dispatch};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Created { id: String }
///
/// let models = ResponseModels::<Created>::single();
/// let errors = ErrorTable::<Infallible>::new();
/// let created = dispatch(StatusCode::CREATED, br#"{"id":"42"}"#, &models, &errors)?;
///
/// assert_eq!(created, Some(Created { id: "42".into() }));
/// # Ok::<(), openworld_core::ApiClientError>(())
/// ```
pub struct ResponseModels<T> {
    candidates: Vec<Candidate<T>>,
    pinned: BTreeMap<u16, Candidate<T>>,
    strict: bool,
    require_match: bool,
}

impl<T> ResponseModels<T> {
    /// No candidate: every 2xx yields `None`.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            pinned: BTreeMap::new(),
            strict: false,
            require_match: false,
        }
    }

    /// Appends a candidate, tried after the previous ones.
    #[must_use]
    pub fn model<M>(mut self) -> Self
    where
        M: DeserializeOwned + Into<T>,
    {
        self.candidates.push(Candidate::of::<M>());
        self
    }

    /// Pins the model decoded for one status.
    ///
    /// A pinned body that does not decode is a protocol error.
    #[must_use]
    pub fn for_status<M>(mut self, status: StatusCode) -> Self
    where
        M: DeserializeOwned + Into<T>,
    {
        self.pinned.insert(status.as_u16(), Candidate::of::<M>());
        self
    }

    /// Rejects bodies matched by more than one candidate.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Rejects bodies matched by no candidate.
    #[must_use]
    pub fn require_match(mut self) -> Self {
        self.require_match = true;
        self
    }

    /// Names of the candidate models, in order.
    pub fn models(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.candidates.iter().map(|candidate| candidate.model)
    }

    fn decode<E>(&self, status: StatusCode, body: &[u8]) -> Result<Option<T>, ApiClientError<E>> {
        let pinned = self.pinned.get(&status.as_u16());
        let value = if body.is_empty() {
            None
        } else {
            serde_json::from_slice::<Value>(body).ok()
        };

        let Some(value) = value else {
            if pinned.is_some() || self.require_match {
                warn!(%status, "expected a JSON body");
                return Err(ApiClientError::protocol(status, body));
            }
            debug!(%status, "no JSON body to decode");
            return Ok(None);
        };

        if let Some(candidate) = pinned {
            return candidate
                .decode(status, &value)
                .map(Some)
                .ok_or_else(|| ApiClientError::protocol(status, body));
        }

        let mut matches = self.candidates.iter().filter_map(|candidate| {
            candidate
                .decode(status, &value)
                .map(|decoded| (candidate.model, decoded))
        });

        let Some((model, decoded)) = matches.next() else {
            if self.require_match {
                warn!(%status, "response matches no model");
                return Err(ApiClientError::protocol(status, body));
            }
            return Ok(None);
        };

        if self.strict
            && let Some((other, _)) = matches.next()
        {
            warn!(%status, model, other, "response matches several models");
            return Err(ApiClientError::protocol(status, body));
        }

        debug!(%status, model, "response decoded");
        Ok(Some(decoded))
    }
}

impl<T: DeserializeOwned> ResponseModels<T> {
    /// `T` itself as the only candidate.
    pub fn single() -> Self {
        Self::new().model::<T>()
    }
}

impl<T> Default for ResponseModels<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for ResponseModels<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseModels")
            .field("candidates", &self.models().collect::<Vec<_>>())
            .field(
                "pinned",
                &self
                    .pinned
                    .iter()
                    .map(|(status, candidate)| (status, candidate.model))
                    .collect::<Vec<_>>(),
            )
            .field("strict", &self.strict)
            .field("require_match", &self.require_match)
            .finish()
    }
}

struct ErrorContract<E> {
    model: &'static str,
    decode: ErrorDecoder<E>,
}

/// Maps non-2xx statuses to the model of their body and the typed error `E`.
///
/// Several statuses may share one model and still map to distinct variants.
pub struct ErrorTable<E> {
    entries: BTreeMap<u16, ErrorContract<E>>,
}

impl<E> ErrorTable<E> {
    /// An empty table: every non-2xx is decoded as the generic [`ApiError`].
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Declares the body model `M` of `status` and how it becomes an `E`.
    #[must_use]
    pub fn with<M>(mut self, status: StatusCode, wrap: impl Fn(M) -> E + Send + Sync + 'static) -> Self
    where
        M: DeserializeOwned + 'static,
        E: 'static,
    {
        let decode: ErrorDecoder<E> = Box::new(move |value: &Value| {
            serde_path_to_error::deserialize::<_, M>(value).map(&wrap)
        });
        self.entries.insert(
            status.as_u16(),
            ErrorContract {
                model: model_name::<M>(),
                decode,
            },
        );
        self
    }

    /// Whether `status` is listed.
    pub fn contains(&self, status: StatusCode) -> bool {
        self.entries.contains_key(&status.as_u16())
    }

    /// Listed statuses, ascending.
    pub fn statuses(&self) -> impl Iterator<Item = StatusCode> + '_ {
        self.entries
            .keys()
            .filter_map(|code| StatusCode::from_u16(*code).ok())
    }
}

impl<E> Default for ErrorTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Debug for ErrorTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(status, contract)| (status, contract.model)))
            .finish()
    }
}

/// Maps a response to a decoded success body or a typed error.
///
/// - 2xx: decoded by `models` (see [`ResponseModels`]).
/// - non-2xx listed in `errors`: [`ApiClientError::Service`].
/// - other non-2xx: [`ApiClientError::Api`] with the generic [`ApiError`].
/// - a non-2xx body that is not JSON, or does not match its model:
///   [`ApiClientError::Protocol`].
///
/// # Errors
///
/// Every non-2xx status is an error, as are 2xx bodies rejected by a pinned,
/// strict or required model.
pub fn dispatch<T, E>(
    status: StatusCode,
    body: &[u8],
    models: &ResponseModels<T>,
    errors: &ErrorTable<E>,
) -> Result<Option<T>, ApiClientError<E>> {
    if status.is_success() {
        return models.decode(status, body);
    }

    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        warn!(%status, "error response is not JSON");
        return Err(ApiClientError::protocol(status, body));
    };

    if let Some(contract) = errors.entries.get(&status.as_u16()) {
        return match (contract.decode)(&value) {
            Ok(error) => Err(ApiClientError::Service { status, error }),
            Err(err) => {
                warn!(%status, model = contract.model, path = %err.path(), error = %err.inner(), "error response does not match model");
                Err(ApiClientError::protocol(status, body))
            }
        };
    }

    match serde_path_to_error::deserialize::<_, ApiError>(&value) {
        Ok(error) => Err(ApiClientError::Api { status, error }),
        Err(err) => {
            warn!(%status, path = %err.path(), error = %err.inner(), "error response is not a generic error");
            Err(ApiClientError::protocol(status, body))
        }
    }
}
