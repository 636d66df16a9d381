//! Log redaction for request bodies.
//!
//! Payment payloads carry card numbers, PINs and bank account numbers. Before a
//! body is written to the logs, every field listed in [`SENSITIVE_FIELDS`] is
//! replaced with [`OMITTED`]. The value sent on the wire is never touched: the
//! redaction always works on a copy.
//!
//! Rules are keyed by the discriminator of the model that owns the fields, so a
//! `card_number` is masked inside a `CREDIT_CARD` payment wherever it appears in
//! the document, while an unrelated `card_number` elsewhere is left as is.
//!
//! ```rust
//! use openworld_core::redaction::{OMITTED, Redactions};
//! use serde_json::json;
//!
//! let body = json!({
//!     "payments": [{ "method": "GIFT_CARD", "card_number": "ABCD", "pin": "1234" }]
//! });
//!
//! let logged = Redactions::default().redact(&body)?;
//! assert_eq!(logged["payments"][0]["pin"], OMITTED);
//! assert_eq!(body["payments"][0]["pin"], "1234");
//! # Ok::<(), openworld_core::redaction::RedactionError>(())
//! ```

mod apply;
mod path_selector;

use serde_json::Value;

use self::apply::apply_placeholder;
use self::path_selector::PathSelector;

/// Placeholder written in place of a sensitive value.
pub const OMITTED: &str = "<-- omitted -->";

/// Fields of one model variant that must never reach the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensitiveFields {
    /// Name of the model, for diagnostics.
    pub model: &'static str,
    /// Discriminator field selecting the variant (e.g. `method`).
    pub discriminator: &'static str,
    /// Discriminator value of the variant (e.g. `CREDIT_CARD`).
    pub tag: &'static str,
    /// Fields to mask.
    pub fields: &'static [&'static str],
}

/// The process-wide redaction set.
pub const SENSITIVE_FIELDS: &[SensitiveFields] = &[
    SensitiveFields {
        model: "CreditCard",
        discriminator: "method",
        tag: "CREDIT_CARD",
        fields: &["card_number", "card_cvv_response", "card_avs_response"],
    },
    SensitiveFields {
        model: "GiftCard",
        discriminator: "method",
        tag: "GIFT_CARD",
        fields: &["pin"],
    },
    SensitiveFields {
        model: "DirectDebit",
        discriminator: "method",
        tag: "DIRECT_DEBIT",
        fields: &["account_number"],
    },
];

/// Error raised while masking a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Redaction failed: {message}")]
pub struct RedactionError {
    /// What went wrong.
    pub message: String,
}

/// Applies a set of [`SensitiveFields`] rules to JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redactions {
    rules: &'static [SensitiveFields],
}

impl Default for Redactions {
    fn default() -> Self {
        Self::new(SENSITIVE_FIELDS)
    }
}

impl Redactions {
    /// Creates a redaction set from static rules.
    pub const fn new(rules: &'static [SensitiveFields]) -> Self {
        Self { rules }
    }

    /// Returns the rules of this set.
    pub fn rules(&self) -> &'static [SensitiveFields] {
        self.rules
    }

    /// Returns a masked copy of `value`.
    ///
    /// Only fields that are present are replaced; absent fields stay absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule does not produce a valid JSONPath, which
    /// only happens with hand-written rules containing quotes.
    pub fn redact(&self, value: &Value) -> Result<Value, RedactionError> {
        // A descendant query never selects the root node itself,
        // so a top-level payment is wrapped to become a descendant.
        let mut wrapped = Value::Array(vec![value.clone()]);

        for rule in self.rules {
            for field in rule.fields {
                let selector = PathSelector::for_field(rule, field)?;
                apply_placeholder(&mut wrapped, &selector)?;
            }
        }

        match wrapped {
            Value::Array(mut items) => Ok(items.pop().unwrap_or(Value::Null)),
            _ => Err(RedactionError {
                message: "redaction wrapper lost its shape".to_string(),
            }),
        }
    }
}
