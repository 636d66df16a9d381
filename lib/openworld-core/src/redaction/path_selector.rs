//! JSONPath (RFC 9535) selectors for sensitive fields.

use serde_json_path::JsonPath;

use super::{RedactionError, SensitiveFields};

/// Selects one field of every object carrying a given discriminator value.
#[derive(Debug, Clone)]
pub(super) struct PathSelector {
    path: JsonPath,
}

impl PathSelector {
    /// Builds `$..[?@.<discriminator> == '<tag>'].<field>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule does not form a valid JSONPath.
    pub(super) fn for_field(rule: &SensitiveFields, field: &str) -> Result<Self, RedactionError> {
        let expression = format!(
            "$..[?@.{discriminator} == '{tag}'].{field}",
            discriminator = rule.discriminator,
            tag = rule.tag,
        );
        let path = JsonPath::parse(&expression).map_err(|err| RedactionError {
            message: format!("Invalid JSONPath '{expression}' for {}: {err}", rule.model),
        })?;
        Ok(Self { path })
    }

    /// Resolves the selector to concrete JSON Pointers.
    pub(super) fn resolve(&self, json: &serde_json::Value) -> Vec<String> {
        self.path
            .query_located(json)
            .locations()
            .map(|loc| loc.to_json_pointer())
            .collect()
    }
}
