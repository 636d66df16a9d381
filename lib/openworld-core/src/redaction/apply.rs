//! Writes the placeholder at every location a selector resolves to.

use jsonptr::{Pointer, assign::Assign};
use serde_json::Value;

use super::path_selector::PathSelector;
use super::{OMITTED, RedactionError};

/// Replaces every value matched by `selector` with [`OMITTED`].
///
/// Returns the number of masked values.
///
/// # Errors
///
/// Returns an error if a resolved JSON Pointer cannot be parsed or assigned.
pub(super) fn apply_placeholder(
    json: &mut Value,
    selector: &PathSelector,
) -> Result<usize, RedactionError> {
    let concrete_paths = selector.resolve(json);

    for pointer in &concrete_paths {
        let ptr = Pointer::parse(pointer).map_err(|err| RedactionError {
            message: format!("Invalid JSON Pointer '{pointer}': {err}"),
        })?;

        json.assign(ptr, Value::String(OMITTED.to_string()))
            .map_err(|err| RedactionError {
                message: format!("Failed to assign value at path '{pointer}': {err}"),
            })?;
    }

    Ok(concrete_paths.len())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::redaction::SensitiveFields;

    const GIFT_CARD: SensitiveFields = SensitiveFields {
        model: "GiftCard",
        discriminator: "method",
        tag: "GIFT_CARD",
        fields: &["pin"],
    };

    #[test]
    fn should_count_masked_values() {
        let selector = PathSelector::for_field(&GIFT_CARD, "pin").expect("should parse");
        let mut json = json!([
            {"method": "GIFT_CARD", "pin": "1234"},
            {"method": "GIFT_CARD", "pin": "5678"}
        ]);

        let masked = apply_placeholder(&mut json, &selector).expect("should apply");

        assert_eq!(masked, 2);
        assert_eq!(json[0]["pin"], OMITTED);
        assert_eq!(json[1]["pin"], OMITTED);
    }

    #[test]
    fn should_do_nothing_without_match() {
        let selector = PathSelector::for_field(&GIFT_CARD, "pin").expect("should parse");
        let mut json = json!({"method": "GIFT_CARD"});
        let expected = json.clone();

        let masked = apply_placeholder(&mut json, &selector).expect("should apply");

        assert_eq!(masked, 0);
        assert_eq!(json, expected);
    }
}
