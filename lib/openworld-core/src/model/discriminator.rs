//! Tagged unions selected by a discriminator field.
//!
//! Variant payloads do not carry the discriminator: it is inserted on
//! serialization and removed before the payload is decoded, so variant structs
//! may reject unknown fields.
//!
//! ```rust
//! use openworld_core::discriminated_union;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct Rail { pub route: String }
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct Air { pub flight: String }
//!
//! discriminated_union! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum TravelProduct : "type" {
//!         Rail(Rail) = "RAIL",
//!         Air(Air) = "AIR",
//!     }
//! }
//!
//! let product: TravelProduct = serde_json::from_str(r#"{"type":"AIR","flight":"OW123"}"#)?;
//! assert_eq!(product, TravelProduct::Air(Air { flight: "OW123".into() }));
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Serializes a variant payload and inserts its discriminator.
#[doc(hidden)]
pub fn encode_variant<T: Serialize>(
    payload: &T,
    discriminator: &str,
    tag: &str,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(payload)?;
    let Value::Object(fields) = &mut value else {
        return Err(serde::ser::Error::custom(format!(
            "variant `{tag}` must serialize to a JSON object"
        )));
    };
    fields.insert(discriminator.to_owned(), Value::String(tag.to_owned()));
    Ok(value)
}

/// Removes the discriminator and decodes the remaining fields as `T`.
#[doc(hidden)]
pub fn decode_variant<T: DeserializeOwned>(
    value: &Value,
    discriminator: &str,
) -> Result<T, serde_json::Error> {
    let mut payload = value.clone();
    if let Value::Object(fields) = &mut payload {
        fields.remove(discriminator);
    }
    serde_json::from_value(payload)
}

/// Declares an enum (de)serialized as a JSON object tagged by a discriminator.
///
/// Each variant wraps one payload type and is bound to the string literal of
/// the discriminator that selects it. An optional trailing `fallback` variant
/// receives any object whose tag is unknown, or whose payload does not decode
/// as the tagged variant. The fallback payload keeps the discriminator field.
///
/// Decoding fails when no variant accepts the object and there is no fallback.
#[macro_export]
macro_rules! discriminated_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $discriminator:literal {
            $( $(#[$variant_meta:meta])* $variant:ident($payload:ty) = $tag:literal ),+ $(,)?
        }
        $( fallback $(#[$fallback_meta:meta])* $fallback:ident($fallback_payload:ty) )?
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$variant_meta])* $variant($payload), )+
            $( $(#[$fallback_meta])* $fallback($fallback_payload), )?
        }

        impl $name {
            /// Name of the discriminator field.
            pub const DISCRIMINATOR: &'static str = $discriminator;

            /// Discriminator values of the declared variants, fallback excluded.
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            #[allow(unreachable_code, unused_variables)]
            fn __fallback_variant(value: $crate::__private::serde_json::Value) -> Option<Self> {
                $(
                    return $crate::__private::serde_json::from_value::<$fallback_payload>(value)
                        .ok()
                        .map(Self::$fallback);
                )?
                None
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                use $crate::__private::serde::ser::Error as _;

                let value = match self {
                    $(
                        Self::$variant(payload) => {
                            $crate::__private::encode_variant(payload, $discriminator, $tag)
                        }
                    )+
                    $( Self::$fallback(payload) => $crate::__private::serde_json::to_value(payload), )?
                }
                .map_err(S::Error::custom)?;

                $crate::__private::serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::de::Error as _;

                let value =
                    <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(
                        deserializer,
                    )?;
                let tag = value
                    .get($discriminator)
                    .and_then($crate::__private::serde_json::Value::as_str);

                let decoded = match tag {
                    $(
                        Some($tag) => $crate::__private::decode_variant::<$payload>(&value, $discriminator)
                            .map(Self::$variant)
                            .map_err(|err| format!("invalid `{}` {}: {err}", $tag, stringify!($name))),
                    )+
                    Some(other) => Err(format!(
                        "unknown {} `{other}` for {}",
                        $discriminator,
                        stringify!($name)
                    )),
                    None => Err(format!(
                        "missing discriminator `{}` for {}",
                        $discriminator,
                        stringify!($name)
                    )),
                };

                match decoded {
                    Ok(decoded) => Ok(decoded),
                    Err(reason) => Self::__fallback_variant(value).ok_or_else(|| D::Error::custom(reason)),
                }
            }
        }
    };
}
