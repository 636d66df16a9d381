//! Models shared by every API: the generic error body and tagged unions.

mod discriminator;
mod error;

#[doc(hidden)]
pub use self::discriminator::{decode_variant, encode_variant};
pub use self::error::{ApiError, BODY_MAX_LENGTH, ErrorCause, ErrorCode};
