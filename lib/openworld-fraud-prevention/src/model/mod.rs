//! Request, response and error models of the Fraud Prevention V2 API.
//!
//! Polymorphic bodies ([`Payment`], [`TravelProduct`],
//! [`OrderPurchaseUpdateRequest`], [`RefundUpdate`], [`AccountUpdateRequest`],
//! [`AccountTakeoverTransactionDetails`]) are tagged unions selected by their
//! discriminator field. Each ends with a `Generic` variant that accepts the
//! tags without a dedicated variant, or a tagged body that does not match its
//! variant.
//!
//! Responses and errors reject unknown fields. Length and pattern constraints
//! of the schema are enforced by the service, not checked here.

mod account;
mod common;
mod error;
mod order;
mod payment;
mod travel;
mod update;

pub use self::account::*;
pub use self::common::*;
pub use self::error::*;
pub use self::order::*;
pub use self::payment::*;
pub use self::travel::*;
pub use self::update::*;
