//! Axum extractors for request handling
//!
//! Custom extractors for caller identity, validation, and the message limit.

mod identity;
mod limit;
mod validated;

pub use identity::{Identity, OptionalIdentity, UserHeader, USER_HEADER};
pub use limit::MessageLimit;
pub use validated::ValidatedJson;
