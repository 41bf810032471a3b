//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod health;
pub mod messages;
pub mod participants;
pub mod status;
