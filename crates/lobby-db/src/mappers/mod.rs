//! Entity to model mappers
//!
//! Conversions between domain entities (lobby-core) and database models.
//! - `From<Model> for Entity` / `TryFrom<Model> for Entity`: database rows to domain objects
//! - `MessageBatch`: column arrays for a single `UNNEST` insert

mod message;
mod participant;

pub use message::MessageBatch;
