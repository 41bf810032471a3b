//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in lobby-core.

pub(crate) mod error;
mod message;
mod participant;

pub use message::PgMessageRepository;
pub use participant::PgParticipantRepository;
