//! Domain traits (ports)

mod repositories;

pub use repositories::{MessageQuery, MessageRepository, ParticipantRepository, RepoResult};
