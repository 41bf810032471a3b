//! Business logic services
//!
//! Services borrow a `ServiceContext` for the duration of one use case; the
//! sweeper owns a shared handle because it outlives any request.

pub mod context;
pub mod error;
pub mod message;
pub mod participant;
pub mod sweeper;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use participant::ParticipantService;
pub use sweeper::IdleSweeper;
