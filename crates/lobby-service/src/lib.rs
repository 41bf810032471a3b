//! # lobby-service
//!
//! Application layer containing the registration and messaging use cases,
//! the idle sweeper, and the request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    IdleSweeper, MessageService, ParticipantService, ServiceContext,
    ServiceError, ServiceResult,
};
