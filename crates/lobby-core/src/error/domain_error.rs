//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid message type: {0}")]
    InvalidMessageType(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Participant already exists: {0}")]
    ParticipantAlreadyExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParticipantNotFound(_) => "UNKNOWN_PARTICIPANT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidMessageType(_) => "INVALID_MESSAGE_TYPE",
            Self::ParticipantAlreadyExists(_) => "PARTICIPANT_ALREADY_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ParticipantNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidMessageType(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ParticipantAlreadyExists(_))
    }
}
