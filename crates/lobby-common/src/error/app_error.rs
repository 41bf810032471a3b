//! Application error types
//!
//! Failures while wiring the application together: connecting the store,
//! building the middleware, binding and serving. Request-level errors are
//! mapped to HTTP responses by the API layer.

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}
