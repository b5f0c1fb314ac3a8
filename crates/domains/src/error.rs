//! # AppError
//!
//! Centralized error handling for the Chirp ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
///
/// Every variant carries the caller-facing message; the HTTP layer decides
/// the status code and strips the prefix added by `Display`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., User, Post, parent post)
    #[error("not found: {0}")]
    NotFound(String),

    /// Validation failure (e.g., empty content, weak password)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Security/Auth failure (e.g., bad credentials, invalid token)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down, hashing failure)
    #[error("internal service error: {0}")]
    Internal(String),

    /// Resource already exists or a state precondition fails
    /// (duplicate follow/like, username taken, unfollow without an edge)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Rate limit exceeded
    #[error("too many requests: {0}")]
    RateLimitExceeded(String),
}

impl AppError {
    /// The message as shown to the API caller, without the `Display` prefix.
    /// Internal errors are masked; the detail stays in the logs.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg)
            | AppError::RateLimitExceeded(msg) => msg,
            AppError::Internal(_) => "Internal server error",
        }
    }
}

/// A specialized Result type for Chirp logic.
pub type Result<T> = std::result::Result<T, AppError>;
