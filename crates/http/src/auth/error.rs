//! Auth provider error types

use thiserror::Error;

/// Auth provider error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network or request error while talking to the auth service
    #[error("Auth request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The auth service refused the refresh token
    #[error("Session rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The auth service answered with an unexpected status
    #[error("Auth service error {status}: {message}")]
    Service { status: u16, message: String },

    /// The OAuth redirect carried an error instead of a session
    #[error("OAuth callback error: {0}")]
    Callback(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage unavailable or unreadable
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
