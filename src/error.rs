// src/error.rs

//! Unified error handling for the forum client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client-side validation rejected the input before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend answered with a non-success status and a message
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// The requested resource does not exist on the backend
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network-level failure or an unreadable response body
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AppError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a request failure from a status code and backend message.
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a transport error.
    pub fn transport(message: impl fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
