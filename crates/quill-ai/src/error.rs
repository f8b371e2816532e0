//! # AI Error Types
//!
//! Internal errors for the completion client. These never cross the crate
//! boundary: the public methods catch them, log them, and return fixed
//! fallback strings, because an AI failure must never look like a billing
//! failure to the caller.

use thiserror::Error;

/// Completion-call failures.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured; the client is disabled.
    #[error("AI service has no API key configured")]
    MissingApiKey,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("AI endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A well-formed response with no usable text in it.
    #[error("AI response contained no text")]
    EmptyResponse,
}

/// Result type for internal completion calls.
pub type AiResult<T> = Result<T, AiError>;
