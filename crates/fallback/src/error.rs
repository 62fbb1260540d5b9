//! Completion Error Types

use thiserror::Error;

/// Errors from a completion service call
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key was configured
    #[error("API key not configured (set {0})")]
    MissingApiKey(String),

    /// Could not reach the service
    #[error("Connection to {0} failed")]
    Connection(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Transport-level failure
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Service answered with a non-success status
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response could not be decoded or carried no text
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
