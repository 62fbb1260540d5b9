//! Completion Fallback
//!
//! Answers queries the reference index cannot match by asking an external
//! text-completion service. Failures never escape: they become an error reply.

mod delegate;
mod error;
mod gemini;
mod service;

pub use delegate::{build_prompt, error_reply, FallbackDelegate, AI_ERROR_PREFIX};
pub use error::CompletionError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use service::CompletionService;
