//! Completion Service Trait

use crate::error::CompletionError;
use async_trait::async_trait;

/// External text-completion capability
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete a prompt, returning the generated text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Name of the backing service (for logging)
    fn name(&self) -> &str;
}
