//! Fallback Delegate

use crate::error::CompletionError;
use crate::service::CompletionService;
use std::sync::Arc;
use tracing::{debug, warn};

/// Marker that starts every reply produced from a failed completion
pub const AI_ERROR_PREFIX: &str = "⚠️ AI error:";

/// Wrap raw user text in the fixed assistant instruction
pub fn build_prompt(raw_text: &str) -> String {
    format!(
        "You are a health awareness assistant. User asked: {raw_text}. \
         Reply in short **numbered points**, clear and friendly."
    )
}

/// User-visible reply for a failed completion
pub fn error_reply(err: &CompletionError) -> String {
    format!("{AI_ERROR_PREFIX} {err}")
}

/// Delegates unmatched queries to a completion service.
///
/// One attempt per query, no retries.
#[derive(Clone)]
pub struct FallbackDelegate {
    service: Arc<dyn CompletionService>,
}

impl FallbackDelegate {
    /// Create a delegate over a completion service
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Name of the backing service
    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Answer the raw (original-case) user text.
    ///
    /// Returns the completion verbatim, or an [`AI_ERROR_PREFIX`] reply.
    pub async fn answer(&self, raw_text: &str) -> String {
        let prompt = build_prompt(raw_text);
        debug!(service = self.service.name(), "Delegating query to completion service");

        match self.service.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(service = self.service.name(), error = %e, "Completion failed");
                metrics::counter!("fallback_errors_total").increment(1);
                error_reply(&e)
            }
        }
    }
}
