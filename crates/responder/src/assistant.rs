//! Message Handling

use crate::format::{format_disease_name_reply, format_symptom_reply};
use crate::templates::GREETING_REPLY;
use fallback::FallbackDelegate;
use matcher::{MatchOutcome, MatchPass, Matcher, NormalizedText};
use tracing::debug;

/// Which branch produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyBranch {
    /// Canned greeting
    Greeting,
    /// Symptom-pass reference answer
    Symptom,
    /// Disease-name reference answer
    DiseaseName,
    /// Completion service (or its error reply)
    Fallback,
}

impl ReplyBranch {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyBranch::Greeting => "greeting",
            ReplyBranch::Symptom => "symptom",
            ReplyBranch::DiseaseName => "disease_name",
            ReplyBranch::Fallback => "fallback",
        }
    }
}

impl From<MatchPass> for ReplyBranch {
    fn from(pass: MatchPass) -> Self {
        match pass {
            MatchPass::Symptom => ReplyBranch::Symptom,
            MatchPass::DiseaseName => ReplyBranch::DiseaseName,
        }
    }
}

/// Answers user messages from the reference index, falling back to completion.
///
/// Holds only immutable state; share it behind an `Arc` across requests.
pub struct Assistant {
    matcher: Matcher,
    fallback: FallbackDelegate,
}

impl Assistant {
    /// Create an assistant
    pub fn new(matcher: Matcher, fallback: FallbackDelegate) -> Self {
        Self { matcher, fallback }
    }

    /// Matcher in use
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Fallback delegate in use
    pub fn fallback(&self) -> &FallbackDelegate {
        &self.fallback
    }

    /// Handle one message. Always produces a reply.
    pub async fn submit_message(&self, text: &str) -> String {
        self.respond(text).await.1
    }

    /// Handle one message, reporting which branch answered
    pub async fn respond(&self, text: &str) -> (ReplyBranch, String) {
        let normalized = NormalizedText::new(text);
        let index = self.matcher.index();

        let (branch, reply) = match self.matcher.match_text(&normalized) {
            MatchOutcome::Greeting => (ReplyBranch::Greeting, GREETING_REPLY.to_string()),
            MatchOutcome::Disease {
                key,
                pass: MatchPass::Symptom,
            } => (
                ReplyBranch::Symptom,
                format_symptom_reply(key, index.symptoms_of(key), index.precautions_of(key)),
            ),
            MatchOutcome::Disease {
                key,
                pass: MatchPass::DiseaseName,
            } => (
                ReplyBranch::DiseaseName,
                format_disease_name_reply(key, index.precautions_of(key)),
            ),
            MatchOutcome::NoMatch => (ReplyBranch::Fallback, self.fallback.answer(text).await),
        };

        debug!(branch = branch.as_str(), "Reply composed");
        metrics::counter!("assistant_replies_total", "branch" => branch.as_str()).increment(1);
        (branch, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{DISCLAIMER, GREETING_REPLY};
    use async_trait::async_trait;
    use fallback::{CompletionError, CompletionService, AI_ERROR_PREFIX};
    use matcher::MatcherConfig;
    use reference_index::{ColumnSchema, RawRow, ReferenceIndex};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Canned {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionService for Canned {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => Err(CompletionError::Connection("https://example.invalid".to_string())),
            }
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn row(disease: &str, symptoms: &[&str], precautions: &[&str]) -> RawRow {
        let mut raw = RawRow::new().with("Disease", Some(disease));
        for (i, s) in symptoms.iter().enumerate() {
            raw.push(&format!("Symptom_{}", i + 1), Some(s.to_string()));
        }
        for (i, p) in precautions.iter().enumerate() {
            raw.push(&format!("Precaution_{}", i + 1), Some(p.to_string()));
        }
        raw
    }

    fn assistant(reply: Option<&'static str>) -> (Assistant, Arc<Canned>) {
        let rows = [
            row("flu", &["fever", "cough"], &["rest", "hydrate"]),
            row("Common Cold", &["runny_nose"], &[]),
            row("Diabetes", &[], &["exercise", "follow diet"]),
        ];
        let index = Arc::new(ReferenceIndex::from_rows(&rows, &ColumnSchema::default()));
        let service = Arc::new(Canned {
            reply,
            calls: AtomicUsize::new(0),
        });
        let matcher = Matcher::new(index, MatcherConfig::default());
        let assistant = Assistant::new(matcher, FallbackDelegate::new(service.clone()));
        (assistant, service)
    }

    #[tokio::test]
    async fn test_greeting_tokens() {
        let (assistant, service) = assistant(Some("unused"));
        for token in ["hi", "hello", "hey", " Hello "] {
            assert_eq!(assistant.submit_message(token).await, GREETING_REPLY);
        }
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_flu_example() {
        let (assistant, _) = assistant(None);
        let (branch, reply) = assistant.respond("I have a fever").await;

        assert_eq!(branch, ReplyBranch::Symptom);
        assert!(reply.starts_with("Possible condition: Flu"));
        let symptoms_at = reply.find("1. fever").unwrap();
        assert!(reply.find("2. cough").unwrap() > symptoms_at);
        let rest_at = reply.find("1. rest").unwrap();
        assert!(rest_at > symptoms_at);
        assert!(reply.find("2. hydrate").unwrap() > rest_at);
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_symptom_without_precautions() {
        let (assistant, _) = assistant(None);
        let reply = assistant.submit_message("my RUNNY NOSE won't stop").await;

        assert!(reply.starts_with("Possible condition: Common Cold"));
        assert!(reply.contains("1. runny nose"));
        assert!(!reply.contains("Precautions"));
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_disease_name_reply_has_no_symptoms() {
        let (assistant, _) = assistant(None);
        let (branch, reply) = assistant.respond("what about diabetes?").await;

        assert_eq!(branch, ReplyBranch::DiseaseName);
        assert!(reply.starts_with("Precautions for Diabetes:"));
        assert!(reply.contains("1. exercise\n2. follow diet"));
        assert!(!reply.contains("Symptoms"));
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_symptom_precedence_over_name() {
        let (assistant, _) = assistant(None);
        let (branch, reply) = assistant.respond("diabetes and a cough").await;

        assert_eq!(branch, ReplyBranch::Symptom);
        assert!(reply.starts_with("Possible condition: Flu"));
    }

    #[tokio::test]
    async fn test_fallback_success_verbatim() {
        let (assistant, service) = assistant(Some("1. Walk daily\n2. Sleep 8 hours"));
        let (branch, reply) = assistant.respond("How to stay fit?").await;

        assert_eq!(branch, ReplyBranch::Fallback);
        assert_eq!(reply, "1. Walk daily\n2. Sleep 8 hours");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_is_error_reply() {
        let (assistant, service) = assistant(None);
        let reply = assistant.submit_message("How to stay fit?").await;

        assert!(!reply.is_empty());
        assert!(reply.starts_with(AI_ERROR_PREFIX));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_input_falls_back() {
        let (assistant, service) = assistant(Some("Ask me anything about health."));
        assert_eq!(assistant.submit_message("").await, "Ask me anything about health.");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_matched_branches_idempotent() {
        let (assistant, _) = assistant(None);
        for text in ["hi", "a bad cough", "diabetes"] {
            let first = assistant.submit_message(text).await;
            let second = assistant.submit_message(text).await;
            assert_eq!(first, second);
        }
    }
}
