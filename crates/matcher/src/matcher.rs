//! Two-Pass Matcher Implementation

use crate::config::MatcherConfig;
use crate::normalize::{symptom_needle, NormalizedText};
use reference_index::ReferenceIndex;
use std::sync::Arc;
use tracing::{debug, info};

/// Which pass produced a disease match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    /// A symptom of the disease occurs in the text
    Symptom,
    /// The disease name itself occurs in the text
    DiseaseName,
}

impl MatchPass {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPass::Symptom => "symptom",
            MatchPass::DiseaseName => "disease_name",
        }
    }
}

/// Result of matching one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    /// Text is exactly a greeting token
    Greeting,
    /// A disease matched
    Disease {
        /// Index key of the disease
        key: &'a str,
        /// Pass that matched
        pass: MatchPass,
    },
    /// Nothing matched; the caller should fall back
    NoMatch,
}

/// Matcher over an immutable reference index
pub struct Matcher {
    index: Arc<ReferenceIndex>,
    greetings: Vec<String>,
    /// Match forms of each entry's symptoms, aligned with index order
    needles: Vec<Vec<String>>,
}

impl Matcher {
    /// Create a matcher
    pub fn new(index: Arc<ReferenceIndex>, config: MatcherConfig) -> Self {
        let needles = index
            .symptoms()
            .map(|(_, symptoms)| symptoms.iter().map(|s| symptom_needle(s)).collect())
            .collect();
        let greetings = config
            .greetings
            .iter()
            .map(|g| g.trim().to_lowercase())
            .collect();

        info!("Creating matcher over {} diseases", index.len());
        Self {
            index,
            greetings,
            needles,
        }
    }

    /// Reference index in use
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Match normalized text. Greeting, then symptoms, then disease names.
    pub fn match_text(&self, text: &NormalizedText) -> MatchOutcome<'_> {
        if self.is_greeting(text) {
            return MatchOutcome::Greeting;
        }

        if let Some(key) = self.symptom_pass(text) {
            debug!("Symptom match: {}", key);
            return MatchOutcome::Disease {
                key,
                pass: MatchPass::Symptom,
            };
        }

        if let Some(key) = self.disease_name_pass(text) {
            debug!("Disease name match: {}", key);
            return MatchOutcome::Disease {
                key,
                pass: MatchPass::DiseaseName,
            };
        }

        MatchOutcome::NoMatch
    }

    fn is_greeting(&self, text: &NormalizedText) -> bool {
        self.greetings.iter().any(|g| g == text.as_str())
    }

    fn symptom_pass(&self, text: &NormalizedText) -> Option<&str> {
        self.index
            .symptoms()
            .zip(&self.needles)
            .find(|(_, needles)| needles.iter().any(|n| text.contains(n)))
            .map(|((key, _), _)| key)
    }

    fn disease_name_pass(&self, text: &NormalizedText) -> Option<&str> {
        self.index
            .precautions()
            .map(|(key, _)| key)
            .find(|key| text.contains(key))
    }
}
