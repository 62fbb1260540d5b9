//! Text Normalization

/// User text after lowercasing and trimming
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize raw user input
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Normalized text as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `needle` occurs anywhere in the text
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

/// Symptom as shown to users: underscores become spaces
pub fn symptom_display(symptom: &str) -> String {
    symptom.replace('_', " ")
}

/// Symptom form used for substring matching
pub(crate) fn symptom_needle(symptom: &str) -> String {
    symptom_display(symptom).to_lowercase()
}
