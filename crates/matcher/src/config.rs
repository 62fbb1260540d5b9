//! Matcher configuration

use serde::{Deserialize, Serialize};

/// Matcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Exact tokens treated as greetings (compared after normalization)
    pub greetings: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            greetings: vec!["hi".to_string(), "hello".to_string(), "hey".to_string()],
        }
    }
}
