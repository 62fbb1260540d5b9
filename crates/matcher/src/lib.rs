//! Query Matcher
//!
//! Decides whether a user utterance is a greeting, mentions a known symptom,
//! or names a known disease. Matching is plain substring containment with no
//! word-boundary checks, so "flu" also matches inside "influence".

mod config;
mod matcher;
mod normalize;

pub use config::MatcherConfig;
pub use matcher::{MatchOutcome, MatchPass, Matcher};
pub use normalize::{symptom_display, NormalizedText};
