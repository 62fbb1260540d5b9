//! Canned Reply Text

/// Welcome menu returned for greetings
pub const GREETING_REPLY: &str = "👋 Welcome to Health Awareness Assistant!\n\n\
1. 📝 Check symptoms\n\
2. 🛡 Precautions\n\
3. ℹ General health tips\n\n\
How can I help you today?";

/// Closing line of every reference-based answer
pub const DISCLAIMER: &str = "This is awareness info only. Please consult a doctor.";
