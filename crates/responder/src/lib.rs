//! Responder
//!
//! Turns match outcomes into user-facing replies and runs the full
//! "submit message" flow: normalize, match, format or fall back.

mod assistant;
mod format;
mod templates;

pub use assistant::{Assistant, ReplyBranch};
pub use format::{format_disease_name_reply, format_symptom_reply, numbered_list, title_case};
pub use templates::{DISCLAIMER, GREETING_REPLY};
