//! Prompt template system for the Launchpad engine.
//!
//! This crate provides the templating pipeline for capability prompts:
//! - `{{name|type:prop}}` placeholder parsing into an input form model
//! - System variable resolution (date, time, user identity, clipboard)
//! - Form value merging back into the template text

pub mod merge;
pub mod parser;
pub mod system;
pub mod types;

// Re-export main types
pub use merge::{merge_values, with_knowledge_tags};
pub use parser::parse_variables;
pub use system::{
    Clock, ClipboardSource, SystemClipboard, SystemClock, SystemResolver, UserContext,
    CLIPBOARD_FALLBACK,
};
pub use types::{is_system_variable, FieldKind, InputVariable, VariableValue, SYSTEM_VARIABLES};
