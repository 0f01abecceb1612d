//! docbus - document change notifications and key chord resolution
//!
//! This crate provides lifetime-safe publish/subscribe channels, a
//! document event bus built on them, and a configurable key mapper that
//! turns key presses into document actions.

pub mod cli;
pub mod config_paths;
pub mod document;
pub mod hooks;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use document::{DocChange, DocEvents, DocHandle, Document, DocumentBus, Documents};
pub use hooks::{Publisher, Subscription};
pub use keymap::{Chord, DocAction, KeyMapper, Keymaps};
