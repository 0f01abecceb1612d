//! The document capability interface

use std::fmt;

use crate::hooks::Publisher;
use crate::keymap::{Chord, DocAction};

use super::events::{DocEvents, DocFlags};

/// Stable per-document handle
///
/// Handles are reused after a document closes, so they identify an open
/// document, not a document forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocHandle(pub usize);

impl fmt::Display for DocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One announcement: which document, and what changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocChange {
    pub doc: DocHandle,
    pub kinds: DocEvents,
}

/// Per-document notification channel
pub type DocHook = Publisher<DocChange>;

/// A document as seen by the event bus
///
/// Only the hook and a title are required. Every handler has a default
/// that does nothing and reports no change; handlers return the change
/// kinds the caller should announce.
pub trait Document {
    /// The channel that fires for this document only
    fn hook(&self) -> &DocHook;

    fn short_title(&self) -> String;

    fn long_title(&self) -> String {
        self.short_title()
    }

    fn display_flags(&self) -> DocFlags {
        DocFlags::empty()
    }

    /// A key press that resolved to an action
    fn handle_action(&mut self, _action: DocAction, _press: &Chord) -> DocEvents {
        DocEvents::empty()
    }

    /// A key press with no binding, to be treated as a character
    fn handle_char(&mut self, _press: &Chord) -> DocEvents {
        DocEvents::empty()
    }

    /// Write the document out; runs between the before- and after-save
    /// announcements
    fn handle_save(&mut self) -> DocEvents {
        DocEvents::empty()
    }

    fn handle_escape(&mut self) -> DocEvents {
        DocEvents::empty()
    }

    fn handle_fold(&mut self, _toggle: bool) -> DocEvents {
        DocEvents::empty()
    }

    /// Chance to veto closing; return false to keep the document open
    fn about_to_close(&mut self) -> bool {
        true
    }
}
