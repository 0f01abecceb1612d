//! Document change announcements
//!
//! Every document owns a [`DocHook`] that fires for that document only.
//! A [`DocumentBus`] owns one more channel that fires for every document.
//! Announcing a change notifies the document's own channel first and the
//! global one second, with the same [`DocChange`] payload.
//!
//! [`Documents`] keeps the open documents behind reusable [`DocHandle`]s
//! and drives announcements for opening, closing, saving and key input.
//! [`ScriptBridge`] forwards save and newline announcements to named
//! script handlers.

mod bus;
#[allow(clippy::module_inception)]
mod document;
mod events;
mod script;

pub use bus::{DocumentBus, Documents};
pub use document::{DocChange, DocHandle, DocHook, Document};
pub use events::{DocEvents, DocFlags};
pub use script::{HandlerFailure, ScriptBridge, ScriptEvent, ScriptHost, ScriptReport};
