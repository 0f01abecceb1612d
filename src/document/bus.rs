//! Document event bus: per-document channels plus one channel for all
//! documents, and the table of open documents

use slab::Slab;

use crate::hooks::Subscription;
use crate::keymap::{Chord, DocAction, KeyMapper};

use super::document::{DocChange, DocHandle, DocHook, Document};
use super::events::DocEvents;

/// Owner of the channel that fires for every document
///
/// Built once by the application and dropped at shutdown; subscriptions
/// that outlive it go inert.
#[derive(Debug, Default)]
pub struct DocumentBus {
    all_docs: DocHook,
}

impl DocumentBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to announcements from every document
    pub fn subscribe_all(&self, callback: impl Fn(&DocChange) + 'static) -> Subscription {
        self.all_docs.subscribe(callback)
    }

    pub fn all_docs(&self) -> &DocHook {
        &self.all_docs
    }

    /// Announce `kinds` for `doc`: its own channel first, then the global one
    ///
    /// An empty mask announces nothing and returns `false`. No validation is
    /// done on the combination of kinds.
    pub fn announce(&self, handle: DocHandle, doc: &dyn Document, kinds: DocEvents) -> bool {
        if kinds.is_empty() {
            return false;
        }
        let change = DocChange { doc: handle, kinds };
        tracing::trace!(doc = %handle, kinds = ?kinds, "announce");
        doc.hook().notify(&change);
        self.all_docs.notify(&change);
        true
    }
}

/// Open documents, addressed by reusable handles
pub struct Documents {
    docs: Slab<Box<dyn Document>>,
    bus: DocumentBus,
}

impl Documents {
    pub fn new() -> Self {
        Self::with_bus(DocumentBus::new())
    }

    pub fn with_bus(bus: DocumentBus) -> Self {
        Self {
            docs: Slab::new(),
            bus,
        }
    }

    pub fn bus(&self) -> &DocumentBus {
        &self.bus
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn contains(&self, handle: DocHandle) -> bool {
        self.docs.contains(handle.0)
    }

    pub fn handles(&self) -> impl Iterator<Item = DocHandle> + '_ {
        self.docs.iter().map(|(key, _)| DocHandle(key))
    }

    pub fn get(&self, handle: DocHandle) -> Option<&dyn Document> {
        let doc: &dyn Document = &**self.docs.get(handle.0)?;
        Some(doc)
    }

    pub fn get_mut(&mut self, handle: DocHandle) -> Option<&mut dyn Document> {
        let doc: &mut dyn Document = &mut **self.docs.get_mut(handle.0)?;
        Some(doc)
    }

    /// Add a document and announce it as opened
    pub fn open(&mut self, doc: Box<dyn Document>) -> DocHandle {
        let handle = DocHandle(self.docs.insert(doc));
        tracing::debug!(doc = %handle, "document opened");
        self.announce(handle, DocEvents::OPENED);
        handle
    }

    /// Close a document unless it vetoes
    ///
    /// Returns true if the document was closed.
    pub fn close(&mut self, handle: DocHandle) -> bool {
        let Some(doc) = self.docs.get_mut(handle.0) else {
            return false;
        };
        if !doc.about_to_close() {
            tracing::debug!(doc = %handle, "close vetoed");
            return false;
        }
        self.remove(handle).is_some()
    }

    /// Announce closing and take the document out of the table
    ///
    /// The handle becomes free for reuse. Dropping the returned document
    /// drops its channel; subscriptions to it go inert.
    pub fn remove(&mut self, handle: DocHandle) -> Option<Box<dyn Document>> {
        self.announce(handle, DocEvents::CLOSING);
        let doc = self.docs.try_remove(handle.0)?;
        tracing::debug!(doc = %handle, "document closed");
        Some(doc)
    }

    /// Subscribe to one document's announcements
    pub fn subscribe(
        &self,
        handle: DocHandle,
        callback: impl Fn(&DocChange) + 'static,
    ) -> Option<Subscription> {
        Some(self.get(handle)?.hook().subscribe(callback))
    }

    pub fn subscribe_all(&self, callback: impl Fn(&DocChange) + 'static) -> Subscription {
        self.bus.subscribe_all(callback)
    }

    /// Announce `kinds` for an open document
    ///
    /// Empty masks and unknown handles announce nothing; returns whether an
    /// announcement was made.
    pub fn announce(&self, handle: DocHandle, kinds: DocEvents) -> bool {
        let Some(doc) = self.get(handle) else {
            return false;
        };
        self.bus.announce(handle, doc, kinds)
    }

    /// Route a key press to a document
    ///
    /// A press that resolves to an action goes to `handle_action`, anything
    /// else to `handle_char`. Whatever the document reports is announced.
    pub fn handle_key(
        &mut self,
        handle: DocHandle,
        mapper: &KeyMapper<DocAction>,
        press: Chord,
    ) -> Option<DocEvents> {
        let doc = self.docs.get_mut(handle.0)?;
        let kinds = match mapper.lookup(&press) {
            Some(action) => {
                tracing::trace!(doc = %handle, %action, "key resolved");
                doc.handle_action(action, &press)
            }
            None => doc.handle_char(&press),
        };
        self.announce(handle, kinds);
        Some(kinds)
    }

    /// Save a document, announcing before and after
    pub fn save(&mut self, handle: DocHandle) -> Option<DocEvents> {
        if !self.announce(handle, DocEvents::BEFORE_SAVE) {
            return None;
        }
        let kinds = self.docs.get_mut(handle.0)?.handle_save() | DocEvents::AFTER_SAVE;
        self.announce(handle, kinds);
        Some(kinds)
    }
}

impl Default for Documents {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Documents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Documents")
            .field("open", &self.docs.len())
            .field("bus", &self.bus)
            .finish()
    }
}
