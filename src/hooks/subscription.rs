//! Subscription handle: owns exactly one registration in a publisher

use std::fmt;
use std::rc::Weak;

/// Removal side of a publisher, seen through a type-erased weak reference
pub(crate) trait Detach {
    fn detach(&self, id: u64);
    fn is_registered(&self, id: u64) -> bool;
}

/// Handle owning one callback registration
///
/// Dropping the handle removes the callback from its publisher, if the
/// publisher is still alive. A default-constructed subscription is empty and
/// dropping it does nothing.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
#[derive(Default)]
pub struct Subscription {
    slot: Option<(u64, Weak<dyn Detach>)>,
}

impl Subscription {
    pub(crate) fn new(id: u64, source: Weak<dyn Detach>) -> Self {
        Self {
            slot: Some((id, source)),
        }
    }

    /// An empty subscription that refers to nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Identifier of the registration, if this handle is not empty
    pub fn id(&self) -> Option<u64> {
        self.slot.as_ref().map(|(id, _)| *id)
    }

    /// Can this callback still be invoked?
    ///
    /// False for empty handles and once the publisher has been dropped.
    pub fn is_active(&self) -> bool {
        match &self.slot {
            Some((id, source)) => source
                .upgrade()
                .is_some_and(|source| source.is_registered(*id)),
            None => false,
        }
    }

    /// Remove the callback now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some((id, source)) = self.slot.take() else {
            return;
        };
        match source.upgrade() {
            Some(source) => {
                source.detach(id);
                tracing::trace!(id, "subscription released");
            }
            None => tracing::trace!(id, "subscription outlived its publisher"),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id())
            .field("active", &self.is_active())
            .finish()
    }
}
