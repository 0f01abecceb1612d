//! Thread-safe variant of [`Publisher`](super::Publisher)
//!
//! Same contract as the single-threaded channel: subscription order,
//! snapshot iteration, and inert subscriptions once the publisher is gone.
//! Liveness is an `Arc`/`Weak` pair and the callback table sits behind a
//! `parking_lot::Mutex`. The lock is never held while callbacks run, so a
//! callback may subscribe or unsubscribe on the same channel.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type SyncCallback<A> = Arc<dyn Fn(&A) + Send + Sync>;

struct SyncRegistry<A: ?Sized> {
    next_id: u64,
    callbacks: BTreeMap<u64, SyncCallback<A>>,
}

trait SyncDetach: Send + Sync {
    fn detach(&self, id: u64);
    fn is_registered(&self, id: u64) -> bool;
}

impl<A: ?Sized> SyncDetach for Mutex<SyncRegistry<A>> {
    fn detach(&self, id: u64) {
        let removed = self.lock().callbacks.remove(&id);
        drop(removed);
    }

    fn is_registered(&self, id: u64) -> bool {
        self.lock().callbacks.contains_key(&id)
    }
}

/// Notification channel that may be shared across threads
pub struct SyncPublisher<A: ?Sized> {
    registry: Arc<Mutex<SyncRegistry<A>>>,
}

impl<A: ?Sized + 'static> SyncPublisher<A> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(SyncRegistry {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&A) + Send + Sync + 'static) -> SyncSubscription {
        let id = {
            let mut registry = self.registry.lock();
            registry.next_id += 1;
            let id = registry.next_id;
            registry.callbacks.insert(id, Arc::new(callback));
            id
        };

        let source: Weak<Mutex<SyncRegistry<A>>> = Arc::downgrade(&self.registry);
        let source: Weak<dyn SyncDetach> = source;
        SyncSubscription {
            slot: Some((id, source)),
        }
    }

    /// Invoke every registered callback in subscription order on the
    /// calling thread
    pub fn notify(&self, args: &A) {
        let snapshot: Vec<(u64, SyncCallback<A>)> = self
            .registry
            .lock()
            .callbacks
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if !self.registry.lock().callbacks.contains_key(&id) {
                continue;
            }
            callback(args);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().callbacks.len()
    }
}

impl<A: ?Sized + 'static> Default for SyncPublisher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for SyncPublisher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncPublisher")
            .field("subscribers", &self.registry.lock().callbacks.len())
            .finish()
    }
}

/// Handle owning one registration in a [`SyncPublisher`]
#[must_use = "dropping a SyncSubscription immediately unsubscribes the callback"]
#[derive(Default)]
pub struct SyncSubscription {
    slot: Option<(u64, Weak<dyn SyncDetach>)>,
}

impl SyncSubscription {
    /// An empty subscription that refers to nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<u64> {
        self.slot.as_ref().map(|(id, _)| *id)
    }

    pub fn is_active(&self) -> bool {
        match &self.slot {
            Some((id, source)) => source
                .upgrade()
                .is_some_and(|source| source.is_registered(*id)),
            None => false,
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some((id, source)) = self.slot.take() {
            if let Some(source) = source.upgrade() {
                source.detach(id);
            }
        }
    }
}

impl Drop for SyncSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SyncSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}
