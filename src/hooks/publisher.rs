//! Publisher: owner of a callback table with synchronous fan-out

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::subscription::{Detach, Subscription};

type Callback<A> = Rc<dyn Fn(&A)>;

/// Callback table shared (weakly) with every outstanding subscription
struct Registry<A: ?Sized> {
    /// Last minted identifier; identifiers start at 1 and only grow
    next_id: u64,
    /// Ordered by identifier, which is subscription order
    callbacks: BTreeMap<u64, Callback<A>>,
}

impl<A: ?Sized> Detach for RefCell<Registry<A>> {
    fn detach(&self, id: u64) {
        // No registry borrow outlives a method of this module, and none is
        // held while callbacks run, so this cannot conflict. Drop the
        // callback after the borrow ends: it may own subscriptions to this
        // same publisher.
        let removed = self.borrow_mut().callbacks.remove(&id);
        drop(removed);
    }

    fn is_registered(&self, id: u64) -> bool {
        self.try_borrow()
            .map(|registry| registry.callbacks.contains_key(&id))
            .unwrap_or(false)
    }
}

/// A typed notification channel
///
/// Callbacks receive a shared reference to the notification argument `A`.
/// The publisher is the only strong owner of its callback table, so dropping
/// it makes every outstanding [`Subscription`] inert before any callback is
/// freed.
///
/// # Re-entrancy
///
/// [`notify`](Self::notify) snapshots the table before invoking anything:
/// - a callback subscribed during a pass does not run in that pass;
/// - a callback unsubscribed during a pass is skipped if it has not run yet;
/// - callbacks that already ran are unaffected.
pub struct Publisher<A: ?Sized> {
    registry: Rc<RefCell<Registry<A>>>,
}

impl<A: ?Sized + 'static> Publisher<A> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    /// Register `callback` under a fresh identifier
    pub fn subscribe(&self, callback: impl Fn(&A) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            registry.next_id += 1;
            let id = registry.next_id;
            registry.callbacks.insert(id, Rc::new(callback));
            id
        };
        tracing::trace!(id, "subscribed");

        let source: Weak<RefCell<Registry<A>>> = Rc::downgrade(&self.registry);
        let source: Weak<dyn Detach> = source;
        Subscription::new(id, source)
    }

    /// Invoke every registered callback in subscription order
    pub fn notify(&self, args: &A) {
        let snapshot: Vec<(u64, Callback<A>)> = self
            .registry
            .borrow()
            .callbacks
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if !self.registry.borrow().callbacks.contains_key(&id) {
                continue;
            }
            callback(args);
        }
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriber_count() == 0
    }
}

impl<A: ?Sized + 'static> Default for Publisher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for Publisher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Publisher");
        match self.registry.try_borrow() {
            Ok(registry) => out
                .field("subscribers", &registry.callbacks.len())
                .field("next_id", &registry.next_id),
            Err(_) => out.field("subscribers", &"<notifying>"),
        };
        out.finish()
    }
}
