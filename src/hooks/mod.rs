//! Typed, lifetime-safe publish/subscribe channels
//!
//! A [`Publisher`] owns a set of callbacks and fans a notification out to
//! them synchronously. Registering a callback hands back a [`Subscription`],
//! which owns that registration: dropping it removes the callback.
//!
//! # Lifetime safety
//!
//! Subscriptions never point at the publisher directly. The callback table
//! lives behind an `Rc` that only the publisher holds strongly; each
//! subscription keeps a `Weak` to it. Once the publisher is dropped the weak
//! reference stops upgrading *before* the callback storage is torn down, so a
//! subscription dropped afterwards (even one captured inside a callback that
//! is being freed) is a no-op.
//!
//! ```text
//! Publisher ──Rc──▶ Registry { next_id, BTreeMap<id, callback> }
//!                        ▲
//! Subscription ──Weak────┘   (detach on drop if still alive)
//! ```
//!
//! # Threading
//!
//! [`Publisher`] is `!Send`; everything happens on one thread. The
//! [`sync`] module carries the same contract across threads.

mod publisher;
mod subscription;
pub mod sync;

pub use publisher::Publisher;
pub use subscription::Subscription;

pub(crate) use subscription::Detach;

#[cfg(test)]
mod tests;
