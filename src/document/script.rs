//! Bridge from document announcements to named script handlers
//!
//! Scripts register handler ids for a small set of events. Each
//! announcement carrying one of those events calls every registered
//! handler with the document handle; failures are collected and delivered
//! as a single report per announcement.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::hooks::Subscription;

use super::bus::DocumentBus;
use super::document::{DocChange, DocHandle};
use super::events::DocEvents;

/// Announcement kinds scripts can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptEvent {
    BeforeSave,
    AfterSave,
    Newline,
}

impl ScriptEvent {
    /// Dispatch order within one announcement
    pub const ALL: [ScriptEvent; 3] = [Self::BeforeSave, Self::AfterSave, Self::Newline];

    pub fn name(self) -> &'static str {
        match self {
            Self::BeforeSave => "before_save",
            Self::AfterSave => "after_save",
            Self::Newline => "newline",
        }
    }

    pub fn kind(self) -> DocEvents {
        match self {
            Self::BeforeSave => DocEvents::BEFORE_SAVE,
            Self::AfterSave => DocEvents::AFTER_SAVE,
            Self::Newline => DocEvents::NEWLINE,
        }
    }
}

impl fmt::Display for ScriptEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptEvent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or(())
    }
}

/// Whatever runs script handlers
pub trait ScriptHost {
    /// Call the handler registered under `handler` with the document handle
    fn call_handler(&mut self, handler: &str, doc: DocHandle) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub event: ScriptEvent,
    pub handler: String,
    pub message: String,
}

/// Failures from one announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub doc: DocHandle,
    pub failures: Vec<HandlerFailure>,
}

impl fmt::Display for ScriptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script errors in document {}:", self.doc)?;
        for failure in &self.failures {
            write!(
                f,
                "\n  {} handler '{}': {}",
                failure.event, failure.handler, failure.message
            )?;
        }
        Ok(())
    }
}

type HandlerTable = HashMap<ScriptEvent, Vec<String>>;

/// Script handlers attached to a [`DocumentBus`]
///
/// Dropping the bridge detaches it from the bus.
pub struct ScriptBridge {
    handlers: Rc<RefCell<HandlerTable>>,
    subscription: Subscription,
}

impl ScriptBridge {
    pub fn attach<H, F>(bus: &DocumentBus, host: Rc<RefCell<H>>, feedback: F) -> Self
    where
        H: ScriptHost + 'static,
        F: Fn(&ScriptReport) + 'static,
    {
        let handlers: Rc<RefCell<HandlerTable>> = Rc::default();
        let table = Rc::clone(&handlers);
        let subscription = bus.subscribe_all(move |change: &DocChange| {
            // Snapshot so handlers can register more without a live borrow
            let calls: Vec<(ScriptEvent, String)> = {
                let table = table.borrow();
                let mut calls = Vec::new();
                for event in ScriptEvent::ALL {
                    if !change.kinds.contains(event.kind()) {
                        continue;
                    }
                    for handler in table.get(&event).into_iter().flatten() {
                        calls.push((event, handler.clone()));
                    }
                }
                calls
            };
            if calls.is_empty() {
                return;
            }

            let mut failures = Vec::new();
            for (event, handler) in calls {
                let result = match host.try_borrow_mut() {
                    Ok(mut host) => host.call_handler(&handler, change.doc),
                    Err(_) => Err("script host is already running a handler".to_string()),
                };
                if let Err(message) = result {
                    failures.push(HandlerFailure {
                        event,
                        handler,
                        message,
                    });
                }
            }

            if !failures.is_empty() {
                let report = ScriptReport {
                    doc: change.doc,
                    failures,
                };
                tracing::warn!("{}", report);
                feedback(&report);
            }
        });

        Self {
            handlers,
            subscription,
        }
    }

    /// Register `handler` for `event`; handlers run in registration order
    pub fn register(&self, event: ScriptEvent, handler: impl Into<String>) {
        let handler = handler.into();
        tracing::debug!(%event, handler = %handler, "script handler registered");
        self.handlers
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(handler);
    }

    /// Register by event name; returns false for an unknown name
    pub fn register_named(&self, event: &str, handler: impl Into<String>) -> bool {
        match event.parse::<ScriptEvent>() {
            Ok(event) => {
                self.register(event, handler);
                true
            }
            Err(()) => {
                tracing::warn!(event, "unknown script event");
                false
            }
        }
    }

    pub fn handlers(&self, event: ScriptEvent) -> Vec<String> {
        self.handlers
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().values().map(Vec::len).sum()
    }

    /// Forget every registered handler, e.g. before scripts are reloaded
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    /// False once the bus this bridge attached to is gone
    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }
}

impl fmt::Debug for ScriptBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptBridge")
            .field("handlers", &self.handler_count())
            .field("subscription", &self.subscription)
            .finish()
    }
}
