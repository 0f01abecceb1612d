//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use docbus::document::{DocChange, DocEvents, DocHandle, DocHook, Document, ScriptHost};
use docbus::keymap::{Chord, DocAction, KeyCode};

/// Everything a [`TextDoc`] was asked to do, shared with the test
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Minimal in-memory document
#[derive(Default)]
pub struct TextDoc {
    pub hook: DocHook,
    pub title: String,
    pub text: String,
    pub journal: Journal,
    pub veto_close: bool,
}

impl TextDoc {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_journal(title: &str, journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            ..Self::new(title)
        }
    }
}

impl Document for TextDoc {
    fn hook(&self) -> &DocHook {
        &self.hook
    }

    fn short_title(&self) -> String {
        self.title.clone()
    }

    fn handle_action(&mut self, action: DocAction, _press: &Chord) -> DocEvents {
        self.journal.borrow_mut().push(action.to_string());
        match action {
            DocAction::MovePageUp => DocEvents::CURSOR_MOVED | DocEvents::PAGE_UP,
            DocAction::MovePageDown => DocEvents::CURSOR_MOVED | DocEvents::PAGE_DOWN,
            DocAction::DeleteForward | DocAction::DeleteWord => {
                self.text.pop();
                DocEvents::EDITED | DocEvents::CURSOR_MOVED
            }
            _ => DocEvents::CURSOR_MOVED,
        }
    }

    fn handle_char(&mut self, press: &Chord) -> DocEvents {
        let KeyCode::Char(c) = press.key else {
            return DocEvents::empty();
        };
        if !press.mods.is_empty() && !press.mods.shift() {
            return DocEvents::empty();
        }
        self.text.push(c);
        self.journal.borrow_mut().push(format!("char {:?}", c));
        let kinds = DocEvents::EDITED | DocEvents::CURSOR_MOVED;
        if c == '\n' {
            kinds | DocEvents::NEWLINE
        } else {
            kinds
        }
    }

    fn handle_save(&mut self) -> DocEvents {
        self.journal.borrow_mut().push("save".to_string());
        DocEvents::CHANGED_STATE
    }

    fn about_to_close(&mut self) -> bool {
        !self.veto_close
    }
}

/// Shared log of every change a subscriber saw, tagged by subscriber
pub type ChangeLog = Rc<RefCell<Vec<(&'static str, DocChange)>>>;

pub fn change_log() -> ChangeLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A callback appending `(tag, change)` to `log`
pub fn recorder(log: &ChangeLog, tag: &'static str) -> impl Fn(&DocChange) + 'static {
    let log = Rc::clone(log);
    move |change| log.borrow_mut().push((tag, *change))
}

/// Kinds seen so far, in order
pub fn kinds(log: &ChangeLog) -> Vec<DocEvents> {
    log.borrow().iter().map(|(_, change)| change.kinds).collect()
}

/// Script host that records calls and fails handlers named `fail*`
#[derive(Default)]
pub struct RecordingHost {
    pub calls: Vec<(String, DocHandle)>,
}

impl ScriptHost for RecordingHost {
    fn call_handler(&mut self, handler: &str, doc: DocHandle) -> Result<(), String> {
        self.calls.push((handler.to_string(), doc));
        if handler.starts_with("fail") {
            Err(format!("{} raised an error", handler))
        } else {
            Ok(())
        }
    }
}
