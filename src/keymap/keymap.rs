//! KeyMapper: six modifier-class tables from key code to action

use std::collections::HashMap;
use std::fmt;

use super::parser::{alternatives, parse_chord_for, ChordError};
use super::types::{Chord, KeyCode, Modifiers, Platform};

/// The modifier combination a binding is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierClass {
    MetaShift,
    CtrlShift,
    Meta,
    Ctrl,
    Alt,
    /// No modifier, or shift alone
    Plain,
}

impl ModifierClass {
    pub const ALL: [ModifierClass; 6] = [
        ModifierClass::MetaShift,
        ModifierClass::CtrlShift,
        ModifierClass::Meta,
        ModifierClass::Ctrl,
        ModifierClass::Alt,
        ModifierClass::Plain,
    ];

    /// Class a binding with `mods` is stored in
    ///
    /// Shift only counts together with meta or ctrl; meta and ctrl win
    /// over alt.
    pub fn of(mods: Modifiers) -> Self {
        if mods.shift() && mods.meta() {
            ModifierClass::MetaShift
        } else if mods.shift() && mods.ctrl() {
            ModifierClass::CtrlShift
        } else if mods.meta() {
            ModifierClass::Meta
        } else if mods.ctrl() {
            ModifierClass::Ctrl
        } else if mods.alt() {
            ModifierClass::Alt
        } else {
            ModifierClass::Plain
        }
    }

    /// Classes tried when resolving a key pressed with `mods`, narrowest first
    pub fn lookup_order(mods: Modifiers) -> impl Iterator<Item = ModifierClass> {
        [
            (ModifierClass::MetaShift, mods.meta() && mods.shift()),
            (ModifierClass::Meta, mods.meta()),
            (ModifierClass::CtrlShift, mods.ctrl() && mods.shift()),
            (ModifierClass::Ctrl, mods.ctrl()),
            (ModifierClass::Alt, mods.alt()),
            (ModifierClass::Plain, true),
        ]
        .into_iter()
        .filter_map(|(class, applies)| applies.then_some(class))
    }

    /// Modifiers that select this class
    ///
    /// Plain bindings may also have been written with shift alone.
    pub fn modifiers(self) -> Modifiers {
        match self {
            ModifierClass::MetaShift => Modifiers::META | Modifiers::SHIFT,
            ModifierClass::CtrlShift => Modifiers::CTRL | Modifiers::SHIFT,
            ModifierClass::Meta => Modifiers::META,
            ModifierClass::Ctrl => Modifiers::CTRL,
            ModifierClass::Alt => Modifiers::ALT,
            ModifierClass::Plain => Modifiers::NONE,
        }
    }

    const fn index(self) -> usize {
        match self {
            ModifierClass::MetaShift => 0,
            ModifierClass::CtrlShift => 1,
            ModifierClass::Meta => 2,
            ModifierClass::Ctrl => 3,
            ModifierClass::Alt => 4,
            ModifierClass::Plain => 5,
        }
    }
}

/// One rejected alternative of a batch add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFailure {
    /// The alternative as written
    pub chord: String,
    pub error: ChordError,
}

impl fmt::Display for BindingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid key '{}': {}", self.chord, self.error)
    }
}

impl std::error::Error for BindingFailure {}

/// Layered binding table from chord to action
///
/// A later binding for the same modifier class and key replaces the
/// earlier one. Lookups never fail: `None` means "no binding, treat as a
/// plain character".
#[derive(Debug, Clone)]
pub struct KeyMapper<A> {
    platform: Platform,
    tables: [HashMap<KeyCode, A>; 6],
}

impl<A: Copy> KeyMapper<A> {
    /// Empty mapper parsing descriptions with the current platform's names
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            tables: Default::default(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Bind an already parsed chord, returning the binding it replaced
    pub fn add_chord(&mut self, chord: Chord, action: A) -> Option<A> {
        let class = ModifierClass::of(chord.mods);
        self.tables[class.index()].insert(chord.key.normalized(), action)
    }

    /// Bind a single chord description
    pub fn add_key(&mut self, key: &str, action: A) -> Result<Chord, BindingFailure> {
        let chord = parse_chord_for(key, self.platform).map_err(|error| BindingFailure {
            chord: key.trim().to_string(),
            error,
        })?;
        self.add_chord(chord, action);
        Ok(chord)
    }

    /// Bind every `|`-separated alternative
    ///
    /// Invalid alternatives are skipped and reported; the rest are bound.
    pub fn add_keys(&mut self, keys: &str, action: A) -> Vec<BindingFailure> {
        let mut failures = Vec::new();
        for alt in alternatives(keys) {
            if let Err(failure) = self.add_key(alt, action) {
                tracing::debug!("{}", failure);
                failures.push(failure);
            }
        }
        failures
    }

    /// Like [`add_keys`](Self::add_keys), reporting failures as text
    ///
    /// Returns one line per rejected alternative, or an empty string.
    pub fn add_keys_safe(&mut self, keys: &str, action: A) -> String {
        self.add_keys(keys, action)
            .iter()
            .map(|failure| format!("{}\n", failure))
            .collect()
    }

    /// Resolve a key press to an action
    ///
    /// Classes are tried narrowest first (meta+shift, meta, ctrl+shift,
    /// ctrl, alt, plain), so a ctrl+shift binding is never shadowed by a
    /// ctrl binding for the same key.
    pub fn resolve(&self, key: KeyCode, mods: Modifiers) -> Option<A> {
        let key = key.normalized();
        ModifierClass::lookup_order(mods)
            .find_map(|class| self.tables[class.index()].get(&key).copied())
    }

    pub fn lookup(&self, chord: &Chord) -> Option<A> {
        self.resolve(chord.key, chord.mods)
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        for table in &mut self.tables {
            table.clear();
        }
    }

    /// Total number of bindings across all classes
    pub fn len(&self) -> usize {
        self.tables.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(HashMap::is_empty)
    }

    /// All bindings, grouped by class in insertion-priority order
    pub fn bindings(&self) -> impl Iterator<Item = (ModifierClass, KeyCode, A)> + '_ {
        ModifierClass::ALL.into_iter().flat_map(move |class| {
            self.tables[class.index()]
                .iter()
                .map(move |(key, action)| (class, *key, *action))
        })
    }

    /// Check one description without touching any table
    pub fn is_valid(key: &str) -> bool {
        parse_chord_for(key, Platform::current()).is_ok()
    }

    /// Check every `|`-separated alternative without touching any table
    pub fn are_valid(keys: &str) -> bool {
        Self::validate(keys, Platform::current()).is_empty()
    }

    /// Failures `add_keys` would report for `keys`, without binding anything
    pub fn validate(keys: &str, platform: Platform) -> Vec<BindingFailure> {
        alternatives(keys)
            .filter_map(|alt| {
                parse_chord_for(alt, platform)
                    .err()
                    .map(|error| BindingFailure {
                        chord: alt.to_string(),
                        error,
                    })
            })
            .collect()
    }
}

impl<A: Copy> Default for KeyMapper<A> {
    fn default() -> Self {
        Self::new()
    }
}
