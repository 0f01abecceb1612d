//! Chord description parser
//!
//! A description is a `-`-separated list of segments, matched
//! case-insensitively: modifier names (see [`Platform::modifier_name`]),
//! symbolic key names (`left`, `pageup`, `tab`, ...) or a single literal
//! character. Alternatives for the same action are separated by `|`.

use std::fmt;

use super::types::{Chord, KeyCode, Modifier, Modifiers, Platform};

const SEGMENT_DELIMITER: char = '-';
const ALTERNATIVE_DELIMITER: char = '|';

/// Why a chord description was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// The description is empty
    Empty,
    /// Two delimiters in a row, or a leading/trailing delimiter
    EmptySegment,
    /// A segment that is neither a modifier, a key name nor one character
    UnknownKey(String),
    /// The same modifier was named twice
    DuplicateModifier(Modifier),
    /// More than one base key
    MultipleKeys,
    /// Only modifiers, no key
    NoKey,
}

impl fmt::Display for ChordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordError::Empty => write!(f, "empty key description"),
            ChordError::EmptySegment => write!(f, "empty segment between '-' delimiters"),
            ChordError::UnknownKey(k) => write!(f, "unknown key '{}'", k),
            ChordError::DuplicateModifier(m) => write!(f, "modifier {:?} given more than once", m),
            ChordError::MultipleKeys => write!(f, "more than one key in a single chord"),
            ChordError::NoKey => write!(f, "no key, only modifiers"),
        }
    }
}

impl std::error::Error for ChordError {}

/// Parse a chord description using the current platform's modifier names
pub fn parse_chord(text: &str) -> Result<Chord, ChordError> {
    parse_chord_for(text, Platform::current())
}

/// Parse a chord description using `platform`'s modifier names
pub fn parse_chord_for(text: &str, platform: Platform) -> Result<Chord, ChordError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ChordError::Empty);
    }

    let lower = text.to_lowercase();
    let mut mods = Modifiers::NONE;
    let mut key = None;

    for segment in lower.split(SEGMENT_DELIMITER) {
        if segment.is_empty() {
            return Err(ChordError::EmptySegment);
        }

        if let Some(modifier) = platform.modifier_named(segment) {
            if mods.contains(modifier.flag()) {
                return Err(ChordError::DuplicateModifier(modifier));
            }
            mods = mods | modifier.flag();
            continue;
        }

        let code = KeyCode::named(segment)
            .or_else(|| single_char(segment).map(KeyCode::Char))
            .ok_or_else(|| ChordError::UnknownKey(segment.to_string()))?;

        if key.replace(code).is_some() {
            return Err(ChordError::MultipleKeys);
        }
    }

    key.map(|key| Chord::new(key, mods)).ok_or(ChordError::NoKey)
}

fn single_char(segment: &str) -> Option<char> {
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\0' => Some(c),
        _ => None,
    }
}

/// Split a `|`-separated list into trimmed, non-empty alternatives
pub fn alternatives(text: &str) -> impl Iterator<Item = &str> {
    text.split(ALTERNATIVE_DELIMITER)
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
}

/// Parse every alternative independently
pub fn parse_chords_for(text: &str, platform: Platform) -> Vec<(&str, Result<Chord, ChordError>)> {
    alternatives(text)
        .map(|alt| (alt, parse_chord_for(alt, platform)))
        .collect()
}
