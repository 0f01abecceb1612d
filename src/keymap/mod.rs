//! Configurable chord-to-action resolution
//!
//! This module provides a data-driven keybinding system that:
//! - Parses chord descriptions such as `Ctrl-Shift-S` or `Home|Ctrl-A`
//! - Files bindings under six modifier classes and resolves key presses
//!   narrowest class first
//! - Handles platform-specific modifier names (Cmd on macOS)
//! - Loads defaults and user overrides from YAML files
//!
//! # Architecture
//!
//! ```text
//! key press → Chord → KeyMapper::lookup() → Some(DocAction) | None (plain char)
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults merged with ~/.config/docbus/keymap.yaml
//! let keymaps = Keymaps::load_default();
//!
//! // Or build a mapper by hand
//! let mut mapper = KeyMapper::new();
//! let failures = mapper.add_keys("Home|Ctrl-A", DocAction::MoveHome);
//! ```

mod action;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod parser;
mod types;

pub use action::DocAction;
pub use config::{
    load_keymap_file, load_keymap_file_for, parse_keymap_yaml, parse_keymap_yaml_for,
    BindingConfig, KeyBindings, KeySpec, KeymapConfig, KeymapError,
};
pub use defaults::{
    builtin_bindings, default_bindings, default_bindings_for, get_default_keymap_yaml,
    load_bindings, load_bindings_for, Keymaps,
};
pub use keymap::{BindingFailure, KeyMapper, ModifierClass};
pub use parser::{alternatives, parse_chord, parse_chord_for, parse_chords_for, ChordError};
pub use types::{Chord, KeyCode, Modifier, Modifiers, Platform};
