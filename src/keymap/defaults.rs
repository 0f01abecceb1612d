//! Default keybindings and the editor's pair of key mappers
//!
//! Defaults ship as `keymap.yaml` at the project root, embedded at compile
//! time. A user file at `~/.config/docbus/keymap.yaml` overrides them per
//! action.

use super::action::DocAction;
use super::config::{load_keymap_file_for, parse_keymap_yaml_for, KeyBindings, KeySpec};
use super::keymap::KeyMapper;
use super::types::Platform;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Bindings installed on the main mapper before any configured ones
const FIXED_MAIN_BINDINGS: [(&str, DocAction); 8] = [
    ("Left", DocAction::MoveLeft),
    ("Right", DocAction::MoveRight),
    ("Up", DocAction::MoveUp),
    ("Down", DocAction::MoveDown),
    ("Ctrl-Up", DocAction::SkipUp),
    ("Ctrl-Down", DocAction::SkipDown),
    ("PageUp", DocAction::MovePageUp),
    ("PageDown", DocAction::MovePageDown),
];

/// The embedded default YAML source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Embedded defaults for `platform`
///
/// Falls back to [`builtin_bindings`] if the embedded YAML fails to parse.
pub fn default_bindings_for(platform: Platform) -> KeyBindings {
    match parse_keymap_yaml_for(DEFAULT_KEYMAP_YAML, platform) {
        Ok(bindings) => bindings,
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymap: {}, using builtin defaults", e);
            builtin_bindings()
        }
    }
}

pub fn default_bindings() -> KeyBindings {
    default_bindings_for(Platform::current())
}

/// Hardcoded bindings used when the embedded YAML is unusable
pub fn builtin_bindings() -> KeyBindings {
    KeyBindings {
        main: vec![
            KeySpec::new(DocAction::MoveHome, "Home"),
            KeySpec::new(DocAction::MoveEnd, "End"),
            KeySpec::new(DocAction::DeleteForward, "Delete"),
        ],
        navigation: vec![
            KeySpec::new(DocAction::MoveLeft, "H"),
            KeySpec::new(DocAction::MoveRight, "L"),
            KeySpec::new(DocAction::MoveDown, "J"),
            KeySpec::new(DocAction::MoveUp, "K"),
        ],
    }
}

/// Load and merge bindings: embedded defaults + user overrides
///
/// A missing user file is normal; an unreadable or invalid one is logged
/// and ignored.
pub fn load_bindings() -> KeyBindings {
    load_bindings_for(Platform::current())
}

/// [`load_bindings`] with the platform filter and defaults of `platform`
pub fn load_bindings_for(platform: Platform) -> KeyBindings {
    let defaults = default_bindings_for(platform);

    let Some(path) = crate::config_paths::keymap_file() else {
        tracing::debug!("No config directory available, using default keymap");
        return defaults;
    };

    if !path.exists() {
        tracing::debug!("No user keymap at {}, using defaults", path.display());
        return defaults;
    }

    match load_keymap_file_for(&path, platform) {
        Ok(user) => {
            tracing::info!(
                "Loaded user keymap from {} ({} main, {} navigation entries)",
                path.display(),
                user.main.len(),
                user.navigation.len()
            );
            defaults.merge(user)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap at {}: {}", path.display(), e);
            defaults
        }
    }
}

/// The editor's key mappers: one for editing, one for navigation mode
#[derive(Debug, Clone)]
pub struct Keymaps {
    pub main: KeyMapper<DocAction>,
    pub navigation: KeyMapper<DocAction>,
}

impl Keymaps {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            main: KeyMapper::for_platform(platform),
            navigation: KeyMapper::for_platform(platform),
        }
    }

    /// Build from embedded defaults and the user's keymap file
    pub fn load_default() -> Self {
        Self::load_for(Platform::current())
    }

    /// [`load_default`](Self::load_default) for another platform's vocabulary
    pub fn load_for(platform: Platform) -> Self {
        let mut keymaps = Self::for_platform(platform);
        let report = keymaps.reload(&load_bindings_for(platform));
        if !report.is_empty() {
            tracing::warn!("Invalid key bindings:\n{}", report.trim_end());
        }
        keymaps
    }

    /// Clear both mappers and install `bindings`
    ///
    /// Returns the combined failure report of every rejected chord, one per
    /// line; empty when everything was bound.
    pub fn reload(&mut self, bindings: &KeyBindings) -> String {
        self.main.clear();
        self.navigation.clear();

        let mut report = String::new();
        for (key, action) in FIXED_MAIN_BINDINGS {
            report += &self.main.add_keys_safe(key, action);
        }
        for spec in &bindings.main {
            report += &self.main.add_keys_safe(&spec.keys, spec.action);
        }
        for spec in &bindings.navigation {
            report += &self.navigation.add_keys_safe(&spec.keys, spec.action);
        }

        tracing::debug!(
            main = self.main.len(),
            navigation = self.navigation.len(),
            "keymaps reloaded"
        );
        report
    }
}

impl Default for Keymaps {
    fn default() -> Self {
        Self::new()
    }
}
