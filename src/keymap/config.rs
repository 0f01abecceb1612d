//! YAML configuration parsing for keymaps
//!
//! A keymap file is an ordered list of (action, chord alternatives) pairs
//! per mapper:
//!
//! ```yaml
//! bindings:
//!   - action: move_home
//!     keys: "Home|Ctrl-A"
//!     platform: linux
//! navigation:
//!   - action: move_left
//!     keys: "H"
//! ```

use std::path::Path;

use serde::Deserialize;

use super::action::DocAction;
use super::types::Platform;

/// Root structure of a keymap YAML file
#[derive(Debug, Default, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
    #[serde(default)]
    pub navigation: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub action: String,
    pub keys: String,
    #[serde(default)]
    pub platform: Option<String>,
}

/// An action with its `|`-separated chord alternatives, not yet parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub action: DocAction,
    pub keys: String,
}

impl KeySpec {
    pub fn new(action: DocAction, keys: impl Into<String>) -> Self {
        Self {
            action,
            keys: keys.into(),
        }
    }
}

/// Key specs for every mapper, filtered to one platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindings {
    pub main: Vec<KeySpec>,
    pub navigation: Vec<KeySpec>,
}

impl KeyBindings {
    /// Layer `overrides` on top of these bindings
    ///
    /// An action mentioned in an override section loses all of its
    /// bindings from that section here; the override entries are appended
    /// after the remaining ones.
    pub fn merge(self, overrides: KeyBindings) -> KeyBindings {
        KeyBindings {
            main: merge_specs(self.main, overrides.main),
            navigation: merge_specs(self.navigation, overrides.navigation),
        }
    }
}

fn merge_specs(base: Vec<KeySpec>, overrides: Vec<KeySpec>) -> Vec<KeySpec> {
    let mut merged: Vec<KeySpec> = base
        .into_iter()
        .filter(|spec| !overrides.iter().any(|o| o.action == spec.action))
        .collect();
    merged.extend(overrides);
    merged
}

/// Load key bindings for the current platform from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<KeyBindings, KeymapError> {
    load_keymap_file_for(path, Platform::current())
}

/// Load key bindings for `platform` from a YAML file
pub fn load_keymap_file_for(path: &Path, platform: Platform) -> Result<KeyBindings, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml_for(&content, platform)
}

/// Parse key bindings for the current platform from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<KeyBindings, KeymapError> {
    parse_keymap_yaml_for(yaml, Platform::current())
}

/// Parse key bindings for `platform` from a YAML string
///
/// Unknown action names are errors. Chord descriptions are kept as text and
/// only validated when installed, so one bad chord cannot reject a file.
pub fn parse_keymap_yaml_for(yaml: &str, platform: Platform) -> Result<KeyBindings, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    Ok(KeyBindings {
        main: resolve_entries(config.bindings, platform)?,
        navigation: resolve_entries(config.navigation, platform)?,
    })
}

fn resolve_entries(
    entries: Vec<BindingConfig>,
    platform: Platform,
) -> Result<Vec<KeySpec>, KeymapError> {
    let mut specs = Vec::with_capacity(entries.len());
    for entry in entries {
        // Skip if platform-specific and doesn't match
        if let Some(ref name) = entry.platform {
            if name != platform.name() {
                continue;
            }
        }

        let action = entry
            .action
            .parse::<DocAction>()
            .map_err(|_| KeymapError::InvalidAction(entry.action.clone()))?;
        specs.push(KeySpec::new(action, entry.keys));
    }
    Ok(specs)
}

/// Errors that can occur when loading keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidAction(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidAction(a) => write!(f, "Invalid action: {}", a),
        }
    }
}

impl std::error::Error for KeymapError {}
