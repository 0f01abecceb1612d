//! Command-line interface for inspecting key bindings
//!
//! Supports:
//! - Validating a keymap file
//! - Resolving a chord against the effective keymap
//! - Listing effective bindings
//! - Showing where config and logs live

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::keymap::{
    parse_chord_for, Chord, ChordError, DocAction, KeyBindings, KeyMapper, Keymaps, Platform,
};

/// Inspect and validate docbus key bindings
#[derive(Parser, Debug)]
#[command(name = "docbus", version, about = "Inspect and validate docbus key bindings")]
pub struct CliArgs {
    /// Modifier vocabulary and platform filter to use (default: this platform)
    #[arg(long, value_enum, global = true)]
    pub platform: Option<PlatformArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate a keymap file (default: the user keymap)
    Check {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the action a chord resolves to, or `unbound`
    Resolve {
        #[arg(value_name = "CHORD")]
        chord: String,

        /// Use the navigation keymap instead of the main one
        #[arg(short = 'n', long)]
        navigation: bool,
    },
    /// List the effective bindings
    Bindings {
        /// List the navigation keymap instead of the main one
        #[arg(short = 'n', long)]
        navigation: bool,
    },
    /// Show config and log locations
    Paths,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    Macos,
    Windows,
    Linux,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Macos => Platform::MacOs,
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::Linux => Platform::Linux,
        }
    }
}

impl CliArgs {
    pub fn platform(&self) -> Platform {
        self.platform.map(Platform::from).unwrap_or_else(Platform::current)
    }
}

/// One line per chord in `bindings` that would be rejected
pub fn check_bindings(bindings: &KeyBindings, platform: Platform) -> Vec<String> {
    let mut problems = Vec::new();
    for (name, specs) in [("bindings", &bindings.main), ("navigation", &bindings.navigation)] {
        for spec in specs {
            for failure in KeyMapper::<DocAction>::validate(&spec.keys, platform) {
                problems.push(format!("{}: {}: {}", name, spec.action, failure));
            }
        }
    }
    problems
}

/// Parse `chord` in the mapper's vocabulary and look it up
pub fn resolve_chord(
    mapper: &KeyMapper<DocAction>,
    chord: &str,
) -> Result<Option<DocAction>, ChordError> {
    let chord = parse_chord_for(chord, mapper.platform())?;
    Ok(mapper.lookup(&chord))
}

/// `chord<TAB>action` lines, sorted by chord description
pub fn list_bindings(mapper: &KeyMapper<DocAction>) -> Vec<String> {
    let mut lines: Vec<String> = mapper
        .bindings()
        .map(|(class, key, action)| {
            let chord = Chord::new(key, class.modifiers()).describe(mapper.platform());
            format!("{}\t{}", chord, action)
        })
        .collect();
    lines.sort();
    lines
}

/// The mapper a command addresses
pub fn select_mapper(keymaps: &Keymaps, navigation: bool) -> &KeyMapper<DocAction> {
    if navigation {
        &keymaps.navigation
    } else {
        &keymaps.main
    }
}
