//! docbus: inspect and validate key bindings

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use docbus::cli::{check_bindings, list_bindings, resolve_chord, select_mapper, CliArgs, Command};
use docbus::config_paths;
use docbus::keymap::{load_keymap_file_for, Keymaps, Platform};

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    docbus::tracing::init();

    let platform = args.platform();
    tracing::debug!(platform = platform.name(), command = ?args.command, "starting");

    match &args.command {
        Command::Check { file } => {
            let path = match file {
                Some(path) => path.clone(),
                None => config_paths::keymap_file().context("No config directory available")?,
            };
            check(&path, platform)
        }
        Command::Resolve { chord, navigation } => {
            let keymaps = Keymaps::load_for(platform);
            let action = resolve_chord(select_mapper(&keymaps, *navigation), chord)
                .with_context(|| format!("Invalid chord '{}'", chord))?;
            match action {
                Some(action) => println!("{}", action),
                None => println!("unbound"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Bindings { navigation } => {
            let keymaps = Keymaps::load_for(platform);
            for line in list_bindings(select_mapper(&keymaps, *navigation)) {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Paths => {
            print_path("config", config_paths::config_dir().as_deref());
            print_path("keymap", config_paths::keymap_file().as_deref());
            print_path("log", config_paths::log_file().as_deref());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(path: &Path, platform: Platform) -> Result<ExitCode> {
    let bindings = load_keymap_file_for(path, platform)
        .with_context(|| format!("Failed to load keymap {}", path.display()))?;

    let problems = check_bindings(&bindings, platform);
    if problems.is_empty() {
        println!(
            "{}: ok ({} main, {} navigation entries)",
            path.display(),
            bindings.main.len(),
            bindings.navigation.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    for problem in &problems {
        println!("{}", problem);
    }
    Ok(ExitCode::FAILURE)
}

fn print_path(label: &str, path: Option<&Path>) {
    match path {
        Some(path) => println!("{:<8}{}", label, path.display()),
        None => println!("{:<8}(unavailable)", label),
    }
}
