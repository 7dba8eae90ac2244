//! Preference commands

use anyhow::{Context, Result};
use clap::Subcommand;
use shatter_viewer::{EditorPrefs, PrefsFile};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective preferences after layering
    Show,

    /// Set a key in the project-local preferences file
    Set {
        /// Dotted key, e.g. camera.fov
        key: String,

        value: String,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let prefs = EditorPrefs::load().context("Failed to load preferences")?;
    let text = toml::to_string_pretty(&prefs).context("Failed to format preferences")?;
    print!("{}", text);

    if let Some(global) = EditorPrefs::global_config_path() {
        println!("\n# global: {}", global.display());
    }
    println!("# project: {}", EditorPrefs::local_config_path().display());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = EditorPrefs::local_config_path();
    let mut file = if path.exists() {
        PrefsFile::load(&path).with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        PrefsFile::default()
    };

    file.set(key, value)?;
    EditorPrefs::resolve(file.clone()).context("Preferences would be invalid")?;
    file.save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Set {} = {} in {}", key, value, path.display());
    Ok(())
}
