//! CLI command implementations

pub mod config;
pub mod inspect;
pub mod new_room;
pub mod pick;
pub mod select;

use anyhow::{Context, Result};
use shatter_viewer::{Editor, EditorPrefs};
use std::path::PathBuf;

/// Layered preferences with an optional root override from the command line
pub(crate) fn load_prefs(root: Option<PathBuf>) -> Result<EditorPrefs> {
    let mut prefs = EditorPrefs::load().context("Failed to load preferences")?;
    if let Some(root) = root {
        prefs.root_dir = root;
    }
    Ok(prefs)
}

pub(crate) fn open_editor(root: Option<PathBuf>) -> Result<Editor> {
    Ok(Editor::new(load_prefs(root)?))
}
