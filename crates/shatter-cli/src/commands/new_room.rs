//! Room script generation command

use anyhow::{Context, Result};
use shatter_scene::{generate_room_script, write_room_script, Project, RoomScriptOptions};
use std::path::PathBuf;

pub struct NewRoomArgs {
    pub root: Option<PathBuf>,
    pub name: String,
    pub segments: Vec<String>,
    pub output: Option<PathBuf>,
    pub start: Option<String>,
    pub door: Option<String>,
    pub length: Option<u32>,
}

pub fn run(args: NewRoomArgs) -> Result<()> {
    let mut options = RoomScriptOptions::default();
    if let Some(start) = args.start {
        options.start_segment = start;
    }
    if let Some(door) = args.door {
        options.door_segment = door;
    }
    if let Some(length) = args.length {
        options.target_length = length;
    }

    if args.segments.is_empty() {
        log::warn!("Room '{}' registers no segments", args.name);
    }

    let path = match args.output {
        Some(path) if path.as_os_str() == "-" => {
            print!("{}", generate_room_script(&args.segments, &options));
            return Ok(());
        }
        Some(path) => path,
        None => {
            let prefs = super::load_prefs(args.root)?;
            Project::with_templates(prefs.root_dir, Default::default()).room_path(&args.name)
        }
    };

    if path.exists() {
        anyhow::bail!("Room script already exists: {}", path.display());
    }

    write_room_script(&path, &args.segments, &options)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created room script: {}", path.display());
    Ok(())
}
