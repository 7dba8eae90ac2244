//! Inspect command

use anyhow::{Context, Result};
use shatter_scene::{bounds, outline, Primitive, Scene, SceneKind};
use std::path::{Path, PathBuf};

pub fn run(root: Option<PathBuf>, kind: SceneKind, path: &Path, format: &str) -> Result<()> {
    let mut editor = super::open_editor(root)?;
    editor.open(kind, path);
    let state = editor.state();
    let scene = state.scene().context("No scene loaded")?;

    let output = match format {
        "text" => summary(scene, state.primitives()),
        "json" => serde_json::to_string_pretty(scene).context("Failed to serialize scene")?,
        "outline" => outline(scene).render(),
        "primitives" => serde_json::to_string_pretty(state.primitives())
            .context("Failed to serialize primitives")?,
        _ => anyhow::bail!("Unknown format: {}", format),
    };

    println!("{}", output);
    Ok(())
}

fn summary(scene: &Scene, primitives: &[Primitive]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Kind:   {}\n", scene.kind()));

    match scene {
        Scene::Segment(segment) => {
            out.push_str(&format!("Name:   {}\n", segment.name));
            out.push_str(&format!("Length: {}\n", segment.length()));
            out.push_str(&format!("Obstacles: {}\n", segment.obstacles.len()));
        }
        Scene::Room(room) => {
            out.push_str(&format!("Name:   {}\n", room.name));
            out.push_str(&format!("Segments: {}\n", room.segments.len()));
            for segment in &room.segments {
                out.push_str(&format!(
                    "  {:<24} offset {:>8.2}  length {:>6.2}\n",
                    segment.name,
                    segment.offset,
                    segment.length()
                ));
            }
            let fog = room.fog;
            out.push_str(&format!(
                "Fog:    lower ({:.2}, {:.2}, {:.2})  upper ({:.2}, {:.2}, {:.2})\n",
                fog.lower.r, fog.lower.g, fog.lower.b, fog.upper.r, fog.upper.g, fog.upper.b
            ));
        }
        Scene::Level(level) => {
            out.push_str(&format!("Name:   {}\n", level.name));
            out.push_str(&format!("Rooms:  {}\n", level.rooms.len()));
            for room in &level.rooms {
                out.push_str(&format!(
                    "  {:<24} offset {:>8.2}  segments {}\n",
                    room.name,
                    room.offset,
                    room.segments.len()
                ));
            }
        }
        Scene::Game(game) => {
            out.push_str(&format!("Levels: {}\n", game.levels.len()));
            for level in &game.levels {
                out.push_str(&format!(
                    "  {:<24} offset {:>8.2}  rooms {}\n",
                    level.name,
                    level.offset,
                    level.rooms.len()
                ));
            }
        }
    }

    out.push_str(&format!("Boxes:  {}", primitives.len()));
    if let Some((min, max)) = bounds(primitives) {
        out.push_str(&format!(
            "\nBounds: ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
            min.x, min.y, min.z, max.x, max.y, max.z
        ));
    }
    out
}
