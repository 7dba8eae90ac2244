//! Shatter Scene - descriptor loading and scene flattening
//!
//! This crate turns a project's XML descriptors and Lua room scripts into a
//! resolved Game → Level → Room → Segment hierarchy, and flattens that
//! hierarchy into absolute-positioned boxes.

mod flatten;
mod format;
mod generator;
mod offset;
mod outline;
mod project;
pub mod script;
mod segment;
mod template;
mod writer;
mod xml;

pub use flatten::{
    bounds, flatten_game, flatten_level, flatten_room, flatten_segment, BoxRef, Primitive,
};
pub use format::{Fog, Game, Level, Obstacle, Room, Scene, Segment, SegmentBox};
pub use generator::{generate_room_script, write_room_script, RoomScriptOptions};
pub use offset::{
    level_length, resolve_game, resolve_level, resolve_level_offsets, resolve_room,
    resolve_room_offsets, resolve_segment_offsets, room_length,
};
pub use outline::{outline, OutlineNode};
pub use project::{Project, SceneKind};
pub use script::RoomScript;
pub use segment::{load_segment_file, parse_segment_str};
pub use template::{Palette, TemplateTable};
pub use writer::{save_segment, write_segment};
pub use xml::parse_vec3;

use std::path::Path;

/// Read a descriptor or script file as text
pub fn read_descriptor<P: AsRef<Path>>(path: P) -> shatter_core::Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
