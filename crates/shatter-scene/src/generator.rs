//! New room script generation

use crate::format::Fog;
use shatter_core::{Result, Rgba};
use std::fs;
use std::path::Path;

/// Settings for a generated room script
#[derive(Debug, Clone, PartialEq)]
pub struct RoomScriptOptions {
    pub start_segment: String,
    pub door_segment: String,
    /// Room length the script fills with random segments
    pub target_length: u32,
    pub fog: Fog,
}

impl Default for RoomScriptOptions {
    fn default() -> Self {
        Self {
            start_segment: "basic/basic/start".to_string(),
            door_segment: "basic/basic/door".to_string(),
            target_length: 120,
            fog: Fog {
                lower: Rgba::opaque(1.0, 1.0, 1.0),
                upper: Rgba::opaque(0.2, 0.2, 0.2),
            },
        }
    }
}

/// Build a room script that registers `segments` and lays out start,
/// random fill up to the target length, then door.
pub fn generate_room_script(segments: &[String], options: &RoomScriptOptions) -> String {
    let (lo, hi) = (options.fog.lower, options.fog.upper);
    let mut lua = String::new();

    lua.push_str("function init()\n");
    lua.push_str("\tpStart = mgGetBool(\"start\", true)\n");
    lua.push_str("\tpEnd = mgGetBool(\"end\", true)\n\n");
    lua.push_str(&format!(
        "\tmgFogColor({}, {}, {}, {}, {}, {})\n",
        lo.r, lo.g, lo.b, hi.r, hi.g, hi.b
    ));
    lua.push_str("\tmgMusic(\"1\")\n");
    lua.push_str("\tmgLowPass(0.2)\n");
    lua.push_str("\tmgReverb(0.2, 0.5, 0.2)\n");
    lua.push_str("\tmgEcho(0.2, 0.5, 0.75, 0.8)\n");
    lua.push_str("\tmgGravity(1)\n\n");

    for segment in segments {
        lua.push_str(&format!("\tconfSegment(\"{}\", 1)\n", segment));
    }

    lua.push_str("\n\tl = 0\n\n");
    lua.push_str("\tif pStart then\n");
    lua.push_str(&format!(
        "\t\tl = l + mgSegment(\"{}\", -l)\n",
        options.start_segment
    ));
    lua.push_str("\tend\n\n");

    lua.push_str(&format!("\tlocal targetLen = {}\n", options.target_length));
    lua.push_str("\twhile l < targetLen do\n");
    lua.push_str("\t\ts = nextSegment()\n");
    lua.push_str("\t\tl = l + mgSegment(s, -l)\n");
    lua.push_str("\tend\n\n");

    lua.push_str("\tif pEnd then\n");
    lua.push_str(&format!(
        "\t\tl = l + mgSegment(\"{}\", -l)\n",
        options.door_segment
    ));
    lua.push_str("\tend\n\n");

    lua.push_str("\tmgLength(l)\n");
    lua.push_str("end\n\n");
    lua.push_str("function tick()\n");
    lua.push_str("end\n");

    lua
}

/// Generate a room script and write it to `path`
pub fn write_room_script<P: AsRef<Path>>(
    path: P,
    segments: &[String],
    options: &RoomScriptOptions,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_room_script(segments, options))?;
    log::info!("Wrote room script {}", path.display());
    Ok(())
}
