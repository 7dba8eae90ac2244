//! Room script extraction
//!
//! Room scripts are Lua, but only two call shapes matter to the editor:
//! segment references (`confSegment("path", ...)` / `mgSegment("path", ...)`)
//! and the room fog (`mgFogColor(r, g, b[, r2, g2, b2])`). Everything else is
//! ignored. This is pattern extraction, not Lua evaluation.

use crate::format::Fog;
use once_cell::sync::Lazy;
use regex::Regex;
use shatter_core::Rgba;

static SEGMENT_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:mgSegment|confSegment)\s*\(\s*"([^"]+)"(?:\s*,[^)]*)?\)"#)
        .expect("segment call pattern")
});

static FOG_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"mgFogColor\s*\(([^)]*)\)").expect("fog call pattern"));

/// Where a referenced segment goes in the room's traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    Start,
    Middle,
    Door,
}

impl SegmentRole {
    /// Classify a segment path by its suffix
    pub fn of(path: &str) -> Self {
        if path.ends_with("start") {
            SegmentRole::Start
        } else if path.ends_with("door") {
            SegmentRole::Door
        } else {
            SegmentRole::Middle
        }
    }
}

/// Segment references and fog pulled out of one room script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomScript {
    pub start: Option<String>,
    pub middle: Vec<String>,
    pub door: Option<String>,
    /// Last well-formed fog call, if any
    pub fog: Option<Fog>,
}

impl RoomScript {
    /// Scan script text line by line
    pub fn parse(text: &str) -> Self {
        let mut script = Self::default();

        for (number, line) in text.lines().enumerate() {
            if line.trim_start().starts_with("--") {
                continue;
            }

            for path in segment_refs(line) {
                match SegmentRole::of(&path) {
                    SegmentRole::Start => {
                        if let Some(previous) = script.start.replace(path) {
                            log::warn!(
                                "Line {}: second start segment replaces '{}'",
                                number + 1,
                                previous
                            );
                        }
                    }
                    SegmentRole::Door => {
                        if let Some(previous) = script.door.replace(path) {
                            log::warn!(
                                "Line {}: second door segment replaces '{}'",
                                number + 1,
                                previous
                            );
                        }
                    }
                    SegmentRole::Middle => script.middle.push(path),
                }
            }

            match fog_values(line) {
                Some(Ok(values)) => match fog_from_values(&values) {
                    Some(fog) => script.fog = Some(fog),
                    None => log::warn!(
                        "Line {}: mgFogColor takes 3 or 6 values, got {}",
                        number + 1,
                        values.len()
                    ),
                },
                Some(Err(token)) => log::warn!(
                    "Line {}: mgFogColor argument '{}' is not a number",
                    number + 1,
                    token
                ),
                None => {}
            }
        }

        script
    }

    /// Segment paths in traversal order: start, middles, door
    pub fn ordered(&self) -> Vec<&str> {
        self.start
            .iter()
            .chain(self.middle.iter())
            .chain(self.door.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.middle.is_empty() && self.door.is_none()
    }
}

/// Every segment path referenced on a line
pub fn segment_refs(line: &str) -> Vec<String> {
    SEGMENT_CALL
        .captures_iter(line)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Argument values of the first fog call on a line.
/// `Err` carries the first argument that is not a number literal.
pub fn fog_values(line: &str) -> Option<Result<Vec<f32>, String>> {
    let caps = FOG_CALL.captures(line)?;
    let args = caps[1].trim();
    if args.is_empty() {
        return Some(Ok(Vec::new()));
    }
    Some(
        args.split(',')
            .map(str::trim)
            .map(|v| match v.parse::<f32>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(v.to_string()),
            })
            .collect(),
    )
}

/// Three values colour both ends of the gradient; six give lower then upper.
pub fn fog_from_values(values: &[f32]) -> Option<Fog> {
    match values {
        [r, g, b] => {
            let colour = Rgba::opaque(*r, *g, *b);
            Some(Fog {
                lower: colour,
                upper: colour,
            })
        }
        [r, g, b, r2, g2, b2] => Some(Fog {
            lower: Rgba::opaque(*r, *g, *b),
            upper: Rgba::opaque(*r2, *g2, *b2),
        }),
        _ => None,
    }
}
