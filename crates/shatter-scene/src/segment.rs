//! Segment descriptor parsing
//!
//! A segment descriptor is a `segment` root element carrying `size` and
//! `template`, with `box` and `obstacle` children. Parsing is permissive:
//! malformed attributes fall back to defaults and a syntax error ends the
//! parse with whatever was read before it.

use crate::format::{Obstacle, Segment, SegmentBox};
use crate::template::Palette;
use crate::xml::{attr_int, attr_or_empty, attr_vec3};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use shatter_core::Vec3;
use std::path::Path;

/// Parse segment descriptor XML. `name` becomes the segment's display name.
pub fn parse_segment_str(content: &str, name: &str, palette: &mut Palette) -> Segment {
    let mut segment = Segment::new(name);
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"segment" => {
                    segment.size = attr_vec3(&e, "size").unwrap_or(Vec3::ZERO);
                    segment.template = attr_or_empty(&e, "template");
                }
                b"box" => segment.boxes.push(read_box(&e, palette)),
                b"obstacle" => segment.obstacles.push(read_obstacle(&e)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "Error parsing segment '{}' at byte {}: {} (kept {} boxes)",
                    name,
                    reader.error_position(),
                    e,
                    segment.boxes.len()
                );
                break;
            }
            _ => {}
        }
    }

    segment
}

/// Load a segment descriptor from disk.
///
/// The segment is named after the file stem. An unreadable file yields an
/// empty segment and a warning.
pub fn load_segment_file<P: AsRef<Path>>(path: P, palette: &mut Palette) -> Segment {
    let path = path.as_ref();
    let name = file_stem(path);
    match crate::read_descriptor(path) {
        Ok(content) => parse_segment_str(&content, &name, palette),
        Err(e) => {
            log::warn!("Failed to open segment {}: {}", path.display(), e);
            Segment::new(name)
        }
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_box(e: &BytesStart<'_>, palette: &mut Palette) -> SegmentBox {
    let template = attr_or_empty(e, "template");
    let colour = palette.colour(&template);
    SegmentBox {
        size: attr_vec3(e, "size").unwrap_or(Vec3::ZERO),
        pos: attr_vec3(e, "pos").unwrap_or(Vec3::ZERO),
        hidden: attr_int(e, "hidden", 0) != 0,
        template,
        colour,
    }
}

fn read_obstacle(e: &BytesStart<'_>) -> Obstacle {
    Obstacle {
        pos: attr_vec3(e, "pos").unwrap_or(Vec3::ZERO),
        hidden: attr_int(e, "hidden", 0) != 0,
        kind: attr_or_empty(e, "type"),
        template: attr_or_empty(e, "template"),
        mode: attr_int(e, "mode", 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateTable;
    use shatter_core::Rgb;

    const SEGMENT: &str = r#"<?xml version="1.0"?>
<segment size="12 10 16" template="basic">
    <box size="1 0.5 8" pos="0 -4 -8" hidden="0" template="floor"/>
    <box size="0.5 0.5 0.5" pos="3 1 -2" hidden="1" template="glass"/>
    <obstacle pos="0 0 -4" hidden="0" type="scoretop" template="bonus" mode="2"/>
    <obstacle pos="1 1 -6" type="bar"/>
</segment>"#;

    fn palette() -> Palette {
        let mut table = TemplateTable::new();
        table.insert("floor", Rgb::new(0.2, 0.4, 0.6));
        Palette::new(table)
    }

    #[test]
    fn test_parse_segment() {
        let segment = parse_segment_str(SEGMENT, "corridor", &mut palette());
        assert_eq!(segment.name, "corridor");
        assert_eq!(segment.template, "basic");
        assert_eq!(segment.size, Vec3::new(12.0, 10.0, 16.0));
        assert_eq!(segment.boxes.len(), 2);
        assert_eq!(segment.obstacles.len(), 2);

        let floor = &segment.boxes[0];
        assert_eq!(floor.pos, Vec3::new(0.0, -4.0, -8.0));
        assert_eq!(floor.size, Vec3::new(1.0, 0.5, 8.0));
        assert!(!floor.hidden);
        assert_eq!(floor.colour, Rgb::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_unknown_template_is_white() {
        let segment = parse_segment_str(SEGMENT, "corridor", &mut palette());
        let glass = &segment.boxes[1];
        assert!(glass.hidden);
        assert_eq!(glass.colour, Rgb::WHITE);
    }

    #[test]
    fn test_obstacle_mode_defaults_to_zero() {
        let segment = parse_segment_str(SEGMENT, "corridor", &mut palette());
        assert_eq!(segment.obstacles[0].kind, "scoretop");
        assert_eq!(segment.obstacles[0].mode, 2);
        assert_eq!(segment.obstacles[1].kind, "bar");
        assert_eq!(segment.obstacles[1].mode, 0);
        assert!(!segment.obstacles[1].hidden);
    }

    #[test]
    fn test_malformed_vector_reads_zero() {
        let content = r#"<segment size="1 2"><box size="1 1 1 1" pos="1 x 3"/></segment>"#;
        let segment = parse_segment_str(content, "s", &mut palette());
        assert_eq!(segment.size, Vec3::ZERO);
        assert_eq!(segment.boxes[0].size, Vec3::ZERO);
        assert_eq!(segment.boxes[0].pos, Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn test_syntax_error_returns_partial_segment() {
        let content = r#"<segment size="1 1 4">
            <box size="1 1 1" pos="0 0 0"/>
            <box size="1 1 1" pos="0 0 -2"/>
        </oops>
            <box size="1 1 1" pos="0 0 -4"/>
        </segment>"#;
        let segment = parse_segment_str(content, "s", &mut palette());
        assert_eq!(segment.size, Vec3::new(1.0, 1.0, 4.0));
        assert_eq!(segment.boxes.len(), 2);
    }

    #[test]
    fn test_missing_file_is_empty_segment() {
        let segment = load_segment_file("/definitely/not/here/hall.xml", &mut palette());
        assert_eq!(segment.name, "hall");
        assert!(segment.is_empty());
        assert_eq!(segment.size, Vec3::ZERO);
    }
}
