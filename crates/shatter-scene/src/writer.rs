//! Segment descriptor writing

use crate::format::Segment;
use crate::xml::format_vec3;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::writer::Writer;
use shatter_core::{Result, ShatterError};
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn xml_err(e: impl std::fmt::Display) -> ShatterError {
    ShatterError::XmlError(e.to_string())
}

/// Serialize a segment to descriptor XML.
///
/// Resolved colours and offsets are not stored; they come from the template
/// table and the owning room when the file is read back.
pub fn write_segment(segment: &Segment) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    let mut root = BytesStart::new("segment");
    root.push_attribute(("size", format_vec3(&segment.size).as_str()));
    root.push_attribute(("template", segment.template.as_str()));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    for b in &segment.boxes {
        let mut e = BytesStart::new("box");
        e.push_attribute(("size", format_vec3(&b.size).as_str()));
        e.push_attribute(("pos", format_vec3(&b.pos).as_str()));
        e.push_attribute(("hidden", if b.hidden { "1" } else { "0" }));
        e.push_attribute(("template", b.template.as_str()));
        writer.write_event(Event::Empty(e)).map_err(xml_err)?;
    }

    for o in &segment.obstacles {
        let mut e = BytesStart::new("obstacle");
        e.push_attribute(("pos", format_vec3(&o.pos).as_str()));
        e.push_attribute(("hidden", if o.hidden { "1" } else { "0" }));
        e.push_attribute(("type", o.kind.as_str()));
        e.push_attribute(("template", o.template.as_str()));
        if o.mode != 0 {
            e.push_attribute(("mode", o.mode.to_string().as_str()));
        }
        writer.write_event(Event::Empty(e)).map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("segment")))
        .map_err(xml_err)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ShatterError::ParseError(e.to_string()))
}

/// Write a segment descriptor to disk, creating parent directories
pub fn save_segment<P: AsRef<Path>>(segment: &Segment, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = write_segment(segment)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Obstacle, SegmentBox};
    use crate::segment::{load_segment_file, parse_segment_str};
    use crate::template::Palette;
    use shatter_core::Vec3;

    fn sample() -> Segment {
        let mut segment = Segment::new("hall");
        segment.size = Vec3::new(12.0, 10.0, 8.0);
        segment.template = "basic".into();
        segment.boxes.push(SegmentBox::new(Vec3::new(0.0, -4.5, -4.0), Vec3::new(6.0, 0.5, 4.0)).with_template("floor"));
        let mut hidden = SegmentBox::new(Vec3::new(1.0, 2.0, -3.0), Vec3::ONE).with_template("a&b");
        hidden.hidden = true;
        segment.boxes.push(hidden);
        segment.obstacles.push(Obstacle {
            pos: Vec3::new(0.0, 1.0, -2.0),
            kind: "scoretop".into(),
            mode: 3,
            ..Default::default()
        });
        segment
    }

    #[test]
    fn test_write_then_read_keeps_boxes() {
        let original = sample();
        let xml = write_segment(&original).unwrap();
        let parsed = parse_segment_str(&xml, "hall", &mut Palette::default());

        assert_eq!(parsed.boxes.len(), original.boxes.len());
        assert_eq!(parsed.size, original.size);
        assert_eq!(parsed.template, "basic");
        assert_eq!(parsed.boxes[1].template, "a&b");
        assert!(parsed.boxes[1].hidden);
        assert_eq!(parsed.boxes[0].pos, original.boxes[0].pos);
        assert_eq!(parsed.obstacles[0].mode, 3);
        assert_eq!(parsed.obstacles[0].kind, "scoretop");
    }

    #[test]
    fn test_save_segment() {
        let dir = std::env::temp_dir().join(format!("shatter_writer_test_{}", uuid::Uuid::new_v4()));
        let path = dir.join("segments/hall.xml");
        save_segment(&sample(), &path).unwrap();

        let loaded = load_segment_file(&path, &mut Palette::default());
        assert_eq!(loaded.name, "hall");
        assert_eq!(loaded.boxes.len(), 2);

        let _ = fs::remove_dir_all(&dir);
    }
}
