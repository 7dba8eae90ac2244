//! Template colour table (`templates.xml`)
//!
//! Maps a template name to the colour boxes using that template are drawn
//! with. Loaded once per project and shared by every segment parse.

use crate::xml::{attr, parse_float};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use shatter_core::Rgb;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Template name → colour lookup
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    colours: HashMap<String, Rgb>,
}

impl TemplateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table from a file. A missing or unreadable file yields an
    /// empty table and a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::parse_str(&content),
            Err(e) => {
                log::warn!("Failed to open template file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Parse table XML. Stops at the first syntax error and keeps every
    /// template read before it.
    pub fn parse_str(content: &str) -> Self {
        let mut table = Self::new();
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut current: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"template" => {
                        current = attr(&e, "name");
                    }
                    b"properties" => {
                        let Some(name) = current.as_ref() else {
                            continue;
                        };
                        if let Some(colour) = attr(&e, "color").and_then(|c| parse_colour(&c)) {
                            table.colours.entry(name.clone()).or_insert(colour);
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"template" {
                        current = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!(
                        "Error parsing template table at byte {}: {}",
                        reader.error_position(),
                        e
                    );
                    break;
                }
                _ => {}
            }
        }

        table
    }

    pub fn insert(&mut self, name: impl Into<String>, colour: Rgb) {
        self.colours.insert(name.into(), colour);
    }

    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.colours.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

/// Template table plus the set of names already reported missing, so a
/// project load warns once per unknown template instead of once per box.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    table: TemplateTable,
    missing: HashSet<String>,
}

impl Palette {
    pub fn new(table: TemplateTable) -> Self {
        Self {
            table,
            missing: HashSet::new(),
        }
    }

    /// Colour for a template name; unknown names fall back to white
    pub fn colour(&mut self, template: &str) -> Rgb {
        if let Some(colour) = self.table.get(template) {
            return colour;
        }
        if self.missing.insert(template.to_string()) {
            log::warn!("No colour for template '{}', using white", template);
        }
        Rgb::WHITE
    }

    pub fn table(&self) -> &TemplateTable {
        &self.table
    }

    /// Template names looked up so far that had no colour
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.missing.iter().map(String::as_str)
    }
}

/// "r g b" → colour; any other token count is rejected
fn parse_colour(value: &str) -> Option<Rgb> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    Some(Rgb::new(
        parse_float(parts[0]),
        parse_float(parts[1]),
        parse_float(parts[2]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"<?xml version="1.0"?>
<templates>
    <template name="wall">
        <properties color="0.5 0.25 1" />
    </template>
    <template name="floor">
        <properties color="0.1 0.2 0.3" />
    </template>
    <template name="broken">
        <properties color="1 1" />
    </template>
    <template name="wall">
        <properties color="0 0 0" />
    </template>
</templates>"#;

    #[test]
    fn test_parse_table() {
        let table = TemplateTable::parse_str(TABLE);
        assert_eq!(table.get("wall"), Some(Rgb::new(0.5, 0.25, 1.0)));
        assert_eq!(table.get("floor"), Some(Rgb::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_malformed_colour_is_skipped() {
        let table = TemplateTable::parse_str(TABLE);
        assert_eq!(table.get("broken"), None);
    }

    #[test]
    fn test_first_definition_wins() {
        let table = TemplateTable::parse_str(TABLE);
        assert_eq!(table.get("wall"), Some(Rgb::new(0.5, 0.25, 1.0)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_properties_outside_template_ignored() {
        let table = TemplateTable::parse_str(r#"<t><properties color="1 0 0"/></t>"#);
        assert!(table.is_empty());
    }

    #[test]
    fn test_syntax_error_keeps_earlier_templates() {
        let content = r#"<templates>
            <template name="a"><properties color="1 0 0"/></template>
            <template name="b"><properties color="0 1 0"/></oops>
        </templates>"#;
        let table = TemplateTable::parse_str(content);
        assert_eq!(table.get("a"), Some(Rgb::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_palette_falls_back_to_white() {
        let mut palette = Palette::new(TemplateTable::parse_str(TABLE));
        assert_eq!(palette.colour("floor"), Rgb::new(0.1, 0.2, 0.3));
        assert_eq!(palette.colour("glass"), Rgb::WHITE);
        assert_eq!(palette.colour("glass"), Rgb::WHITE);
        assert_eq!(palette.missing().collect::<Vec<_>>(), vec!["glass"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let table = TemplateTable::load("/definitely/not/here/templates.xml");
        assert!(table.is_empty());
    }
}
