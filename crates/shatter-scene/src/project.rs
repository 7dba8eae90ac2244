//! Project-rooted loading of segments, rooms, levels and the game manifest
//!
//! A project root has the layout
//!
//! ```text
//! <root>/templates.xml
//! <root>/game.xml
//! <root>/levels/<name>.xml
//! <root>/rooms/<type>.lua
//! <root>/segments/<path>.xml
//! ```
//!
//! Every loader is total: unreadable or malformed files are logged and
//! produce empty or partial results, and offsets are resolved before the
//! result is returned.

use crate::format::{Game, Level, Room, Scene, Segment};
use crate::offset::{resolve_game, resolve_level, resolve_room};
use crate::script::RoomScript;
use crate::segment::{file_stem, load_segment_file};
use crate::template::{Palette, TemplateTable};
use crate::xml::attr;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which kind of descriptor a path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Segment,
    Room,
    Level,
    Game,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneKind::Segment => "segment",
            SceneKind::Room => "room",
            SceneKind::Level => "level",
            SceneKind::Game => "game",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "segment" => Ok(SceneKind::Segment),
            "room" => Ok(SceneKind::Room),
            "level" => Ok(SceneKind::Level),
            "game" => Ok(SceneKind::Game),
            other => Err(format!("unknown scene kind '{}'", other)),
        }
    }
}

/// A project root plus the template palette shared by every parse
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    palette: Palette,
}

impl Project {
    /// Open a project, loading `<root>/templates.xml`
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let templates = TemplateTable::load(root.join("templates.xml"));
        log::debug!(
            "Opened project {} ({} templates)",
            root.display(),
            templates.len()
        );
        Self::with_templates(root, templates)
    }

    pub fn with_templates(root: impl Into<PathBuf>, templates: TemplateTable) -> Self {
        Self {
            root: root.into(),
            palette: Palette::new(templates),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn segment_path(&self, reference: &str) -> PathBuf {
        self.root.join("segments").join(format!("{}.xml", reference))
    }

    pub fn room_path(&self, room_type: &str) -> PathBuf {
        self.root.join("rooms").join(format!("{}.lua", room_type))
    }

    pub fn level_path(&self, name: &str) -> PathBuf {
        self.root.join("levels").join(format!("{}.xml", name))
    }

    pub fn game_path(&self) -> PathBuf {
        self.root.join("game.xml")
    }

    /// Load whatever kind of descriptor `path` is
    pub fn load(&mut self, kind: SceneKind, path: &Path) -> Scene {
        match kind {
            SceneKind::Segment => Scene::Segment(self.load_segment(path)),
            SceneKind::Room => Scene::Room(self.load_room(path)),
            SceneKind::Level => Scene::Level(self.load_level(path)),
            SceneKind::Game => Scene::Game(self.load_game_from(path)),
        }
    }

    /// Load a segment descriptor file. A lone segment sits at offset 0.
    pub fn load_segment(&mut self, path: &Path) -> Segment {
        load_segment_file(path, &mut self.palette)
    }

    /// Load a segment by its script reference (`segments/<reference>.xml`)
    pub fn load_segment_ref(&mut self, reference: &str) -> Segment {
        let path = self.segment_path(reference);
        load_segment_file(path, &mut self.palette)
    }

    /// Load a room script and every segment it references
    pub fn load_room(&mut self, path: &Path) -> Room {
        let mut room = Room::new(file_stem(path));
        let text = match crate::read_descriptor(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to open room {}: {}", path.display(), e);
                return room;
            }
        };

        let script = RoomScript::parse(&text);
        room.has_start = script.start.is_some();
        room.has_door = script.door.is_some();
        if let Some(fog) = script.fog {
            room.fog = fog;
        }
        for reference in script.ordered() {
            let segment = self.load_segment_ref(reference);
            room.segments.push(segment);
        }

        resolve_room(&mut room);
        log::debug!(
            "Loaded room '{}' ({} segments, {} boxes)",
            room.name,
            room.segments.len(),
            room.box_count()
        );
        room
    }

    /// Load a room by level type (`rooms/<type>.lua`)
    pub fn load_room_type(&mut self, room_type: &str) -> Room {
        let path = self.room_path(room_type);
        self.load_room(&path)
    }

    /// Load a level descriptor and all its rooms
    pub fn load_level(&mut self, path: &Path) -> Level {
        let mut level = Level::new(file_stem(path));
        let content = match crate::read_descriptor(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to open level {}: {}", path.display(), e);
                return level;
            }
        };

        for room_type in list_attribute(&content, b"room", "type", &level.name) {
            let room = self.load_room_type(&room_type);
            level.rooms.push(room);
        }

        resolve_level(&mut level);
        level
    }

    /// Load a level by name (`levels/<name>.xml`)
    pub fn load_level_named(&mut self, name: &str) -> Level {
        let path = self.level_path(name);
        self.load_level(&path)
    }

    /// Load `<root>/game.xml` and every level it lists
    pub fn load_game(&mut self) -> Game {
        let path = self.game_path();
        self.load_game_from(&path)
    }

    /// Load a game manifest and every level it lists
    pub fn load_game_from(&mut self, path: &Path) -> Game {
        let mut game = Game::default();
        let content = match crate::read_descriptor(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to open game manifest {}: {}", path.display(), e);
                return game;
            }
        };

        for name in list_attribute(&content, b"level", "name", "game") {
            let level = self.load_level_named(&name);
            game.levels.push(level);
        }

        resolve_game(&mut game);
        game
    }
}

/// Values of `attribute` on every `element`, in document order.
///
/// Elements missing the attribute are skipped with a warning; a syntax error
/// ends the scan with the values read so far.
fn list_attribute(content: &str, element: &[u8], attribute: &str, context: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == element => {
                match attr(&e, attribute) {
                    Some(value) => values.push(value),
                    None => log::warn!(
                        "'{}': <{}> without '{}' skipped",
                        context,
                        String::from_utf8_lossy(element),
                        attribute
                    ),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "Error parsing '{}' at byte {}: {}",
                    context,
                    reader.error_position(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    values
}
