//! Scene graph definitions: Game → Level → Room → Segment → Box/Obstacle

use serde::{Deserialize, Serialize};
use shatter_core::{Rgb, Rgba, Vec3};

/// One axis-aligned block of a segment.
///
/// `size` holds half-extents: the box spans `pos - size ..= pos + size`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentBox {
    pub size: Vec3,
    pub pos: Vec3,
    pub hidden: bool,
    pub template: String,
    /// Colour resolved from the template table at parse time
    pub colour: Rgb,
}

impl SegmentBox {
    pub fn new(pos: Vec3, size: Vec3) -> Self {
        Self {
            pos,
            size,
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }
}

/// Gameplay/decoration marker placed in a segment. Not rendered as geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec3,
    pub hidden: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub template: String,
    pub mode: i32,
}

/// The smallest reusable slice of a room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// File stem of the descriptor
    pub name: String,
    pub template: String,
    /// `size.z` is the extent along the traversal axis
    pub size: Vec3,
    /// Position along the traversal axis within the owning room
    pub offset: f32,
    pub boxes: Vec<SegmentBox>,
    pub obstacles: Vec<Obstacle>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Extent along the traversal axis
    pub fn length(&self) -> f32 {
        self.size.z
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.obstacles.is_empty()
    }
}

/// Lower/upper fog gradient of a room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub lower: Rgba,
    pub upper: Rgba,
}

impl Fog {
    /// Fog shown before any room has been loaded
    pub const DEFAULT: Self = Self {
        lower: Rgba::opaque(0.4, 0.0, 0.5),
        upper: Rgba::opaque(1.3, 0.9, 0.6),
    };

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            lower: self.lower.lerp(&other.lower, t),
            upper: self.upper.lerp(&other.upper, t),
        }
    }
}

impl Default for Fog {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An ordered traversal of segments: start, middle segments, door.
///
/// The segment order is the traversal order and is never changed after the
/// room is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub fog: Fog,
    pub segments: Vec<Segment>,
    /// Position along the traversal axis within the owning level
    pub offset: f32,
    /// Whether `segments[0]` is a start segment
    pub has_start: bool,
    /// Whether the last segment is a door segment
    pub has_door: bool,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn box_count(&self) -> usize {
        self.segments.iter().map(|s| s.boxes.len()).sum()
    }
}

/// An ordered sequence of rooms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub rooms: Vec<Room>,
    /// Position along the traversal axis within the game
    pub offset: f32,
}

impl Level {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn box_count(&self) -> usize {
        self.rooms.iter().map(Room::box_count).sum()
    }
}

/// Every level listed in a game manifest, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub levels: Vec<Level>,
}

impl Game {
    pub fn box_count(&self) -> usize {
        self.levels.iter().map(Level::box_count).sum()
    }
}

/// Whatever the editor currently has open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Scene {
    Segment(Segment),
    Room(Room),
    Level(Level),
    Game(Game),
}

impl Scene {
    pub fn kind(&self) -> &'static str {
        match self {
            Scene::Segment(_) => "segment",
            Scene::Room(_) => "room",
            Scene::Level(_) => "level",
            Scene::Game(_) => "game",
        }
    }

    /// Fog of the scene, if it has exactly one room to take it from
    pub fn fog(&self) -> Option<Fog> {
        match self {
            Scene::Room(room) => Some(room.fog),
            _ => None,
        }
    }

    pub fn box_count(&self) -> usize {
        match self {
            Scene::Segment(segment) => segment.boxes.len(),
            Scene::Room(room) => room.box_count(),
            Scene::Level(level) => level.box_count(),
            Scene::Game(game) => game.box_count(),
        }
    }
}
