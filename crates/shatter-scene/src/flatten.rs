//! Scene flattening
//!
//! Turns a resolved hierarchy into a flat list of absolute-positioned boxes.
//! Each box keeps an index path back to its source instead of a reference,
//! so the primitive list can be rebuilt freely.

use crate::format::{Game, Level, Room, Scene, Segment};
use serde::{Deserialize, Serialize};
use shatter_core::{Rgb, Vec3};

/// Index path of a box inside the scene it was flattened from.
///
/// Levels and rooms that are not part of the scene (a lone segment or room)
/// are index 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxRef {
    pub level: usize,
    pub room: usize,
    pub segment: usize,
    pub index: usize,
}

/// One renderable, pickable axis-aligned box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Absolute centre
    pub position: Vec3,
    /// Half-extents
    pub size: Vec3,
    pub colour: Rgb,
    pub hidden: bool,
    pub source: BoxRef,
}

impl Primitive {
    pub fn min(&self) -> Vec3 {
        self.position - self.size
    }

    pub fn max(&self) -> Vec3 {
        self.position + self.size
    }
}

/// Flatten a segment whose boxes are shifted by `-(base + segment.offset)`
fn push_segment(out: &mut Vec<Primitive>, segment: &Segment, base: f32, source: BoxRef) {
    let shift = Vec3::new(0.0, 0.0, -(base + segment.offset));
    for (index, b) in segment.boxes.iter().enumerate() {
        out.push(Primitive {
            position: b.pos + shift,
            size: b.size,
            colour: b.colour,
            hidden: b.hidden,
            source: BoxRef { index, ..source },
        });
    }
}

fn push_room(out: &mut Vec<Primitive>, room: &Room, base: f32, source: BoxRef) {
    for (segment_index, segment) in room.segments.iter().enumerate() {
        let source = BoxRef {
            segment: segment_index,
            ..source
        };
        push_segment(out, segment, base + room.offset, source);
    }
}

fn push_level(out: &mut Vec<Primitive>, level: &Level, base: f32, level_index: usize) {
    for (room_index, room) in level.rooms.iter().enumerate() {
        let source = BoxRef {
            level: level_index,
            room: room_index,
            ..Default::default()
        };
        push_room(out, room, base + level.offset, source);
    }
}

pub fn flatten_segment(segment: &Segment) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(segment.boxes.len());
    push_segment(&mut out, segment, 0.0, BoxRef::default());
    out
}

pub fn flatten_room(room: &Room) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(room.box_count());
    push_room(&mut out, room, 0.0, BoxRef::default());
    out
}

pub fn flatten_level(level: &Level) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(level.box_count());
    push_level(&mut out, level, 0.0, 0);
    out
}

pub fn flatten_game(game: &Game) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(game.box_count());
    for (level_index, level) in game.levels.iter().enumerate() {
        push_level(&mut out, level, 0.0, level_index);
    }
    out
}

impl Scene {
    /// Absolute-positioned primitives for the whole scene
    pub fn flatten(&self) -> Vec<Primitive> {
        match self {
            Scene::Segment(segment) => flatten_segment(segment),
            Scene::Room(room) => flatten_room(room),
            Scene::Level(level) => flatten_level(level),
            Scene::Game(game) => flatten_game(game),
        }
    }
}

/// Bounding box (min, max) of a primitive list, None when empty
pub fn bounds(primitives: &[Primitive]) -> Option<(Vec3, Vec3)> {
    let first = primitives.first()?;
    let init = (first.min(), first.max());
    Some(primitives.iter().fold(init, |(lo, hi), p| {
        (lo.min(&p.min()), hi.max(&p.max()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SegmentBox;
    use crate::offset::{resolve_level, resolve_room};

    fn segment(length: f32, boxes: &[(f32, f32, f32)]) -> Segment {
        let mut s = Segment::new("s");
        s.size = Vec3::new(4.0, 4.0, length);
        s.boxes = boxes
            .iter()
            .map(|&(x, y, z)| SegmentBox::new(Vec3::new(x, y, z), Vec3::ONE))
            .collect();
        s
    }

    #[test]
    fn test_flatten_room_shifts_along_z_only() {
        let mut room = Room::new("r");
        room.segments = vec![
            segment(10.0, &[(1.0, 2.0, -1.0)]),
            segment(6.0, &[(3.0, 4.0, -2.0), (0.0, 0.0, 0.0)]),
        ];
        resolve_room(&mut room);

        let prims = flatten_room(&room);
        assert_eq!(prims.len(), 3);
        assert_eq!(prims[0].position, Vec3::new(1.0, 2.0, -1.0));
        assert_eq!(prims[1].position, Vec3::new(3.0, 4.0, -12.0));
        assert_eq!(prims[2].source, BoxRef { level: 0, room: 0, segment: 1, index: 1 });
    }

    #[test]
    fn test_flatten_level_adds_room_offset() {
        let mut a = Room::new("a");
        a.segments = vec![segment(8.0, &[])];
        let mut b = Room::new("b");
        b.segments = vec![segment(2.0, &[]), segment(2.0, &[(0.0, 0.0, 0.0)])];
        let mut level = Level {
            name: "l".into(),
            rooms: vec![a, b],
            offset: 0.0,
        };
        resolve_level(&mut level);

        let prims = flatten_level(&level);
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].position.z, -10.0);
        assert_eq!(prims[0].source.room, 1);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let mut room = Room::new("r");
        room.segments = vec![segment(3.5, &[(0.5, 0.5, 0.5)]), segment(1.25, &[(1.0, 1.0, -0.75)])];
        resolve_room(&mut room);
        let scene = Scene::Room(room);
        assert_eq!(scene.flatten(), scene.flatten());
    }

    #[test]
    fn test_bounds() {
        let prims = flatten_segment(&segment(1.0, &[(0.0, 0.0, 0.0), (4.0, -2.0, 1.0)]));
        let (lo, hi) = bounds(&prims).unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -3.0, -1.0));
        assert_eq!(hi, Vec3::new(5.0, 1.0, 2.0));
        assert!(bounds(&[]).is_none());
    }
}
