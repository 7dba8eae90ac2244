//! Longitudinal offset accumulation
//!
//! Segments are laid end to end along the traversal axis inside a room,
//! rooms inside a level and levels inside a game. Each child's offset is the
//! running total of the lengths before it.

use crate::format::{Game, Level, Room, Segment};

/// Assign segment offsets in order and return the room length
pub fn resolve_segment_offsets(segments: &mut [Segment]) -> f32 {
    let mut total = 0.0;
    for segment in segments.iter_mut() {
        segment.offset = total;
        total += segment.length();
    }
    total
}

/// Length of a room whose segment offsets are resolved.
/// An empty room has length 0.
pub fn room_length(room: &Room) -> f32 {
    room.segments
        .last()
        .map(|last| last.offset + last.length())
        .unwrap_or(0.0)
}

/// Assign room offsets within a level and return the level length
pub fn resolve_room_offsets(rooms: &mut [Room]) -> f32 {
    let mut total = 0.0;
    for room in rooms.iter_mut() {
        room.offset = total;
        total += room_length(room);
    }
    total
}

/// Length of a level whose room offsets are resolved
pub fn level_length(level: &Level) -> f32 {
    level
        .rooms
        .last()
        .map(|last| last.offset + room_length(last))
        .unwrap_or(0.0)
}

/// Assign level offsets within a game and return the game length
pub fn resolve_level_offsets(levels: &mut [Level]) -> f32 {
    let mut total = 0.0;
    for level in levels.iter_mut() {
        level.offset = total;
        total += level_length(level);
    }
    total
}

/// Resolve every offset of a room from scratch
pub fn resolve_room(room: &mut Room) -> f32 {
    resolve_segment_offsets(&mut room.segments)
}

/// Resolve every offset of a level from scratch
pub fn resolve_level(level: &mut Level) -> f32 {
    for room in level.rooms.iter_mut() {
        resolve_room(room);
    }
    resolve_room_offsets(&mut level.rooms)
}

/// Resolve every offset of a game from scratch
pub fn resolve_game(game: &mut Game) -> f32 {
    for level in game.levels.iter_mut() {
        resolve_level(level);
    }
    resolve_level_offsets(&mut game.levels)
}
