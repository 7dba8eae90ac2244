//! Hierarchical outline of a loaded scene
//!
//! Level → Room → Segment → Box, with each box listing its position, size
//! and template. Serializable so the CLI can emit it as JSON.

use crate::format::{Level, Room, Scene, Segment};
use crate::xml::format_vec3;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    /// Indented text rendering, two spaces per depth
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&format!("{}{}\n", "  ".repeat(depth), self.label));
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }
}

fn segment_node(segment: &Segment) -> OutlineNode {
    let children = segment
        .boxes
        .iter()
        .enumerate()
        .map(|(i, b)| OutlineNode {
            label: format!("Box {}", i),
            children: vec![
                OutlineNode::leaf(format!("Pos: {}", format_vec3(&b.pos))),
                OutlineNode::leaf(format!("Size: {}", format_vec3(&b.size))),
                OutlineNode::leaf(format!("Template: {}", b.template)),
            ],
        })
        .collect();
    OutlineNode {
        label: format!("Segment {}", segment.name),
        children,
    }
}

fn room_node(room: &Room) -> OutlineNode {
    OutlineNode {
        label: format!("Room {}", room.name),
        children: room.segments.iter().map(segment_node).collect(),
    }
}

fn level_node(level: &Level) -> OutlineNode {
    OutlineNode {
        label: format!("Level {}", level.name),
        children: level.rooms.iter().map(room_node).collect(),
    }
}

/// Outline tree rooted at the scene
pub fn outline(scene: &Scene) -> OutlineNode {
    match scene {
        Scene::Segment(segment) => segment_node(segment),
        Scene::Room(room) => room_node(room),
        Scene::Level(level) => level_node(level),
        Scene::Game(game) => OutlineNode {
            label: "Game".to_string(),
            children: game.levels.iter().map(level_node).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SegmentBox;
    use shatter_core::Vec3;

    fn room() -> Room {
        let mut segment = Segment::new("hall");
        segment
            .boxes
            .push(SegmentBox::new(Vec3::new(1.0, 2.0, -3.0), Vec3::ONE).with_template("stone"));
        let mut room = Room::new("first");
        room.segments.push(segment);
        room
    }

    #[test]
    fn test_room_outline() {
        let tree = outline(&Scene::Room(room()));
        assert_eq!(tree.label, "Room first");
        assert_eq!(tree.children[0].label, "Segment hall");
        let b = &tree.children[0].children[0];
        assert_eq!(b.children[0].label, "Pos: 1 2 -3");
        assert_eq!(b.children[2].label, "Template: stone");
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_render_indents() {
        let text = outline(&Scene::Room(room())).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Room first");
        assert_eq!(lines[1], "  Segment hall");
        assert_eq!(lines[3], "      Pos: 1 2 -3");
    }

    #[test]
    fn test_leaf_children_skipped_in_json() {
        let tree = outline(&Scene::Room(Room::new("empty")));
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"label":"Room empty"}"#);
    }
}
