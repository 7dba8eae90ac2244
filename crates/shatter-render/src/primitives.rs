//! Per-box instance records and cube geometry for an external renderer

use bytemuck::{Pod, Zeroable};
use shatter_scene::Primitive;

/// Shade applied to box colours for the outline pass
pub const OUTLINE_SHADE: f32 = 0.6;

/// One box instance, laid out for direct upload as an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    pub center: [f32; 3],
    /// 1.0 when the box is selected, otherwise 0.0
    pub selected: f32,
    pub half_extents: [f32; 3],
    /// 1.0 when the box is hidden in game, otherwise 0.0
    pub hidden: f32,
    pub color: [f32; 4],
}

impl BoxInstance {
    pub fn from_primitive(primitive: &Primitive, selected: bool) -> Self {
        let [r, g, b] = primitive.colour.to_array();
        Self {
            center: primitive.position.to_array(),
            selected: if selected { 1.0 } else { 0.0 },
            half_extents: primitive.size.to_array(),
            hidden: if primitive.hidden { 1.0 } else { 0.0 },
            color: [r, g, b, 1.0],
        }
    }

    /// Same instance with the colour darkened for outline drawing
    pub fn outline(&self) -> Self {
        let [r, g, b, a] = self.color;
        Self {
            color: [r * OUTLINE_SHADE, g * OUTLINE_SHADE, b * OUTLINE_SHADE, a],
            ..*self
        }
    }
}

/// Build instance records for a primitive list.
/// `is_selected` is asked once per primitive index.
pub fn build_instances(
    primitives: &[Primitive],
    is_selected: impl Fn(usize) -> bool,
) -> Vec<BoxInstance> {
    primitives
        .iter()
        .enumerate()
        .map(|(i, p)| BoxInstance::from_primitive(p, is_selected(i)))
        .collect()
}

/// Corners of the unit cube spanning [-1, 1] on every axis.
/// Scaled by half-extents and offset by the centre they give a box's corners.
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Twelve cube edges as index pairs into [`CUBE_CORNERS`], for line lists
pub const CUBE_EDGES: [[u16; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Cube faces as triangle indices into [`CUBE_CORNERS`], counter-clockwise
/// when seen from outside
pub const CUBE_TRIANGLES: [u16; 36] = [
    4, 5, 6, 4, 6, 7, // +z
    1, 0, 3, 1, 3, 2, // -z
    5, 1, 2, 5, 2, 6, // +x
    0, 4, 7, 0, 7, 3, // -x
    7, 6, 2, 7, 2, 3, // +y
    0, 1, 5, 0, 5, 4, // -y
];

/// World-space corners of one instance
pub fn instance_corners(instance: &BoxInstance) -> [[f32; 3]; 8] {
    let mut corners = [[0.0; 3]; 8];
    for (out, unit) in corners.iter_mut().zip(CUBE_CORNERS.iter()) {
        for axis in 0..3 {
            out[axis] = instance.center[axis] + unit[axis] * instance.half_extents[axis];
        }
    }
    corners
}
