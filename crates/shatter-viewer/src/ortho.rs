//! Orthographic 2D views (front, top, side)
//!
//! One view type serves all three projections; `ViewAxes` picks which pair
//! of world axes lands on the view's horizontal and vertical. The vertical
//! world axis is flipped so up is up on screen.
//!
//! Coordinates come in three flavours:
//! - world: scene units
//! - plane: world × [`PLANE_SCALE`], the space projected rectangles live in
//! - screen: plane × zoom + pan, pixels from the view's top-left

use serde::{Deserialize, Serialize};
use shatter_scene::Primitive;
use std::fmt;

/// Plane units per world unit
pub const PLANE_SCALE: f32 = 100.0;
/// Zoom multiplier per wheel notch
pub const ZOOM_FACTOR: f32 = 1.15;

/// Which world axes a 2D view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewAxes {
    /// Front view: x right, y up
    XY,
    /// Top view: x right, z up
    XZ,
    /// Side view: z right, y up
    YZ,
}

impl ViewAxes {
    pub const ALL: [ViewAxes; 3] = [ViewAxes::XY, ViewAxes::XZ, ViewAxes::YZ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewAxes::XY => "front (x/y)",
            ViewAxes::XZ => "top (x/z)",
            ViewAxes::YZ => "side (z/y)",
        }
    }

    /// Rectangle a box covers in this view, in plane units
    pub fn project(&self, primitive: &Primitive) -> Rect {
        let (p, s) = (primitive.position, primitive.size);
        let (x, y, w, h) = match self {
            ViewAxes::XY => (p.x - s.x, -p.y - s.y, s.x * 2.0, s.y * 2.0),
            ViewAxes::XZ => (p.x - s.x, -p.z - s.z, s.x * 2.0, s.z * 2.0),
            ViewAxes::YZ => (p.z - s.z, -p.y - s.y, s.z * 2.0, s.y * 2.0),
        };
        Rect {
            x: x * PLANE_SCALE,
            y: y * PLANE_SCALE,
            w: w * PLANE_SCALE,
            h: h * PLANE_SCALE,
        }
    }
}

impl fmt::Display for ViewAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewAxes::XY => "xy",
            ViewAxes::XZ => "xz",
            ViewAxes::YZ => "yz",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ViewAxes {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" | "front" => Ok(ViewAxes::XY),
            "xz" | "top" => Ok(ViewAxes::XZ),
            "yz" | "side" => Ok(ViewAxes::YZ),
            other => Err(format!("unknown view '{}'", other)),
        }
    }
}

/// Axis-aligned rectangle with a top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Normalized rectangle spanning two corners in any order
    pub fn from_corners(a: [f32; 2], b: [f32; 2]) -> Self {
        Self {
            x: a[0].min(b[0]),
            y: a[1].min(b[1]),
            w: (a[0] - b[0]).abs(),
            h: (a[1] - b[1]).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Edges count as inside
    pub fn contains(&self, p: [f32; 2]) -> bool {
        p[0] >= self.x && p[0] <= self.right() && p[1] >= self.y && p[1] <= self.bottom()
    }

    /// Touching edges count as overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// Pan/zoom state of one 2D view
#[derive(Debug, Clone, PartialEq)]
pub struct OrthoView {
    pub axes: ViewAxes,
    /// Screen position of the plane origin
    pub pan: [f32; 2],
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Plane-unit extent the view may be panned across, in each direction
    pub pan_limit: f32,
}

impl OrthoView {
    pub fn new(axes: ViewAxes) -> Self {
        Self {
            axes,
            pan: [0.0, 0.0],
            zoom: 1.0,
            min_zoom: 0.001,
            max_zoom: 2.0,
            pan_limit: 100_000.0,
        }
    }

    /// Screen point → plane point
    pub fn map_to_plane(&self, screen: [f32; 2]) -> [f32; 2] {
        [
            (screen[0] - self.pan[0]) / self.zoom,
            (screen[1] - self.pan[1]) / self.zoom,
        ]
    }

    /// Plane point → screen point
    pub fn map_to_screen(&self, plane: [f32; 2]) -> [f32; 2] {
        [
            plane[0] * self.zoom + self.pan[0],
            plane[1] * self.zoom + self.pan[1],
        ]
    }

    /// Rectangle of a box on screen
    pub fn screen_rect(&self, primitive: &Primitive) -> Rect {
        let r = self.axes.project(primitive);
        let [x, y] = self.map_to_screen([r.x, r.y]);
        Rect {
            x,
            y,
            w: r.w * self.zoom,
            h: r.h * self.zoom,
        }
    }

    /// Zoom by wheel notches (positive = in), keeping the plane point under
    /// `cursor` fixed on screen
    pub fn zoom_at(&mut self, notches: f32, cursor: [f32; 2]) {
        let anchor = self.map_to_plane(cursor);
        let zoom = self.zoom * ZOOM_FACTOR.powf(notches);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.pan = [
            cursor[0] - anchor[0] * self.zoom,
            cursor[1] - anchor[1] * self.zoom,
        ];
        self.clamp_pan();
    }

    /// Drag the view by a screen-space delta
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan[0] += dx;
        self.pan[1] += dy;
        self.clamp_pan();
    }

    fn clamp_pan(&mut self) {
        let limit = self.pan_limit * self.zoom;
        self.pan[0] = self.pan[0].clamp(-limit, limit);
        self.pan[1] = self.pan[1].clamp(-limit, limit);
    }

    pub fn reset(&mut self) {
        self.pan = [0.0, 0.0];
        self.zoom = 1.0;
    }

    /// First primitive whose rectangle contains the clicked point
    pub fn click(&self, screen: [f32; 2], primitives: &[Primitive]) -> Option<usize> {
        let p = self.map_to_plane(screen);
        primitives
            .iter()
            .position(|prim| self.axes.project(prim).contains(p))
    }

    /// Every primitive whose rectangle overlaps the dragged marquee
    pub fn marquee(&self, from: [f32; 2], to: [f32; 2], primitives: &[Primitive]) -> Vec<usize> {
        let area = Rect::from_corners(self.map_to_plane(from), self.map_to_plane(to));
        primitives
            .iter()
            .enumerate()
            .filter(|(_, prim)| self.axes.project(prim).intersects(&area))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shatter_core::{Rgb, Vec3};
    use shatter_scene::BoxRef;

    fn prim(pos: (f32, f32, f32), size: (f32, f32, f32)) -> Primitive {
        Primitive {
            position: Vec3::new(pos.0, pos.1, pos.2),
            size: Vec3::new(size.0, size.1, size.2),
            colour: Rgb::WHITE,
            hidden: false,
            source: BoxRef::default(),
        }
    }

    #[test]
    fn test_projections() {
        let p = prim((1.0, 2.0, 3.0), (0.5, 1.0, 2.0));
        assert_eq!(
            ViewAxes::XY.project(&p),
            Rect { x: 50.0, y: -300.0, w: 100.0, h: 200.0 }
        );
        assert_eq!(
            ViewAxes::XZ.project(&p),
            Rect { x: 50.0, y: -500.0, w: 100.0, h: 400.0 }
        );
        assert_eq!(
            ViewAxes::YZ.project(&p),
            Rect { x: 100.0, y: -300.0, w: 400.0, h: 200.0 }
        );
    }

    #[test]
    fn test_map_round_trip() {
        let mut view = OrthoView::new(ViewAxes::XY);
        view.pan = [120.0, -40.0];
        view.zoom = 0.5;
        let plane = view.map_to_plane([220.0, 60.0]);
        assert_eq!(plane, [200.0, 200.0]);
        assert_eq!(view.map_to_screen(plane), [220.0, 60.0]);
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let mut view = OrthoView::new(ViewAxes::XZ);
        let cursor = [300.0, 200.0];
        let before = view.map_to_plane(cursor);
        view.zoom_at(1.0, cursor);
        assert!((view.zoom - 1.15).abs() < 1e-6);
        let after = view.map_to_plane(cursor);
        assert!((before[0] - after[0]).abs() < 1e-3);
        assert!((before[1] - after[1]).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = OrthoView::new(ViewAxes::XY);
        view.zoom_at(100.0, [0.0, 0.0]);
        assert_eq!(view.zoom, 2.0);
        view.zoom_at(-1000.0, [0.0, 0.0]);
        assert_eq!(view.zoom, 0.001);
    }

    #[test]
    fn test_pan_is_clamped() {
        let mut view = OrthoView::new(ViewAxes::XY);
        view.pan_by(1.0e9, -1.0e9);
        assert_eq!(view.pan, [100_000.0, -100_000.0]);
    }

    #[test]
    fn test_click_hits_first_containing() {
        let view = OrthoView::new(ViewAxes::XY);
        let prims = vec![
            prim((5.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
            prim((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
            prim((0.0, 0.0, -10.0), (2.0, 2.0, 2.0)),
        ];
        assert_eq!(view.click([10.0, -10.0], &prims), Some(1));
        assert_eq!(view.click([1000.0, 1000.0], &prims), None);
    }

    #[test]
    fn test_marquee_selects_overlaps() {
        let view = OrthoView::new(ViewAxes::XY);
        let prims = vec![
            prim((0.0, 0.0, 0.0), (0.5, 0.5, 0.5)),
            prim((3.0, 0.0, 0.0), (0.5, 0.5, 0.5)),
            prim((10.0, 0.0, 0.0), (0.5, 0.5, 0.5)),
        ];
        // Drag from bottom-right to top-left across the first two boxes
        let hits = view.marquee([300.0, 20.0], [-20.0, -20.0], &prims);
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn test_axes_parse() {
        assert_eq!("top".parse::<ViewAxes>(), Ok(ViewAxes::XZ));
        assert_eq!("YZ".parse::<ViewAxes>(), Ok(ViewAxes::YZ));
        assert!("diagonal".parse::<ViewAxes>().is_err());
        assert_eq!(ViewAxes::XY.to_string(), "xy");
    }
}
