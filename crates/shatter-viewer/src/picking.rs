//! 3D viewport picking
//!
//! A pointer position is turned into a world ray through the camera's
//! inverse view-projection, then slab-tested against each box.

use serde::{Deserialize, Serialize};
use shatter_core::{mat4_transform_vec4, Vec3};
use shatter_render::Camera;
use shatter_scene::Primitive;

/// Direction components smaller than this count as parallel to a slab
const PARALLEL_EPSILON: f32 = 1e-6;

/// Which hit wins when a ray crosses several boxes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickPolicy {
    /// First hit in primitive list order
    #[default]
    First,
    /// Hit closest to the ray origin
    Nearest,
}

/// A ray in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

/// World-space box bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Ray under a pointer position.
    /// `screen_x`, `screen_y` are pixels from the top-left of the viewport.
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        camera: &Camera,
    ) -> Self {
        let inv_vp = camera.inverse_view_projection_matrix();

        // Convert to NDC [-1, 1]
        let ndc_x = 2.0 * screen_x / viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_y / viewport_height; // Y flipped

        let near = unproject(&inv_vp, [ndc_x, ndc_y, -1.0, 1.0]);
        let far = unproject(&inv_vp, [ndc_x, ndc_y, 1.0, 1.0]);

        let dir = far - near;
        let direction = if dir.length() > 1e-8 {
            dir.normalized()
        } else {
            Vec3::FORWARD
        };

        Self {
            origin: near,
            direction,
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// False when any origin or direction component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        (0..3).all(|i| self.origin[i].is_finite() && self.direction[i].is_finite())
    }
}

fn unproject(inv_vp: &shatter_core::Mat4, clip: [f32; 4]) -> Vec3 {
    let p = mat4_transform_vec4(inv_vp, clip);
    Vec3::new(p[0] / p[3], p[1] / p[3], p[2] / p[3])
}

impl Aabb {
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn of(primitive: &Primitive) -> Self {
        Self::from_center_half(primitive.position, primitive.size)
    }
}

/// Slab test. Distance along the ray to where it enters the box, 0 when the
/// origin is already inside.
pub fn ray_intersect(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if !ray.is_finite() {
        return None;
    }

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for i in 0..3 {
        if ray.direction[i].abs() < PARALLEL_EPSILON {
            if ray.origin[i] < aabb.min[i] || ray.origin[i] > aabb.max[i] {
                return None;
            }
        } else {
            let inv_d = 1.0 / ray.direction[i];
            let mut t1 = (aabb.min[i] - ray.origin[i]) * inv_d;
            let mut t2 = (aabb.max[i] - ray.origin[i]) * inv_d;

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            tmin = tmin.max(t1);
            tmax = tmax.min(t2);

            if tmin > tmax {
                return None;
            }
        }
    }

    if tmax < 0.0 {
        None
    } else {
        Some(tmin.max(0.0))
    }
}

/// Index of the primitive hit by `ray` under the given policy
pub fn pick(ray: &Ray, primitives: &[Primitive], policy: PickPolicy) -> Option<usize> {
    let mut hits = primitives
        .iter()
        .enumerate()
        .filter_map(|(i, p)| ray_intersect(ray, &Aabb::of(p)).map(|t| (i, t)));

    match policy {
        PickPolicy::First => hits.next().map(|(i, _)| i),
        PickPolicy::Nearest => hits
            .fold(None, |best: Option<(usize, f32)>, (i, t)| match best {
                Some((_, d)) if d <= t => best,
                _ => Some((i, t)),
            })
            .map(|(i, _)| i),
    }
}

/// Pick at the given screen coordinates. An empty viewport or a non-finite
/// pointer picks nothing.
pub fn pick_screen(
    screen_x: f32,
    screen_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    camera: &Camera,
    primitives: &[Primitive],
    policy: PickPolicy,
) -> Option<usize> {
    if !(viewport_width > 0.0 && viewport_height > 0.0)
        || !screen_x.is_finite()
        || !screen_y.is_finite()
    {
        return None;
    }
    let ray = Ray::from_screen(screen_x, screen_y, viewport_width, viewport_height, camera);
    pick(&ray, primitives, policy)
}
