//! World-to-screen projection for the 3D viewport

use shatter_core::Vec3;
use shatter_render::Camera;

/// Project a world-space point to screen pixels (origin top-left).
/// None for points behind the eye.
pub fn world_to_screen(camera: &Camera, screen_size: [f32; 2], pos: Vec3) -> Option<[f32; 2]> {
    let vp = camera.view_projection_matrix();
    let clip_x = vp[0][0] * pos.x + vp[1][0] * pos.y + vp[2][0] * pos.z + vp[3][0];
    let clip_y = vp[0][1] * pos.x + vp[1][1] * pos.y + vp[2][1] * pos.z + vp[3][1];
    let clip_w = vp[0][3] * pos.x + vp[1][3] * pos.y + vp[2][3] * pos.z + vp[3][3];

    if clip_w <= 0.001 {
        return None;
    }

    let ndc_x = clip_x / clip_w;
    let ndc_y = clip_y / clip_w;

    Some([
        (ndc_x + 1.0) * 0.5 * screen_size[0],
        (1.0 - ndc_y) * 0.5 * screen_size[1],
    ])
}

/// View-space depth of a point, positive in front of the camera
pub fn point_depth(camera: &Camera, pos: Vec3) -> f32 {
    let view = camera.view_matrix();
    let z = view[0][2] * pos.x + view[1][2] * pos.y + view[2][2] * pos.z + view[3][2];
    -z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::{pick_screen, PickPolicy};
    use shatter_core::Rgb;
    use shatter_scene::{BoxRef, Primitive};

    fn camera() -> Camera {
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 2.0, 6.0);
        camera.yaw = 250.0;
        camera.pitch = -12.0;
        camera.set_viewport(1280.0, 720.0);
        camera
    }

    #[test]
    fn test_point_ahead_projects_on_screen() {
        let camera = camera();
        let ahead = camera.eye() + camera.forward() * 10.0;
        let [x, y] = world_to_screen(&camera, [1280.0, 720.0], ahead).unwrap();
        assert!((x - 640.0).abs() < 0.5);
        assert!((y - 360.0).abs() < 0.5);
        assert!((point_depth(&camera, ahead) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_is_none() {
        let camera = camera();
        let behind = camera.eye() - camera.forward() * 5.0;
        assert!(world_to_screen(&camera, [1280.0, 720.0], behind).is_none());
    }

    #[test]
    fn test_projected_centre_picks_the_box() {
        let camera = camera();
        let target = Primitive {
            position: Vec3::new(-3.0, 0.5, -4.0),
            size: Vec3::new(0.5, 0.5, 0.5),
            colour: Rgb::WHITE,
            hidden: false,
            source: BoxRef::default(),
        };
        let [x, y] = world_to_screen(&camera, [1280.0, 720.0], target.position).unwrap();
        let hit = pick_screen(x, y, 1280.0, 720.0, &camera, &[target], PickPolicy::First);
        assert_eq!(hit, Some(0));
    }
}
