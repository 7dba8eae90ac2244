//! Shatter Render - viewport camera and render interface
//!
//! This crate holds what a renderer needs from the editor core: the
//! perspective camera with its free-fly and game-view modes, fog colour
//! transitions, and per-box instance records ready for GPU upload. Drawing
//! itself is left to the host application.

mod camera;
mod fog;
mod primitives;

pub use camera::{mat4_inverse, Camera, CameraMode, Movement, SPEED_STEP};
pub use fog::{FogTransition, FOG_TICK_HZ, FOG_TRANSITION_SECS};
pub use primitives::{
    build_instances, instance_corners, BoxInstance, CUBE_CORNERS, CUBE_EDGES, CUBE_TRIANGLES,
    OUTLINE_SHADE,
};
