//! Shatter Core - Foundational types for the Shatter level toolkit
//!
//! This crate provides the types every other Shatter crate depends on:
//! - `Vec3` - Spatial vector used for positions, sizes and directions
//! - `Rgb`, `Rgba` - Template and fog colours
//! - Column-major 4x4 matrix helpers shared by the camera and picking code
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, ShatterError};
pub use types::{mat4_identity, mat4_mul, mat4_transform_vec4, Mat4, Rgb, Rgba, Vec3};
