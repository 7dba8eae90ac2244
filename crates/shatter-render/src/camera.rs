//! Viewport camera with free-fly and game-view modes

use shatter_core::{mat4_identity, mat4_mul, Mat4, Vec3};

/// Step applied to the camera speed per scroll notch
pub const SPEED_STEP: f32 = 0.05;

/// Camera operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Fly anywhere, oriented by yaw/pitch
    #[default]
    Free,
    /// Fixed orientation looking down -z, dollying along the traversal axis
    GameView,
}

/// Directional input for one tick, each axis in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Movement {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
}

/// A perspective camera for the 3D viewport
#[derive(Debug, Clone)]
pub struct Camera {
    /// Free camera position
    pub position: Vec3,
    /// Horizontal angle in degrees, kept in [0, 360)
    pub yaw: f32,
    /// Vertical angle in degrees, kept in [-89, 89]
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Distance moved per directional input
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Mouse-look scale
    pub sensitivity: f32,
    /// Game-view position along the traversal axis
    pub game_position: f32,
    pub mode: CameraMode,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            speed: 0.1,
            min_speed: 0.01,
            max_speed: 10.0,
            sensitivity: 1.0,
            game_position: 0.0,
            mode: CameraMode::Free,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the aspect ratio from a viewport size in pixels
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    pub fn toggle_game_view(&mut self) {
        self.mode = match self.mode {
            CameraMode::Free => CameraMode::GameView,
            CameraMode::GameView => CameraMode::Free,
        };
    }

    /// Eye position for the current mode
    pub fn eye(&self) -> Vec3 {
        match self.mode {
            CameraMode::Free => self.position,
            CameraMode::GameView => Vec3::new(0.0, 1.0, -self.game_position),
        }
    }

    /// Viewing direction (world space, unit length)
    pub fn forward(&self) -> Vec3 {
        match self.mode {
            CameraMode::Free => {
                let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
                Vec3::new(
                    yaw.cos() * pitch.cos(),
                    pitch.sin(),
                    yaw.sin() * pitch.cos(),
                )
                .normalized()
            }
            CameraMode::GameView => Vec3::FORWARD,
        }
    }

    /// Camera right vector (world space)
    pub fn right(&self) -> Vec3 {
        self.forward().cross(&Vec3::UP).normalized()
    }

    /// Camera up vector (perpendicular to both forward and right)
    pub fn up(&self) -> Vec3 {
        self.right().cross(&self.forward())
    }

    /// Apply one tick of directional input, scaled by the camera speed.
    ///
    /// In game view only the forward axis does anything: it moves the dolly
    /// along the traversal axis.
    pub fn apply_movement(&mut self, movement: Movement) {
        match self.mode {
            CameraMode::Free => {
                let step = self.forward() * movement.forward
                    + self.right() * movement.right
                    + Vec3::UP * movement.up;
                self.position += step * self.speed;
            }
            CameraMode::GameView => {
                self.game_position += movement.forward * self.speed;
            }
        }
    }

    /// Rotate from a mouse delta in pixels
    pub fn mouse_look(&mut self, dx: f32, dy: f32) {
        if self.mode == CameraMode::GameView {
            return;
        }
        self.yaw -= dx * self.sensitivity / 10.0;
        self.pitch -= dy * self.sensitivity / 10.0;
        self.pitch = self.pitch.clamp(-89.0, 89.0);
        self.yaw = self.yaw.rem_euclid(360.0);
    }

    /// Adjust the speed by whole scroll notches (positive = faster)
    pub fn scroll_speed(&mut self, notches: f32) {
        let speed = self.speed + notches * SPEED_STEP;
        let snapped = (speed / SPEED_STEP).round() * SPEED_STEP;
        self.speed = snapped.clamp(self.min_speed, self.max_speed);
    }

    /// Pick a speed that crosses a scene of the given z extent in a few
    /// seconds of held input
    pub fn fit_speed(&mut self, z_extent: f32) {
        let speed = z_extent.abs() / (30.0 * 240.0);
        self.speed = speed.clamp(self.min_speed, self.max_speed);
    }

    /// Back to the origin looking along +x, or the game view back to its start
    pub fn reset(&mut self) {
        match self.mode {
            CameraMode::Free => {
                self.position = Vec3::ZERO;
                self.yaw = 0.0;
                self.pitch = 0.0;
            }
            CameraMode::GameView => self.game_position = 0.0,
        }
    }

    /// World to view, column-major
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        let f = self.forward();
        let s = f.cross(&Vec3::UP).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [-s.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0],
        ]
    }

    /// Get the perspective projection matrix (4x4, column-major, clip z in [-1, 1])
    pub fn projection_matrix(&self) -> Mat4 {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        mat4_mul(&self.projection_matrix(), &self.view_matrix())
    }

    /// Clip space back to world space
    pub fn inverse_view_projection_matrix(&self) -> Mat4 {
        mat4_inverse(&self.view_projection_matrix())
    }
}

/// Invert a column-major matrix by Gauss-Jordan elimination with partial
/// pivoting. A singular matrix yields the identity.
pub fn mat4_inverse(m: &Mat4) -> Mat4 {
    // Row-reducing the column-major storage inverts the transpose, and the
    // transpose of that inverse read back column-major is the inverse of `m`
    let mut a = *m;
    let mut inv = mat4_identity();

    for c in 0..4 {
        let pivot = (c..4)
            .max_by(|&i, &j| a[i][c].abs().total_cmp(&a[j][c].abs()))
            .unwrap_or(c);
        if a[pivot][c].abs() < 1e-10 {
            return mat4_identity();
        }
        a.swap(c, pivot);
        inv.swap(c, pivot);

        let scale = 1.0 / a[c][c];
        for k in 0..4 {
            a[c][k] *= scale;
            inv[c][k] *= scale;
        }

        let (pivot_row, inv_row) = (a[c], inv[c]);
        for r in (0..4).filter(|&r| r != c) {
            let factor = a[r][c];
            if factor == 0.0 {
                continue;
            }
            for k in 0..4 {
                a[r][k] -= factor * pivot_row[k];
                inv[r][k] -= factor * inv_row[k];
            }
        }
    }
    inv
}
