//! Shatter Viewer - editor session for segment, room and level scenes
//!
//! Holds the loaded scene, the shared selection and the camera and 2D view
//! state, and turns pointer input into picks. Drawing is left to the host
//! window, which consumes [`Editor::instances`] and the 2D view rectangles.

pub mod editor;
pub mod input;
pub mod ortho;
pub mod picking;
pub mod prefs;
pub mod projection;
pub mod state;
pub mod theme;

pub use editor::{DisplayToggles, Editor};
pub use input::{Command, InputState, Key};
pub use ortho::{OrthoView, Rect, ViewAxes, PLANE_SCALE, ZOOM_FACTOR};
pub use picking::{pick, pick_screen, ray_intersect, Aabb, PickPolicy, Ray};
pub use prefs::{EditorPrefs, PrefsFile};
pub use projection::{point_depth, world_to_screen};
pub use state::{PrimitiveHandle, SceneState};
pub use theme::{Theme, ThemeColours};
