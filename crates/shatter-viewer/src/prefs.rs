//! Layered editor preferences
//!
//! Preferences are loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `SHATTER_ROOT_DIR`, `SHATTER_FOV`
//! 2. Project-local: `.shatter/config.toml`
//! 3. Global: `~/.shatter/config.toml`

use crate::ortho::OrthoView;
use crate::picking::PickPolicy;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use shatter_core::{Result, ShatterError};
use shatter_render::Camera;
use std::path::{Path, PathBuf};

pub const ENV_ROOT_DIR: &str = "SHATTER_ROOT_DIR";
pub const ENV_FOV: &str = "SHATTER_FOV";

/// `[editor]` table of a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_policy: Option<PickPolicy>,
}

/// `[camera]` table of a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
}

/// `[views]` table of a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_limit: Option<f32>,
}

/// One config file as written on disk; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefsFile {
    #[serde(default)]
    pub editor: EditorSection,
    #[serde(default)]
    pub camera: CameraSection,
    #[serde(default)]
    pub views: ViewsSection,
}

/// Keys accepted by [`PrefsFile::set`]
pub const KEYS: [&str; 11] = [
    "editor.root_dir",
    "editor.theme",
    "editor.pick_policy",
    "camera.fov",
    "camera.sensitivity",
    "camera.speed",
    "camera.min_speed",
    "camera.max_speed",
    "views.min_zoom",
    "views.max_zoom",
    "views.pan_limit",
];

fn parse_number(key: &str, value: &str) -> Result<Option<f32>> {
    value
        .trim()
        .parse::<f32>()
        .map(Some)
        .map_err(|_| ShatterError::ConfigError(format!("{} expects a number, got '{}'", key, value)))
}

impl PrefsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ShatterError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Write the file, creating its directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set one dotted key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "editor.root_dir" => self.editor.root_dir = Some(PathBuf::from(value)),
            "editor.theme" => {
                self.editor.theme = Some(value.parse().map_err(ShatterError::ConfigError)?)
            }
            "editor.pick_policy" => {
                self.editor.pick_policy = Some(match value {
                    "first" => PickPolicy::First,
                    "nearest" => PickPolicy::Nearest,
                    other => {
                        return Err(ShatterError::ConfigError(format!(
                            "pick_policy must be 'first' or 'nearest', got '{}'",
                            other
                        )))
                    }
                })
            }
            "camera.fov" => self.camera.fov = parse_number(key, value)?,
            "camera.sensitivity" => self.camera.sensitivity = parse_number(key, value)?,
            "camera.speed" => self.camera.speed = parse_number(key, value)?,
            "camera.min_speed" => self.camera.min_speed = parse_number(key, value)?,
            "camera.max_speed" => self.camera.max_speed = parse_number(key, value)?,
            "views.min_zoom" => self.views.min_zoom = parse_number(key, value)?,
            "views.max_zoom" => self.views.max_zoom = parse_number(key, value)?,
            "views.pan_limit" => self.views.pan_limit = parse_number(key, value)?,
            other => {
                return Err(ShatterError::ConfigError(format!(
                    "Unknown config key '{}' (expected one of: {})",
                    other,
                    KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Overlay every key `other` sets onto `self`
    fn merge(&mut self, other: PrefsFile) {
        macro_rules! take {
            ($($section:ident . $field:ident),* $(,)?) => {
                $(if other.$section.$field.is_some() {
                    self.$section.$field = other.$section.$field;
                })*
            };
        }
        take!(
            editor.root_dir,
            editor.theme,
            editor.pick_policy,
            camera.fov,
            camera.sensitivity,
            camera.speed,
            camera.min_speed,
            camera.max_speed,
            views.min_zoom,
            views.max_zoom,
            views.pan_limit,
        );
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ENV_ROOT_DIR) {
            self.editor.root_dir = Some(PathBuf::from(root));
        }
        if let Some(fov) = lookup(ENV_FOV) {
            match fov.trim().parse::<f32>() {
                Ok(fov) => self.camera.fov = Some(fov),
                Err(_) => log::warn!("Ignoring {}='{}': not a number", ENV_FOV, fov),
            }
        }
    }
}

/// Resolved preferences with every default filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorPrefs {
    pub root_dir: PathBuf,
    pub theme: Theme,
    pub pick_policy: PickPolicy,
    pub fov: f32,
    pub sensitivity: f32,
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub pan_limit: f32,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            theme: Theme::Dark,
            pick_policy: PickPolicy::First,
            fov: 75.0,
            sensitivity: 1.0,
            speed: 0.1,
            min_speed: 0.01,
            max_speed: 10.0,
            min_zoom: 0.001,
            max_zoom: 2.0,
            pan_limit: 100_000.0,
        }
    }
}

impl EditorPrefs {
    /// Load preferences with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let global = Self::global_config_path();
        let local = Self::local_config_path();
        Self::load_layers(global.as_deref(), Some(local.as_path()), |key| std::env::var(key).ok())
    }

    /// Load from explicit layer files. Missing files are skipped.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut file = PrefsFile::default();

        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                log::debug!("Reading preferences from {}", path.display());
                file.merge(PrefsFile::load(path)?);
            }
        }

        file.apply_env(env);
        Self::resolve(file)
    }

    /// Load a single file without other layers or environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::resolve(PrefsFile::load(path)?)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".shatter").join("config.toml"))
    }

    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".shatter").join("config.toml")
    }

    /// Fill defaults for everything `file` leaves unset and validate the result
    pub fn resolve(file: PrefsFile) -> Result<Self> {
        let d = Self::default();
        let prefs = Self {
            root_dir: file.editor.root_dir.unwrap_or(d.root_dir),
            theme: file.editor.theme.unwrap_or(d.theme),
            pick_policy: file.editor.pick_policy.unwrap_or(d.pick_policy),
            fov: file.camera.fov.unwrap_or(d.fov),
            sensitivity: file.camera.sensitivity.unwrap_or(d.sensitivity),
            speed: file.camera.speed.unwrap_or(d.speed),
            min_speed: file.camera.min_speed.unwrap_or(d.min_speed),
            max_speed: file.camera.max_speed.unwrap_or(d.max_speed),
            min_zoom: file.views.min_zoom.unwrap_or(d.min_zoom),
            max_zoom: file.views.max_zoom.unwrap_or(d.max_zoom),
            pan_limit: file.views.pan_limit.unwrap_or(d.pan_limit),
        };
        prefs.validate()?;
        Ok(prefs)
    }

    fn validate(&self) -> Result<()> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ShatterError::ConfigError(format!(
                "fov must be between 0 and 180 degrees, got {}",
                self.fov
            )));
        }
        if self.min_speed <= 0.0 || self.min_speed > self.max_speed {
            return Err(ShatterError::ConfigError(format!(
                "camera speed bounds are invalid: {}..{}",
                self.min_speed, self.max_speed
            )));
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(ShatterError::ConfigError(format!(
                "zoom bounds are invalid: {}..{}",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    /// Camera configured from these preferences
    pub fn camera(&self) -> Camera {
        Camera {
            fov: self.fov,
            sensitivity: self.sensitivity,
            speed: self.speed.clamp(self.min_speed, self.max_speed),
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            ..Camera::default()
        }
    }

    /// Apply zoom and pan bounds to a 2D view
    pub fn configure_view(&self, view: &mut OrthoView) {
        view.min_zoom = self.min_zoom;
        view.max_zoom = self.max_zoom;
        view.pan_limit = self.pan_limit;
        view.zoom = view.zoom.clamp(self.min_zoom, self.max_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ortho::ViewAxes;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shatter_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        std::fs::remove_file(path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_config(
            r#"
[editor]
root_dir = "/games/smash"
pick_policy = "nearest"

[camera]
fov = 60
sensitivity = 2.5
"#,
        );
        let prefs = EditorPrefs::load_from_file(&path).unwrap();
        assert_eq!(prefs.root_dir, PathBuf::from("/games/smash"));
        assert_eq!(prefs.pick_policy, PickPolicy::Nearest);
        assert_eq!(prefs.fov, 60.0);
        assert_eq!(prefs.sensitivity, 2.5);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.max_zoom, 2.0);
        cleanup(&path);
    }

    #[test]
    fn test_local_overrides_global() {
        let global = temp_config("[camera]\nfov = 50\nsensitivity = 3\n[editor]\ntheme = \"light\"\n");
        let local = temp_config("[camera]\nfov = 90\n");
        let prefs = EditorPrefs::load_layers(Some(global.as_path()), Some(local.as_path()), no_env).unwrap();
        assert_eq!(prefs.fov, 90.0);
        assert_eq!(prefs.sensitivity, 3.0);
        assert_eq!(prefs.theme, Theme::Light);
        cleanup(&global);
        cleanup(&local);
    }

    #[test]
    fn test_env_overrides_files() {
        let local = temp_config("[editor]\nroot_dir = \"/from/file\"\n[camera]\nfov = 90\n");
        let env = |key: &str| match key {
            ENV_ROOT_DIR => Some("/from/env".to_string()),
            ENV_FOV => Some("not-a-number".to_string()),
            _ => None,
        };
        let prefs = EditorPrefs::load_layers(None, Some(local.as_path()), env).unwrap();
        assert_eq!(prefs.root_dir, PathBuf::from("/from/env"));
        assert_eq!(prefs.fov, 90.0);
        cleanup(&local);
    }

    #[test]
    fn test_missing_layers_give_defaults() {
        let missing = std::env::temp_dir().join("shatter_no_such_dir/config.toml");
        let prefs = EditorPrefs::load_layers(Some(missing.as_path()), None, no_env).unwrap();
        assert_eq!(prefs, EditorPrefs::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let path = temp_config("[views]\nmin_zoom = 5\nmax_zoom = 1\n");
        assert!(EditorPrefs::load_from_file(&path).is_err());
        cleanup(&path);

        let path = temp_config("[camera]\nfov = \"wide\"\n");
        assert!(EditorPrefs::load_from_file(&path).is_err());
        cleanup(&path);
    }

    #[test]
    fn test_set_and_save() {
        let dir = std::env::temp_dir().join(format!("shatter_config_set_{}", uuid::Uuid::new_v4()));
        let path = dir.join(".shatter/config.toml");

        let mut file = PrefsFile::default();
        file.set("camera.fov", "65").unwrap();
        file.set("editor.pick_policy", "nearest").unwrap();
        assert!(file.set("camera.fov", "wide").is_err());
        assert!(file.set("camera.zoom", "1").is_err());
        assert!(file.set("editor.pick_policy", "random").is_err());
        file.set("editor.theme", "Dark Purple").unwrap();
        assert!(file.set("editor.theme", "neon").is_err());
        assert_eq!(file.editor.theme, Some(Theme::DarkPurple));
        file.save(&path).unwrap();

        let reloaded = PrefsFile::load(&path).unwrap();
        assert_eq!(reloaded, file);
        assert!(reloaded.views.pan_limit.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_camera_and_view_from_prefs() {
        let prefs = EditorPrefs {
            fov: 70.0,
            speed: 50.0,
            max_zoom: 1.5,
            ..Default::default()
        };
        let camera = prefs.camera();
        assert_eq!(camera.fov, 70.0);
        assert_eq!(camera.speed, 10.0);

        let mut view = OrthoView::new(ViewAxes::XY);
        view.zoom = 2.0;
        prefs.configure_view(&mut view);
        assert_eq!(view.zoom, 1.5);
    }
}
