//! Editor session: one scene shown in a 3D viewport and three 2D views
//!
//! The host window forwards input here and draws whatever
//! [`Editor::instances`] and [`Editor::view`] describe. Every view selects
//! through the same [`SceneState`], so a pick in one is visible in all.

use crate::input::{Command, InputState, Key};
use crate::ortho::{OrthoView, ViewAxes};
use crate::picking::pick_screen;
use crate::prefs::EditorPrefs;
use crate::state::SceneState;
use crate::theme::ThemeColours;
use shatter_render::{build_instances, BoxInstance, Camera};
use shatter_scene::{outline, OutlineNode, Project, Scene, SceneKind};
use std::path::Path;

/// Render toggles flipped by F1-F3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    pub faces: bool,
    pub wireframe: bool,
    pub colour: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            faces: true,
            wireframe: true,
            colour: true,
        }
    }
}

pub struct Editor {
    prefs: EditorPrefs,
    project: Project,
    state: SceneState,
    camera: Camera,
    views: [OrthoView; 3],
    input: InputState,
    display: DisplayToggles,
    viewport: [f32; 2],
}

impl Editor {
    /// Start a session on the project at `prefs.root_dir`
    pub fn new(prefs: EditorPrefs) -> Self {
        let project = Project::open(&prefs.root_dir);
        Self::with_project(prefs, project)
    }

    pub fn with_project(prefs: EditorPrefs, project: Project) -> Self {
        let views = ViewAxes::ALL.map(|axes| {
            let mut view = OrthoView::new(axes);
            prefs.configure_view(&mut view);
            view
        });
        let mut camera = prefs.camera();
        camera.set_viewport(1600.0, 900.0);

        Self {
            camera,
            views,
            project,
            prefs,
            state: SceneState::new(),
            input: InputState::new(),
            display: DisplayToggles::default(),
            viewport: [1600.0, 900.0],
        }
    }

    // --- Loading ---

    /// Load a descriptor and make it the edited scene. Returns the box count.
    pub fn open(&mut self, kind: SceneKind, path: &Path) -> usize {
        let scene = self.project.load(kind, path);
        self.show(scene)
    }

    pub fn open_segment(&mut self, reference: &str) -> usize {
        let scene = Scene::Segment(self.project.load_segment_ref(reference));
        self.show(scene)
    }

    pub fn open_room(&mut self, room_type: &str) -> usize {
        let scene = Scene::Room(self.project.load_room_type(room_type));
        self.show(scene)
    }

    pub fn open_level(&mut self, name: &str) -> usize {
        let scene = Scene::Level(self.project.load_level_named(name));
        self.show(scene)
    }

    pub fn open_game(&mut self) -> usize {
        let scene = Scene::Game(self.project.load_game());
        self.show(scene)
    }

    fn show(&mut self, scene: Scene) -> usize {
        log::info!(
            "Showing {} with {} boxes",
            scene.kind(),
            scene.box_count()
        );
        self.state.load(scene);
        self.state.primitives().len()
    }

    // --- Accessors ---

    pub fn prefs(&self) -> &EditorPrefs {
        &self.prefs
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn view(&self, axes: ViewAxes) -> &OrthoView {
        &self.views[Self::view_index(axes)]
    }

    pub fn view_mut(&mut self, axes: ViewAxes) -> &mut OrthoView {
        &mut self.views[Self::view_index(axes)]
    }

    fn view_index(axes: ViewAxes) -> usize {
        match axes {
            ViewAxes::XY => 0,
            ViewAxes::XZ => 1,
            ViewAxes::YZ => 2,
        }
    }

    /// Colours for the host window, None when it should use the platform's
    pub fn theme_colours(&self) -> Option<ThemeColours> {
        self.prefs.theme.colours()
    }

    pub fn display(&self) -> DisplayToggles {
        self.display
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = [width, height];
            self.camera.set_viewport(width, height);
        }
    }

    // --- Selection ---

    /// Pick in the 3D viewport. A miss clears the selection.
    pub fn pick_3d(&mut self, screen_x: f32, screen_y: f32) -> Option<usize> {
        let [width, height] = self.viewport;
        let hit = pick_screen(
            screen_x,
            screen_y,
            width,
            height,
            &self.camera,
            self.state.primitives(),
            self.prefs.pick_policy,
        );
        match hit {
            Some(i) => log::debug!("3D pick hit box {}", i),
            None => log::debug!("3D pick missed"),
        }
        self.state.select_only(hit);
        hit
    }

    /// Single click in a 2D view. A miss clears the selection.
    pub fn click_2d(&mut self, axes: ViewAxes, screen: [f32; 2]) -> Option<usize> {
        let hit = self.view(axes).click(screen, self.state.primitives());
        self.state.select_only(hit);
        hit
    }

    /// Marquee drag in a 2D view; the overlapped boxes become the selection
    pub fn marquee_2d(&mut self, axes: ViewAxes, from: [f32; 2], to: [f32; 2]) -> usize {
        let hits = self.view(axes).marquee(from, to, self.state.primitives());
        let count = hits.len();
        self.state.clear_selection();
        self.state.extend_selection(hits);
        log::debug!("Marquee in {} view selected {} boxes", axes, count);
        count
    }

    pub fn delete_selected(&mut self) -> usize {
        let removed = self.state.delete_selected();
        if removed > 0 {
            log::info!("Deleted {} boxes", removed);
        }
        removed
    }

    // --- Input ---

    pub fn key_down(&mut self, key: Key) {
        self.input.process_key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.process_key_up(key);
    }

    pub fn focus_lost(&mut self) {
        self.input.release_all();
    }

    pub fn mouse_look(&mut self, dx: f32, dy: f32) {
        self.camera.mouse_look(dx, dy);
    }

    /// Wheel over the 3D viewport changes the camera speed
    pub fn scroll_3d(&mut self, notches: f32) {
        self.camera.scroll_speed(notches);
    }

    /// Wheel over a 2D view zooms about the cursor
    pub fn zoom_2d(&mut self, axes: ViewAxes, notches: f32, cursor: [f32; 2]) {
        self.view_mut(axes).zoom_at(notches, cursor);
    }

    pub fn pan_2d(&mut self, axes: ViewAxes, dx: f32, dy: f32) {
        self.view_mut(axes).pan_by(dx, dy);
    }

    /// Advance one 60 Hz tick: run queued commands, move the camera by the
    /// held keys and step the fog. Returns true while the fog is still moving.
    pub fn tick(&mut self) -> bool {
        for command in self.input.take_commands() {
            self.run(command);
        }
        self.camera.apply_movement(self.input.movement());
        self.state.tick()
    }

    pub fn run(&mut self, command: Command) {
        match command {
            Command::ToggleFaces => self.display.faces = !self.display.faces,
            Command::ToggleWireframe => self.display.wireframe = !self.display.wireframe,
            Command::ToggleColour => self.display.colour = !self.display.colour,
            Command::ToggleGameView => self.camera.toggle_game_view(),
            Command::FitSpeed => self.fit_camera_speed(),
            Command::ResetCamera => self.camera.reset(),
        }
    }

    /// Set the camera speed from the z spread of the box centres
    pub fn fit_camera_speed(&mut self) {
        let mut centres = self.state.primitives().iter().map(|p| p.position.z);
        let Some(first) = centres.next() else {
            return;
        };
        let (min, max) = centres.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z)));
        self.camera.fit_speed(max - min);
        log::debug!("Camera speed fitted to {:.3}", self.camera.speed);
    }

    // --- Output ---

    /// Instance records for the 3D renderer, selection flagged
    pub fn instances(&self) -> Vec<BoxInstance> {
        build_instances(self.state.primitives(), |i| self.state.is_selected(i))
    }

    /// Hierarchy of the loaded scene for a tree panel
    pub fn outline(&self) -> Option<OutlineNode> {
        self.state.scene().map(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shatter_core::Vec3;
    use std::fs;
    use std::path::PathBuf;

    struct TempProject {
        root: PathBuf,
    }

    impl TempProject {
        fn new() -> Self {
            let root = std::env::temp_dir()
                .join(format!("shatter_editor_test_{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&root).unwrap();
            Self { root }
        }

        fn write(&self, relative: &str, content: &str) {
            let path = self.root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    impl Drop for TempProject {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    /// Room "first": start (z 4), hall (z 8), door (z 2).
    /// Flattened box centres: (0,0,-1) (0,0,-6) (2,0,-10) (0,0,-13)
    fn editor() -> (TempProject, Editor) {
        let files = TempProject::new();
        files.write(
            "segments/basic/start.xml",
            r#"<segment size="12 10 4"><box size="1 1 1" pos="0 0 -1"/></segment>"#,
        );
        files.write(
            "segments/basic/hall.xml",
            r#"<segment size="12 10 8"><box size="1 1 1" pos="0 0 -2"/><box size="1 1 1" pos="2 0 -6"/></segment>"#,
        );
        files.write(
            "segments/basic/door.xml",
            r#"<segment size="12 10 2"><box size="1 1 1" pos="0 0 -1"/></segment>"#,
        );
        files.write(
            "rooms/first.lua",
            r#"mgFogColor(0.1,0.2,0.3)
confSegment("basic/door", 1)
confSegment("basic/hall", 1)
confSegment("basic/start", 1)"#,
        );
        let prefs = EditorPrefs {
            root_dir: files.root.clone(),
            ..Default::default()
        };
        let mut editor = Editor::new(prefs);
        editor.set_viewport(800.0, 600.0);
        (files, editor)
    }

    fn look_down_z(editor: &mut Editor) {
        let camera = editor.camera_mut();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.yaw = 270.0;
        camera.pitch = 0.0;
    }

    #[test]
    fn test_open_room() {
        let (_files, mut editor) = editor();
        assert_eq!(editor.open_room("first"), 4);
        let zs: Vec<f32> = editor.state().primitives().iter().map(|p| p.position.z).collect();
        assert_eq!(zs, vec![-1.0, -6.0, -10.0, -13.0]);
        assert!(editor.outline().unwrap().render().starts_with("Room first"));
    }

    #[test]
    fn test_pick_3d_hit_and_miss() {
        let (_files, mut editor) = editor();
        editor.open_room("first");
        look_down_z(&mut editor);

        assert_eq!(editor.pick_3d(400.0, 300.0), Some(0));
        assert!(editor.state().is_selected(0));

        // Through empty space: the selection is cleared
        assert_eq!(editor.pick_3d(5.0, 5.0), None);
        assert_eq!(editor.state().selection_len(), 0);
    }

    #[test]
    fn test_2d_selection_shared_with_3d() {
        let (_files, mut editor) = editor();
        editor.open_room("first");

        assert_eq!(editor.click_2d(ViewAxes::XY, [10.0, 10.0]), Some(0));
        assert_eq!(editor.marquee_2d(ViewAxes::XY, [150.0, -50.0], [250.0, 50.0]), 1);
        assert!(editor.state().is_selected(2));
        assert!(!editor.state().is_selected(0));

        let flags: Vec<f32> = editor.instances().iter().map(|i| i.selected).collect();
        assert_eq!(flags, vec![0.0, 0.0, 1.0, 0.0]);

        assert_eq!(editor.delete_selected(), 1);
        assert_eq!(editor.state().primitives().len(), 3);
    }

    #[test]
    fn test_tick_runs_commands_and_movement() {
        let (_files, mut editor) = editor();
        editor.open_room("first");
        editor.camera_mut().speed = 1.0;

        editor.key_down(Key::W);
        editor.tick();
        assert!((editor.camera().position.x - 1.0).abs() < 1e-5);

        editor.key_up(Key::W);
        editor.key_down(Key::F8);
        editor.tick();
        assert_eq!(editor.camera().position, Vec3::ZERO);

        editor.key_down(Key::F7);
        editor.tick();
        assert_eq!(editor.camera().speed, editor.camera().min_speed);

        editor.key_down(Key::F1);
        editor.tick();
        assert!(!editor.display().faces);
    }

    #[test]
    fn test_fog_transition_runs_to_room_fog() {
        let (_files, mut editor) = editor();
        editor.open_room("first");
        let mut ticks = 0;
        while editor.tick() {
            ticks += 1;
        }
        assert!((89..=90).contains(&ticks));
        let fog = editor.state().fog();
        assert_eq!(fog.lower, fog.upper);
        assert!((fog.lower.r - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_views_follow_prefs() {
        let files = TempProject::new();
        let prefs = EditorPrefs {
            root_dir: files.root.clone(),
            max_zoom: 1.5,
            theme: crate::theme::Theme::Swamp,
            ..Default::default()
        };
        let mut editor = Editor::new(prefs);
        let colours = editor.theme_colours().unwrap();
        assert_eq!(colours.base, shatter_core::Rgb::new(0.0, 16.0 / 255.0, 20.0 / 255.0));
        editor.zoom_2d(ViewAxes::YZ, 50.0, [0.0, 0.0]);
        assert_eq!(editor.view(ViewAxes::YZ).zoom, 1.5);
        assert_eq!(editor.view(ViewAxes::XY).zoom, 1.0);
    }
}
