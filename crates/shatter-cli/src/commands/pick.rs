//! 3D pick command

use anyhow::Result;
use shatter_core::Vec3;
use shatter_render::CameraMode;
use shatter_scene::SceneKind;
use std::path::PathBuf;

pub struct PickArgs {
    pub root: Option<PathBuf>,
    pub kind: SceneKind,
    pub path: PathBuf,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub position: Option<[f32; 3]>,
    pub game_view: bool,
    pub game_position: f32,
    pub nearest: bool,
}

pub fn run(args: PickArgs) -> Result<()> {
    let mut prefs = super::load_prefs(args.root)?;
    if args.nearest {
        prefs.pick_policy = shatter_viewer::PickPolicy::Nearest;
    }
    let mut editor = shatter_viewer::Editor::new(prefs);
    let count = editor.open(args.kind, &args.path);
    editor.set_viewport(args.width, args.height);

    let camera = editor.camera_mut();
    camera.yaw = args.yaw.rem_euclid(360.0);
    camera.pitch = args.pitch.clamp(-89.0, 89.0);
    if let Some(position) = args.position {
        camera.position = Vec3::from_array(position);
    }
    if args.game_view {
        camera.set_mode(CameraMode::GameView);
        camera.game_position = args.game_position;
    }

    match editor.pick_3d(args.x, args.y) {
        Some(index) => {
            let primitive = &editor.state().primitives()[index];
            let (p, s) = (primitive.position, primitive.size);
            println!("Hit box {} of {}", index, count);
            println!("  Position: ({}, {}, {})", p.x, p.y, p.z);
            println!("  Size:     ({}, {}, {})", s.x, s.y, s.z);
            println!(
                "  Source:   level {} room {} segment {} box {}",
                primitive.source.level,
                primitive.source.room,
                primitive.source.segment,
                primitive.source.index
            );
        }
        None => println!("No box under the pointer ({} boxes)", count),
    }
    Ok(())
}
