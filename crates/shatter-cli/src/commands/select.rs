//! 2D select command

use anyhow::Result;
use shatter_scene::SceneKind;
use shatter_viewer::ViewAxes;
use std::path::PathBuf;

pub struct SelectArgs {
    pub root: Option<PathBuf>,
    pub kind: SceneKind,
    pub path: PathBuf,
    pub view: ViewAxes,
    pub from: [f32; 2],
    pub to: Option<[f32; 2]>,
    pub pan: Option<[f32; 2]>,
    pub zoom: Option<f32>,
}

pub fn run(args: SelectArgs) -> Result<()> {
    let mut editor = super::open_editor(args.root)?;
    editor.open(args.kind, &args.path);

    let view = editor.view_mut(args.view);
    if let Some(zoom) = args.zoom {
        view.zoom = zoom.clamp(view.min_zoom, view.max_zoom);
    }
    if let Some([dx, dy]) = args.pan {
        view.pan_by(dx, dy);
    }

    match args.to {
        Some(to) => {
            editor.marquee_2d(args.view, args.from, to);
        }
        None => {
            editor.click_2d(args.view, args.from);
        }
    }

    let selection = editor.state().selection();
    if selection.is_empty() {
        println!("Nothing selected in the {} view", args.view.label());
        return Ok(());
    }

    println!(
        "Selected {} box(es) in the {} view:",
        selection.len(),
        args.view.label()
    );
    for handle in selection {
        if let Some(primitive) = editor.state().resolve(handle) {
            let rect = editor.view(args.view).screen_rect(primitive);
            println!(
                "  #{:<5} rect ({:.1}, {:.1}) {:.1} x {:.1}",
                handle.index, rect.x, rect.y, rect.w, rect.h
            );
        }
    }
    Ok(())
}
