//! Shatter CLI - inspect level descriptors and exercise the editor's picking

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, inspect, new_room, pick, select};
use shatter_scene::SceneKind;
use shatter_viewer::ViewAxes;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shatter")]
#[command(about = "Level toolkit for segment, room and level descriptors", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root (overrides preferences)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a descriptor and print what it contains
    Inspect {
        /// segment, room, level or game
        #[arg(value_parser = parse_kind)]
        kind: SceneKind,

        /// Path to the descriptor file
        path: PathBuf,

        /// Output format (text, json, outline or primitives)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Cast a pick ray through the 3D viewport
    Pick {
        #[arg(value_parser = parse_kind)]
        kind: SceneKind,

        path: PathBuf,

        /// Pointer x in pixels from the left
        #[arg(long)]
        x: f32,

        /// Pointer y in pixels from the top
        #[arg(long)]
        y: f32,

        #[arg(long, default_value = "1600")]
        width: f32,

        #[arg(long, default_value = "900")]
        height: f32,

        /// Camera yaw in degrees
        #[arg(long, default_value = "0")]
        yaw: f32,

        /// Camera pitch in degrees
        #[arg(long, default_value = "0")]
        pitch: f32,

        /// Camera position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        position: Option<[f32; 3]>,

        /// Use the game view instead of the free camera
        #[arg(long)]
        game_view: bool,

        /// Game view position along the room
        #[arg(long, default_value = "0")]
        game_position: f32,

        /// Pick the nearest hit instead of the first in list order
        #[arg(long)]
        nearest: bool,
    },

    /// Click or marquee-select in a 2D view
    Select {
        #[arg(value_parser = parse_kind)]
        kind: SceneKind,

        path: PathBuf,

        /// xy (front), xz (top) or yz (side)
        #[arg(long, value_parser = parse_axes, default_value = "xy")]
        view: ViewAxes,

        /// Click point, or marquee start (comma-separated x,y)
        #[arg(long, value_parser = parse_point)]
        from: [f32; 2],

        /// Marquee end; omit for a single click
        #[arg(long, value_parser = parse_point)]
        to: Option<[f32; 2]>,

        /// View pan offset in pixels (comma-separated x,y)
        #[arg(long, value_parser = parse_point)]
        pan: Option<[f32; 2]>,

        /// View zoom
        #[arg(long)]
        zoom: Option<f32>,
    },

    /// Generate a new room script
    NewRoom {
        /// Room name, used for the default output path
        name: String,

        /// Segment references to register
        segments: Vec<String>,

        /// Output file (defaults to <root>/rooms/<name>.lua; `-` prints)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Start segment reference
        #[arg(long)]
        start: Option<String>,

        /// Door segment reference
        #[arg(long)]
        door: Option<String>,

        /// Room length to fill with segments
        #[arg(long)]
        length: Option<u32>,
    },

    /// Show or change editor preferences
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn parse_kind(s: &str) -> Result<SceneKind, String> {
    s.parse()
}

fn parse_axes(s: &str) -> Result<ViewAxes, String> {
    s.parse()
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(format!(
            "expected {} comma-separated values, got {}",
            N,
            parts.len()
        ));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|e| format!("invalid number '{}': {}", part.trim(), e))?;
    }
    Ok(out)
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    parse_floats::<3>(s)
}

fn parse_point(s: &str) -> Result<[f32; 2], String> {
    parse_floats::<2>(s)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let root = cli.root;

    match cli.command {
        Commands::Inspect { kind, path, format } => {
            inspect::run(root, kind, &path, &format)
        }
        Commands::Pick {
            kind,
            path,
            x,
            y,
            width,
            height,
            yaw,
            pitch,
            position,
            game_view,
            game_position,
            nearest,
        } => pick::run(pick::PickArgs {
            root,
            kind,
            path,
            x,
            y,
            width,
            height,
            yaw,
            pitch,
            position,
            game_view,
            game_position,
            nearest,
        }),
        Commands::Select {
            kind,
            path,
            view,
            from,
            to,
            pan,
            zoom,
        } => select::run(select::SelectArgs {
            root,
            kind,
            path,
            view,
            from,
            to,
            pan,
            zoom,
        }),
        Commands::NewRoom {
            name,
            segments,
            output,
            start,
            door,
            length,
        } => new_room::run(new_room::NewRoomArgs {
            root,
            name,
            segments,
            output,
            start,
            door,
            length,
        }),
        Commands::Config(cmd) => config::run(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, 2.5,-3"), Ok([1.0, 2.5, -3.0]));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,b,3").is_err());
    }

    #[test]
    fn test_cli_parses_pick() {
        let cli = Cli::try_parse_from([
            "shatter", "pick", "room", "rooms/a.lua", "--x", "10", "--y", "20", "--position",
            "0,1,5", "--nearest", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Pick {
                kind,
                position,
                nearest,
                ..
            } => {
                assert_eq!(kind, SceneKind::Room);
                assert_eq!(position, Some([0.0, 1.0, 5.0]));
                assert!(nearest);
            }
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_cli_parses_select() {
        let cli = Cli::try_parse_from([
            "shatter", "select", "segment", "s.xml", "--view", "top", "--from", "0,0", "--to",
            "50,50",
        ])
        .unwrap();
        match cli.command {
            Commands::Select { view, to, .. } => {
                assert_eq!(view, ViewAxes::XZ);
                assert_eq!(to, Some([50.0, 50.0]));
            }
            _ => panic!("expected select"),
        }
    }
}
