//! Elbow Router CLI
//!
//! Reads a scene JSON file (or stdin), routes every elbow arrow in it, and
//! prints the scene as SVG.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use elbow_router::routing::RouteOptions;
use elbow_router::{render_svg_with_stylesheet, route_scene, Scene, Stylesheet, SvgConfig};

#[derive(Parser)]
#[command(about = "Route elbow arrows in a scene and render it to SVG")]
struct Cli {
    /// Scene JSON file; stdin when omitted
    input: Option<PathBuf>,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML color palette for the output
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Draw the dynamic obstacle boxes of each routed arrow
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let scene = match &cli.input {
        Some(path) => Scene::from_file(path),
        None => {
            let mut buffer = String::new();
            match std::io::stdin().read_to_string(&mut buffer) {
                Ok(_) => Scene::from_json(&buffer),
                Err(e) => Err(e.into()),
            }
        }
    };
    let mut scene = match scene {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(sheet) => sheet,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Stylesheet::default(),
    };

    let debug_bounds = route_scene(&mut scene, &RouteOptions::default());
    let debug_bounds = if cli.debug { debug_bounds } else { vec![] };

    let svg = render_svg_with_stylesheet(
        &scene,
        &SvgConfig::default(),
        &stylesheet,
        &debug_bounds,
    );

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, svg) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
        None => print!("{}", svg),
    }
    ExitCode::SUCCESS
}
