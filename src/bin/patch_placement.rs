//! Area source placement tool
//!
//! Reads one or more ASCII STL patches and prints, for each, the position,
//! scale and rotation angles of the rectangular area source that replaces it.
//! One JSON object is written per line to stdout; log messages go to stderr.
//!
//! Usage:
//!   cargo run --bin patch_placement -- [--config placement.json] [--reverse] inlet_0.stl inlet_1.stl

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use areasource::{place_from_source, EmitterPlacement, PlacementConfig, StlFile};
use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Area source placement tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes area source position, size and orientation from planar STL patches",
    long_about = None
)]
struct Args {
    /// JSON placement configuration (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit against the patch normal
    #[arg(short, long, action = ArgAction::SetTrue)]
    reverse: bool,

    /// Factor from mesh units to scene units, overrides the configuration
    #[arg(short, long)]
    unit_scale: Option<f64>,

    /// Pretty-print each JSON record
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Show debug output
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// ASCII STL files, one patch each
    #[arg(required = true)]
    meshes: Vec<PathBuf>,
}

fn load_config(args: &Args) -> Result<PlacementConfig> {
    let mut config = match &args.config {
        Some(path) => PlacementConfig::from_file(path)?,
        None => PlacementConfig::default(),
    };
    if args.reverse {
        config.reverse_direction = true;
    }
    if let Some(scale) = args.unit_scale {
        config.unit_scale = scale;
    }
    config.validate()?;
    Ok(config)
}

fn print_record(mesh: &Path, placement: &EmitterPlacement, pretty: bool) -> Result<()> {
    let record = serde_json::json!({
        "mesh": mesh.display().to_string(),
        "placement": placement,
    });
    let text = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{}", text);
    Ok(())
}

fn run(args: &Args) -> Result<usize> {
    let config = load_config(args)?;
    info!(
        "Reference direction {}, unit scale {}",
        config.effective_reference(),
        config.unit_scale
    );

    let mut failures = 0;
    for mesh in &args.meshes {
        match place_from_source(&StlFile::new(mesh), &config) {
            Ok(placement) => print_record(mesh, &placement, args.pretty)?,
            Err(e) => {
                error!("{}: {}", mesh.display(), e);
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            error!("{} of {} meshes failed", failures, args.meshes.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
