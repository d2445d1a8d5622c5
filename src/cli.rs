use clap::Parser;
use std::path::PathBuf;

/// Sprite-atlas pose player and inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the atlas descriptor JSON
    #[arg(value_name = "ATLAS")]
    pub atlas: PathBuf,

    /// Override the sheet image path (ignores meta.image)
    #[arg(short = 's', long = "sheet", value_name = "FILE")]
    pub sheet: Option<PathBuf>,

    /// Pose to play on startup (default: first pose in the atlas)
    #[arg(short = 'p', long = "pose", value_name = "POSE")]
    pub pose: Option<String>,

    /// Playback rate in frames per second [1-24]
    #[arg(long = "fps", value_name = "N")]
    pub fps: Option<u32>,

    /// Start paused instead of playing
    #[arg(long = "paused")]
    pub paused: bool,

    /// Initial zoom factor (clamped to 0.25-4.0)
    #[arg(short = 'z', long = "zoom", value_name = "Z")]
    pub zoom: Option<f32>,

    /// Asset base directory for root-relative sheet references
    #[arg(short = 'b', long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Enable debug logging to file (default: spriteplay.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
