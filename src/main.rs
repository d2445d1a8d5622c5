use spriteplay::app::App;
use spriteplay::cli::Args;
use spriteplay::config::PathConfig;
use spriteplay::core::scheduler::{PlaybackScheduler, DEFAULT_FPS};
use spriteplay::entities::AtlasModel;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::{debug, info};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("spriteplay.log"));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("Spriteplay starting...");
    debug!("Command-line args: {:?}", args);

    let path_config = PathConfig::from_env_and_cli(args.base_dir.clone());

    // A malformed descriptor is a construction failure, not something
    // to limp past with guessed geometry.
    let model = AtlasModel::from_file(&args.atlas)
        .with_context(|| format!("Failed to load atlas {}", args.atlas.display()))?;

    let atlas_dir = args
        .atlas
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let sheet_path = args
        .sheet
        .clone()
        .unwrap_or_else(|| path_config.resolve_sheet_ref(&atlas_dir, &model.meta().image));
    info!("Sheet image: {}", sheet_path.display());

    let pose = args
        .pose
        .clone()
        .or_else(|| model.first_pose().map(str::to_string))
        .unwrap_or_default();
    if model.frame_count(&pose) == 0 {
        // Valid "no animation" state: the player shows the empty-pose
        // message instead of animating.
        info!("Pose '{}' has no frames", pose);
    }

    let scheduler =
        PlaybackScheduler::new(pose, args.fps.unwrap_or(DEFAULT_FPS), !args.paused);
    let zoom = args.zoom.unwrap_or(1.0);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Spriteplay v{} - {}",
                env!("CARGO_PKG_VERSION"),
                args.atlas.display()
            ))
            .with_inner_size([1100.0, 700.0])
            .with_resizable(true),
        ..Default::default()
    };

    let app = App::new(model, sheet_path, scheduler, zoom);
    eframe::run_native(
        "Spriteplay",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    info!("Application exiting");
    Ok(())
}
