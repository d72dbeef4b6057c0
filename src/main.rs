use std::sync::Arc;

use chalkbook::app::{ChalkbookApp, Nav};
use chalkbook::cli::Args;
use chalkbook::config;
use chalkbook::core::LocalStorage;

use clap::Parser;
use eframe::egui;
use log::{debug, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.data_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::config_file("chalkbook.log", &path_config));

        let file = std::fs::File::create(&log_path)
            .map_err(|e| format!("Failed to create log file {}: {}", log_path.display(), e))?;

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

    info!("Chalkbook starting...");
    debug!("Command-line args: {:?}", args);

    let content_dir = config::content_dir(&path_config);
    info!("Content directory: {}", content_dir.display());
    let storage = Arc::new(LocalStorage::open(&content_dir)?);

    let start = match args.page.as_deref() {
        Some(page) => Nav::from_arg(page).unwrap_or_else(|| {
            warn!("Unknown start page '{}', opening Blogs", page);
            Nav::default()
        }),
        None => Nav::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Chalkbook v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([1100.0, 720.0])
            .with_resizable(true),
        persist_window: true,
        persistence_path: Some(config::config_file("chalkbook.json", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "Chalkbook",
        native_options,
        Box::new(move |cc| Ok(Box::new(ChalkbookApp::new(cc, storage, start)))),
    )?;

    Ok(())
}
