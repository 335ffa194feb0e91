// LogLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Session restore and request-log loading
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use loglens::app;

pub use loglens::core;
pub use loglens::platform;
pub use loglens::ui;
pub use loglens::util;

use crate::core::timezone::{FixedZoneResolver, SystemZoneResolver, ZoneResolver};
use clap::Parser;
use std::path::PathBuf;

/// LogLens - Request-log filter console.
///
/// Filters an exported API request log by method, status, IP address,
/// endpoint, user, and a local date/time range that is converted to UTC.
#[derive(Parser, Debug)]
#[command(name = "LogLens", version, about)]
struct Cli {
    /// Request-log export (JSON array) to open.
    entries: Option<PathBuf>,

    /// IANA timezone for date inputs (overrides config and system zone).
    #[arg(short = 't', long = "timezone")]
    timezone: Option<String>,

    /// Ignore the saved session and start from today's defaults.
    #[arg(long = "fresh")]
    fresh: bool,

    /// Directory containing config.toml.
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Apply theme and body font size from config.
fn configure_style(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        for text_style in [
            egui::TextStyle::Body,
            egui::TextStyle::Button,
            egui::TextStyle::Monospace,
        ] {
            if let Some(font) = style.text_styles.get_mut(&text_style) {
                font.size = font_size;
            }
        }
    });
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform_paths.config_dir.clone());

    // Config is read before logging so its level and file can apply.
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogLens starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Zone source: CLI override > config override > host zone
    let zone_override = match cli.timezone.as_deref() {
        Some(name) => match crate::core::timezone::parse_zone(name) {
            Ok(tz) => Some(tz),
            Err(e) => {
                let err = util::error::LogLensError::from(e);
                tracing::error!(error = %err, "Invalid --timezone");
                eprintln!("Error: {err}");
                std::process::exit(2);
            }
        },
        None => config.timezone,
    };
    let resolver: Box<dyn ZoneResolver> = match zone_override {
        Some(tz) => Box::new(FixedZoneResolver(tz)),
        None => Box::new(SystemZoneResolver),
    };

    // Session restore
    let session_path = app::session::session_path(&platform_paths.data_dir);
    let restored = if cli.fresh {
        tracing::info!("Starting fresh; saved session ignored");
        None
    } else {
        app::session::load(&session_path)
    };
    let (initial_filters, restored_entries) = match restored {
        Some(session) => (Some(session.filters), session.entries_path),
        None => (None, None),
    };

    let mut state = app::state::AppState::new(
        initial_filters,
        config.toolbar_options(),
        chrono::Utc::now(),
        Some(session_path),
        cli.debug,
    );
    state.warnings.extend(config_warnings);

    // CLI path wins over the path remembered in the session.
    if let Some(path) = cli.entries.or(restored_entries) {
        state.load_entries(&path);
    }

    tracing::info!(entries = state.entries.len(), "Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_style(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::LogLensApp::new(state, resolver)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogLens GUI: {e}");
        std::process::exit(1);
    }
}
