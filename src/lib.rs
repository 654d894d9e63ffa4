//! AgriDesk Library
//!
//! Terminal client for crop, soil and fertilizer prediction and for managing
//! the farm's field records.

use std::path::{Path, PathBuf};

use agri_app::config::{self, ConfigOverrides, Settings};
use agri_app::HttpEngine;
use agri_core::prelude::*;

/// What the command line asked for
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit config file; the per-user default when unset
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

/// Config file to read: the explicit one, else the per-user default
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(config::default_config_path)
}

/// Load settings from the config file and layer command-line overrides on top
pub fn resolve_settings(options: &RunOptions) -> Settings {
    let mut settings = match config_path(options.config_path.as_deref()) {
        Some(path) => config::load_settings(&path),
        None => {
            warn!("No config directory on this platform, using defaults");
            Settings::default()
        }
    };
    options.overrides.apply(&mut settings);
    settings
}

/// Persist the effective settings (file plus overrides) to the config file.
///
/// Invalid URLs are rejected before anything is written. Returns the path
/// written to.
pub fn save_effective_settings(options: &RunOptions) -> Result<PathBuf> {
    let path = config_path(options.config_path.as_deref()).ok_or_else(|| {
        Error::config("No config directory on this platform; pass --config PATH")
    })?;

    let settings = resolve_settings(options);
    settings.validate()?;
    config::save_settings(&path, &settings)?;
    Ok(path)
}

/// Main application entry point
pub async fn run(options: RunOptions) -> Result<()> {
    // Initialize logging
    agri_core::logging::init()?;

    let settings = resolve_settings(&options);
    info!(
        "Settings: prediction={}, store={}, mode={:?}",
        settings.api.prediction_base_url, settings.store.base_url, settings.ui.default_mode
    );

    let engine = HttpEngine::from_settings(settings)?;
    let result = agri_tui::run(engine).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("AgriDesk exiting");
    result
}
