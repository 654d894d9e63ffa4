//! Configuration file parsing for AgriDesk
//!
//! Supports:
//! - `{config_dir}/agridesk/config.toml` - Global settings
//! - Command-line overrides layered on top

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config, load_settings, save_settings};
pub use types::*;
