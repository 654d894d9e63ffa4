//! Settings parser for `config.toml`

use std::path::{Path, PathBuf};

use super::types::Settings;
use agri_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "agridesk";

/// Default location: `{config_dir}/agridesk/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `config_path`
///
/// Returns default settings if the file doesn't exist, can't be parsed, or
/// names an invalid service URL.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let settings: Settings = match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                return Settings::default();
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            return Settings::default();
        }
    };

    if let Err(e) = settings.validate() {
        warn!("Ignoring {:?}: {}", config_path, e);
        return Settings::default();
    }

    debug!("Loaded settings from {:?}", config_path);
    settings
}

/// Write a commented default config file if none exists
pub fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }

    ensure_parent_dir(config_path)?;
    std::fs::write(config_path, generate_default_config())
        .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;

    info!("Created default config at {:?}", config_path);
    Ok(())
}

/// Save settings to `config_path`
///
/// Uses atomic write (temp file + rename).
pub fn save_settings(config_path: &Path, settings: &Settings) -> Result<()> {
    ensure_parent_dir(config_path)?;

    let temp_path = config_path.with_file_name(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

fn ensure_parent_dir(config_path: &Path) -> Result<()> {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e))),
        _ => Ok(()),
    }
}

fn generate_config_header() -> String {
    "# AgriDesk Configuration\n\n".to_string()
}

fn generate_default_config() -> String {
    r#"# AgriDesk Configuration

[api]
prediction_base_url = "http://127.0.0.1:8000"
request_timeout_secs = 0    # 0 = no timeout

[store]
base_url = "http://127.0.0.1:5000/api"
hard_delete = false         # true removes records instead of archiving them

[ui]
default_mode = "crop"       # crop, soil or fertilizer
show_archived = false
confirm_quit = false        # Ask before quitting with a request in flight
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::PredictionMode;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults_when_missing() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
prediction_base_url = "http://models.local:8080"
request_timeout_secs = 20

[store]
hard_delete = true

[ui]
default_mode = "soil"
show_archived = true
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.api.prediction_base_url, "http://models.local:8080");
        assert_eq!(settings.api.request_timeout_secs, 20);
        assert!(settings.store.hard_delete);
        assert_eq!(settings.store.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(settings.ui.default_mode, PredictionMode::SoilPrediction);
        assert!(settings.ui.show_archived);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[api\nprediction_base_url = ").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_load_settings_invalid_url_falls_back() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[store]\nbase_url = \"ftp://files\"\n").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_init_config_writes_parseable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("agridesk").join("config.toml");

        init_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_init_config_keeps_existing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[ui]\nshow_archived = true\n").unwrap();

        init_config(&path).unwrap();
        assert!(load_settings(&path).ui.show_archived);
    }

    #[test]
    fn test_save_settings_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.store.hard_delete = true;
        settings.ui.default_mode = PredictionMode::FertilizerPrediction;

        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path), settings);
        assert!(!temp.path().join("nested").join(".config.toml.tmp").exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# AgriDesk Configuration"));
    }
}
