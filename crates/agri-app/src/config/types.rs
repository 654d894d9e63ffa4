//! Configuration types for AgriDesk
//!
//! Defines:
//! - `Settings` - Global application settings (`config.toml`)
//! - `ApiSettings`, `StoreSettings`, `UiSettings` - Its sections
//! - `ConfigOverrides` - Command-line overrides applied after loading

use std::time::Duration;

use agri_core::prelude::*;
use agri_core::PredictionMode;
use serde::{Deserialize, Serialize};
use url::Url;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Prediction service settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL; endpoints are `{base}/{mode}_prediction/`
    #[serde(default = "default_prediction_base_url")]
    pub prediction_base_url: String,

    /// Whole-request timeout in seconds (0 = no timeout)
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            prediction_base_url: default_prediction_base_url(),
            request_timeout_secs: 0,
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Field store settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreSettings {
    /// REST base URL; records live under `{base}/fields`
    #[serde(default = "default_store_base_url")]
    pub base_url: String,

    /// Remove records instead of archiving them
    #[serde(default)]
    pub hard_delete: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            hard_delete: false,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Prediction mode selected at startup
    #[serde(default)]
    pub default_mode: PredictionMode,

    /// Show archived records in the field list
    #[serde(default)]
    pub show_archived: bool,

    /// Ask before quitting while a request is in flight
    #[serde(default)]
    pub confirm_quit: bool,
}

fn default_prediction_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_store_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

impl Settings {
    /// Check that both service URLs are absolute http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        validate_service_url("api.prediction_base_url", &self.api.prediction_base_url)?;
        validate_service_url("store.base_url", &self.store.base_url)?;
        Ok(())
    }
}

fn validate_service_url(key: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::config_invalid(format!("{key} = '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config_invalid(format!(
            "{key} = '{raw}': scheme must be http or https"
        )));
    }
    Ok(())
}

/// Values given on the command line, applied over the loaded settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub prediction_base_url: Option<String>,
    pub store_base_url: Option<String>,
    pub default_mode: Option<PredictionMode>,
}

impl ConfigOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.prediction_base_url {
            settings.api.prediction_base_url = url.clone();
        }
        if let Some(url) = &self.store_base_url {
            settings.store.base_url = url.clone();
        }
        if let Some(mode) = self.default_mode {
            settings.ui.default_mode = mode;
        }
    }
}
