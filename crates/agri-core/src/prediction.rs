//! Prediction form domain types
//!
//! Defines:
//! - [`PredictionMode`] - Which target the remote model is asked to infer
//! - [`InputField`] - The nine form inputs
//! - [`FieldPolicy`] / [`field_policy`] - Per-mode required/disabled table
//! - [`PredictionInput`] - Raw, unparsed form values
//! - [`PredictionPayload`] - Validated wire body
//! - [`PredictionResult`] - Opaque scalar returned by the service

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CROP_TYPES, FERTILIZERS, SOIL_TYPES};

// ─────────────────────────────────────────────────────────────────────────────
// Prediction Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Prediction target. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum PredictionMode {
    #[default]
    #[serde(rename = "crop", alias = "crop_prediction")]
    CropPrediction,
    #[serde(rename = "soil", alias = "soil_prediction")]
    SoilPrediction,
    #[serde(rename = "fertilizer", alias = "fertilizer_prediction")]
    FertilizerPrediction,
}

impl PredictionMode {
    pub const ALL: [PredictionMode; 3] = [
        PredictionMode::CropPrediction,
        PredictionMode::SoilPrediction,
        PredictionMode::FertilizerPrediction,
    ];

    /// Endpoint path segment for this mode
    pub fn slug(&self) -> &'static str {
        match self {
            PredictionMode::CropPrediction => "crop_prediction",
            PredictionMode::SoilPrediction => "soil_prediction",
            PredictionMode::FertilizerPrediction => "fertilizer_prediction",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictionMode::CropPrediction => "Crop",
            PredictionMode::SoilPrediction => "Soil Type",
            PredictionMode::FertilizerPrediction => "Fertilizer",
        }
    }

    /// The input this mode predicts (sent blank on the wire)
    pub fn target(&self) -> InputField {
        match self {
            PredictionMode::CropPrediction => InputField::CropType,
            PredictionMode::SoilPrediction => InputField::SoilType,
            PredictionMode::FertilizerPrediction => InputField::FertilizerName,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::CropPrediction => Self::SoilPrediction,
            Self::SoilPrediction => Self::FertilizerPrediction,
            Self::FertilizerPrediction => Self::CropPrediction,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::CropPrediction => Self::FertilizerPrediction,
            Self::SoilPrediction => Self::CropPrediction,
            Self::FertilizerPrediction => Self::SoilPrediction,
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionMode::CropPrediction => write!(f, "crop"),
            PredictionMode::SoilPrediction => write!(f, "soil"),
            PredictionMode::FertilizerPrediction => write!(f, "fertilizer"),
        }
    }
}

impl FromStr for PredictionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crop" | "crop_prediction" => Ok(Self::CropPrediction),
            "soil" | "soil_prediction" => Ok(Self::SoilPrediction),
            "fertilizer" | "fertilizer_prediction" => Ok(Self::FertilizerPrediction),
            other => Err(format!(
                "unknown prediction mode '{other}' (expected crop, soil or fertilizer)"
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Fields & Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Whether an input holds a number or one of a fixed set of labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Numeric,
    Categorical,
}

/// The nine inputs of the prediction form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Temperature,
    Humidity,
    Moisture,
    SoilType,
    CropType,
    Nitrogen,
    Potassium,
    Phosphorous,
    FertilizerName,
}

impl InputField {
    pub const ALL: [InputField; 9] = [
        InputField::Temperature,
        InputField::Humidity,
        InputField::Moisture,
        InputField::SoilType,
        InputField::CropType,
        InputField::Nitrogen,
        InputField::Potassium,
        InputField::Phosphorous,
        InputField::FertilizerName,
    ];

    /// Numeric inputs in validation order
    pub const NUMERIC: [InputField; 6] = [
        InputField::Temperature,
        InputField::Humidity,
        InputField::Moisture,
        InputField::Nitrogen,
        InputField::Potassium,
        InputField::Phosphorous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InputField::Temperature => "Temperature",
            InputField::Humidity => "Humidity",
            InputField::Moisture => "Moisture",
            InputField::SoilType => "Soil Type",
            InputField::CropType => "Crop Type",
            InputField::Nitrogen => "Nitrogen",
            InputField::Potassium => "Potassium",
            InputField::Phosphorous => "Phosphorous",
            InputField::FertilizerName => "Fertilizer",
        }
    }

    /// JSON key used by the prediction service (spelling is the service's)
    pub fn wire_key(&self) -> &'static str {
        match self {
            InputField::Temperature => "Temparature",
            InputField::Humidity => "Humidity",
            InputField::Moisture => "Moisture",
            InputField::SoilType => "Soil_Type",
            InputField::CropType => "Crop_Type",
            InputField::Nitrogen => "Nitrogen",
            InputField::Potassium => "Potassium",
            InputField::Phosphorous => "Phosphorous",
            InputField::FertilizerName => "Fertilizer_Name",
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            InputField::SoilType | InputField::CropType | InputField::FertilizerName => {
                InputKind::Categorical
            }
            _ => InputKind::Numeric,
        }
    }

    /// Allowed values for categorical inputs (empty for numeric ones)
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            InputField::SoilType => SOIL_TYPES,
            InputField::CropType => CROP_TYPES,
            InputField::FertilizerName => FERTILIZERS,
            _ => &[],
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// How a form input behaves under a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Must be filled in before submitting
    Required,
    /// Target of the mode: shown but not editable, sent blank
    Disabled,
    /// May be left empty
    Optional,
}

/// Pure policy table from mode and input to its behaviour
pub fn field_policy(mode: PredictionMode, field: InputField) -> FieldPolicy {
    if field.kind() == InputKind::Numeric {
        return FieldPolicy::Required;
    }
    if field == mode.target() {
        return FieldPolicy::Disabled;
    }

    match (mode, field) {
        (PredictionMode::CropPrediction, InputField::SoilType) => FieldPolicy::Required,
        (PredictionMode::SoilPrediction, InputField::CropType) => FieldPolicy::Required,
        (PredictionMode::FertilizerPrediction, InputField::SoilType)
        | (PredictionMode::FertilizerPrediction, InputField::CropType) => FieldPolicy::Required,
        _ => FieldPolicy::Optional,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prediction Input
// ─────────────────────────────────────────────────────────────────────────────

/// A rejected submission, detected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending input
    pub field: InputField,
    pub message: String,
}

impl ValidationError {
    fn invalid_number(field: InputField) -> Self {
        Self {
            field,
            message: format!("Please enter a valid number for {}", field.label()),
        }
    }

    fn missing_selection(field: InputField) -> Self {
        let message = match field {
            InputField::SoilType => "Please select a soil type".to_string(),
            InputField::CropType => "Please select a crop type".to_string(),
            InputField::FertilizerName => "Please select a fertilizer".to_string(),
            other => format!("Please fill in {}", other.label()),
        };
        Self { field, message }
    }
}

/// Raw form values; nothing is parsed until submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionInput {
    pub temperature: String,
    pub humidity: String,
    pub moisture: String,
    pub soil_type: String,
    pub crop_type: String,
    pub nitrogen: String,
    pub potassium: String,
    pub phosphorous: String,
    pub fertilizer_name: String,
}

impl PredictionInput {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Temperature => &self.temperature,
            InputField::Humidity => &self.humidity,
            InputField::Moisture => &self.moisture,
            InputField::SoilType => &self.soil_type,
            InputField::CropType => &self.crop_type,
            InputField::Nitrogen => &self.nitrogen,
            InputField::Potassium => &self.potassium,
            InputField::Phosphorous => &self.phosphorous,
            InputField::FertilizerName => &self.fertilizer_name,
        }
    }

    pub fn get_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Temperature => &mut self.temperature,
            InputField::Humidity => &mut self.humidity,
            InputField::Moisture => &mut self.moisture,
            InputField::SoilType => &mut self.soil_type,
            InputField::CropType => &mut self.crop_type,
            InputField::Nitrogen => &mut self.nitrogen,
            InputField::Potassium => &mut self.potassium,
            InputField::Phosphorous => &mut self.phosphorous,
            InputField::FertilizerName => &mut self.fertilizer_name,
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        InputField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Validate the raw values for `mode` and build the wire payload.
    ///
    /// Numeric inputs are checked first, in [`InputField::NUMERIC`] order,
    /// then the mode's required selections. The mode's target is blanked in
    /// the payload even if the form still holds a value for it.
    pub fn validate(&self, mode: PredictionMode) -> Result<PredictionPayload, ValidationError> {
        let mut numbers = [0.0_f64; 6];
        for (slot, field) in numbers.iter_mut().zip(InputField::NUMERIC) {
            *slot = parse_number(self.get(field))
                .ok_or_else(|| ValidationError::invalid_number(field))?;
        }

        for field in [
            InputField::SoilType,
            InputField::CropType,
            InputField::FertilizerName,
        ] {
            if field_policy(mode, field) == FieldPolicy::Required
                && self.get(field).trim().is_empty()
            {
                return Err(ValidationError::missing_selection(field));
            }
        }

        let categorical = |field: InputField| -> String {
            match field_policy(mode, field) {
                FieldPolicy::Disabled => String::new(),
                _ => self.get(field).trim().to_string(),
            }
        };

        let [temperature, humidity, moisture, nitrogen, potassium, phosphorous] = numbers;
        Ok(PredictionPayload {
            temperature,
            humidity,
            moisture,
            soil_type: categorical(InputField::SoilType),
            crop_type: categorical(InputField::CropType),
            nitrogen,
            potassium,
            phosphorous,
            fertilizer_name: categorical(InputField::FertilizerName),
        })
    }
}

/// Parse a finite floating point number, ignoring surrounding whitespace
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body posted to `{base_url}/{mode-slug}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionPayload {
    #[serde(rename = "Temparature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Moisture")]
    pub moisture: f64,
    #[serde(rename = "Soil_Type")]
    pub soil_type: String,
    #[serde(rename = "Crop_Type")]
    pub crop_type: String,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "Phosphorous")]
    pub phosphorous: f64,
    #[serde(rename = "Fertilizer_Name")]
    pub fertilizer_name: String,
}

/// Opaque value from the `result` key of a prediction response
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult(pub serde_json::Value);

impl PredictionResult {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Extract the `result` key from a response body.
    ///
    /// Returns `None` when the body is not an object or has no `result`.
    pub fn from_response(body: &serde_json::Value) -> Option<Self> {
        body.get("result").cloned().map(Self)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => write!(f, "{s}"),
            serde_json::Value::Null => write!(f, "-"),
            other => write!(f, "{other}"),
        }
    }
}
