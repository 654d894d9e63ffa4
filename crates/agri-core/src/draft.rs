//! Editable draft of a field record
//!
//! [`FieldDraft`] mirrors [`Field`] with text inputs held as `String` so the
//! form can hold partial or invalid input. Nested inputs (the location) are
//! addressed through [`DraftField`], so updating the latitude never touches
//! the longitude or address.

use chrono::NaiveDate;
use thiserror::Error;

use crate::field::{
    AreaUnit, Field, FieldPayload, FieldSoilType, FieldStatus, Location,
};

/// Rejected draft conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Field name is required")]
    MissingName,

    #[error("Area must be a positive number")]
    InvalidArea,

    #[error("{0} is required")]
    MissingCoordinate(&'static str),

    #[error("{name} must be a number between -{limit} and {limit}")]
    InvalidCoordinate { name: &'static str, limit: u16 },

    #[error("{0} must be a date in YYYY-MM-DD format")]
    InvalidDate(&'static str),
}

/// Editable location sub-record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDraft {
    pub latitude: String,
    pub longitude: String,
    pub address: String,
}

/// Editable copy of a field record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDraft {
    pub field_name: String,
    pub crop: String,
    pub area: String,
    pub area_unit: AreaUnit,
    pub soil_type: FieldSoilType,
    pub location: LocationDraft,
    pub description: String,
    pub planting_date: String,
    pub expected_harvest_date: String,
    pub status: FieldStatus,
}

/// Inputs of the field form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftField {
    #[default]
    FieldName,
    Crop,
    Area,
    AreaUnit,
    SoilType,
    Latitude,
    Longitude,
    Address,
    Description,
    PlantingDate,
    ExpectedHarvestDate,
    Status,
}

impl DraftField {
    pub const ALL: [DraftField; 12] = [
        DraftField::FieldName,
        DraftField::Crop,
        DraftField::Area,
        DraftField::AreaUnit,
        DraftField::SoilType,
        DraftField::Latitude,
        DraftField::Longitude,
        DraftField::Address,
        DraftField::Description,
        DraftField::PlantingDate,
        DraftField::ExpectedHarvestDate,
        DraftField::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::FieldName => "Field Name",
            DraftField::Crop => "Crop",
            DraftField::Area => "Area",
            DraftField::AreaUnit => "Area Unit",
            DraftField::SoilType => "Soil Type",
            DraftField::Latitude => "Latitude",
            DraftField::Longitude => "Longitude",
            DraftField::Address => "Address",
            DraftField::Description => "Description",
            DraftField::PlantingDate => "Planting Date",
            DraftField::ExpectedHarvestDate => "Expected Harvest",
            DraftField::Status => "Status",
        }
    }

    /// Enumerated inputs are cycled rather than typed into
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            DraftField::AreaUnit | DraftField::SoilType | DraftField::Status
        )
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

impl FieldDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing record.
    ///
    /// Numbers become their string form and dates become `YYYY-MM-DD`.
    pub fn from_field(field: &Field) -> Self {
        Self {
            field_name: field.field_name.clone(),
            crop: field.crop.clone().unwrap_or_default(),
            area: field.area.to_string(),
            area_unit: field.area_unit,
            soil_type: field.soil_type,
            location: LocationDraft {
                latitude: field.location.latitude.to_string(),
                longitude: field.location.longitude.to_string(),
                address: field.location.address.clone().unwrap_or_default(),
            },
            description: field.description.clone().unwrap_or_default(),
            planting_date: format_date(field.planting_date),
            expected_harvest_date: format_date(field.expected_harvest_date),
            status: field.status,
        }
    }

    /// Text of a typed input; `None` for enumerated inputs
    pub fn text(&self, input: DraftField) -> Option<&str> {
        let value = match input {
            DraftField::FieldName => &self.field_name,
            DraftField::Crop => &self.crop,
            DraftField::Area => &self.area,
            DraftField::Latitude => &self.location.latitude,
            DraftField::Longitude => &self.location.longitude,
            DraftField::Address => &self.location.address,
            DraftField::Description => &self.description,
            DraftField::PlantingDate => &self.planting_date,
            DraftField::ExpectedHarvestDate => &self.expected_harvest_date,
            DraftField::AreaUnit | DraftField::SoilType | DraftField::Status => return None,
        };
        Some(value.as_str())
    }

    /// Mutable text of a typed input; `None` for enumerated inputs
    pub fn text_mut(&mut self, input: DraftField) -> Option<&mut String> {
        let value = match input {
            DraftField::FieldName => &mut self.field_name,
            DraftField::Crop => &mut self.crop,
            DraftField::Area => &mut self.area,
            DraftField::Latitude => &mut self.location.latitude,
            DraftField::Longitude => &mut self.location.longitude,
            DraftField::Address => &mut self.location.address,
            DraftField::Description => &mut self.description,
            DraftField::PlantingDate => &mut self.planting_date,
            DraftField::ExpectedHarvestDate => &mut self.expected_harvest_date,
            DraftField::AreaUnit | DraftField::SoilType | DraftField::Status => return None,
        };
        Some(value)
    }

    /// Replace the text of a typed input. Returns `false` for enumerated inputs.
    pub fn set_text(&mut self, input: DraftField, value: impl Into<String>) -> bool {
        match self.text_mut(input) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Step an enumerated input. Returns `false` for typed inputs.
    pub fn cycle_choice(&mut self, input: DraftField, forward: bool) -> bool {
        match input {
            DraftField::AreaUnit => self.area_unit = self.area_unit.toggle(),
            DraftField::SoilType => {
                self.soil_type = if forward {
                    self.soil_type.next()
                } else {
                    self.soil_type.prev()
                }
            }
            DraftField::Status => {
                self.status = if forward {
                    self.status.next()
                } else {
                    self.status.prev()
                }
            }
            _ => return false,
        }
        true
    }

    /// Display value of any input (enumerated inputs show their label)
    pub fn display_value(&self, input: DraftField) -> &str {
        match input {
            DraftField::AreaUnit => self.area_unit.label(),
            DraftField::SoilType => self.soil_type.label(),
            DraftField::Status => self.status.label(),
            other => self.text(other).unwrap_or_default(),
        }
    }

    /// Validate the draft and convert it into a store payload
    pub fn to_payload(&self) -> Result<FieldPayload, DraftError> {
        let field_name = self.field_name.trim();
        if field_name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let area = self
            .area
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or(DraftError::InvalidArea)?;

        let latitude = parse_coordinate(&self.location.latitude, "Latitude", 90)?;
        let longitude = parse_coordinate(&self.location.longitude, "Longitude", 180)?;

        Ok(FieldPayload {
            field_name: field_name.to_string(),
            crop: non_empty(&self.crop),
            area,
            area_unit: self.area_unit,
            soil_type: self.soil_type,
            location: Location {
                latitude,
                longitude,
                address: non_empty(&self.location.address),
            },
            description: non_empty(&self.description),
            planting_date: parse_date(&self.planting_date, "Planting date")?,
            expected_harvest_date: parse_date(
                &self.expected_harvest_date,
                "Expected harvest date",
            )?,
            status: self.status,
        })
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_coordinate(raw: &str, name: &'static str, limit: u16) -> Result<f64, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DraftError::MissingCoordinate(name));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= f64::from(limit))
        .ok_or(DraftError::InvalidCoordinate { name, limit })
}

fn parse_date(raw: &str, name: &'static str) -> Result<Option<NaiveDate>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DraftError::InvalidDate(name))
}
