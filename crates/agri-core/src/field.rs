//! Agricultural field records as held by the remote field store
//!
//! A "field" here is a parcel of land, not a form input. Records are owned
//! by the external store; this crate only reads them and builds
//! [`FieldPayload`]s for create/update calls.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unit of [`Field::area`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    #[default]
    Acres,
    Hectares,
}

impl AreaUnit {
    pub fn label(&self) -> &'static str {
        match self {
            AreaUnit::Acres => "acres",
            AreaUnit::Hectares => "hectares",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            AreaUnit::Acres => AreaUnit::Hectares,
            AreaUnit::Hectares => AreaUnit::Acres,
        }
    }
}

impl<'de> Deserialize<'de> for AreaUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "hectares" | "hectare" | "ha" => AreaUnit::Hectares,
            _ => AreaUnit::default(),
        })
    }
}

/// Soil classification stored on a field record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum FieldSoilType {
    Clay,
    Sandy,
    #[default]
    Loamy,
    Silt,
    Peat,
    Chalk,
    #[serde(other)]
    Other,
}

impl FieldSoilType {
    pub const ALL: [FieldSoilType; 7] = [
        FieldSoilType::Clay,
        FieldSoilType::Sandy,
        FieldSoilType::Loamy,
        FieldSoilType::Silt,
        FieldSoilType::Peat,
        FieldSoilType::Chalk,
        FieldSoilType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldSoilType::Clay => "Clay",
            FieldSoilType::Sandy => "Sandy",
            FieldSoilType::Loamy => "Loamy",
            FieldSoilType::Silt => "Silt",
            FieldSoilType::Peat => "Peat",
            FieldSoilType::Chalk => "Chalk",
            FieldSoilType::Other => "Other",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Lifecycle status; `Archived` is the soft-deleted state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FieldStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl FieldStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FieldStatus::Active => "Active",
            FieldStatus::Inactive => "Inactive",
            FieldStatus::Archived => "Archived",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FieldStatus::Active => FieldStatus::Inactive,
            FieldStatus::Inactive => FieldStatus::Archived,
            FieldStatus::Archived => FieldStatus::Active,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FieldStatus::Active => FieldStatus::Archived,
            FieldStatus::Inactive => FieldStatus::Active,
            FieldStatus::Archived => FieldStatus::Inactive,
        }
    }
}

/// Case-insensitive; statuses this client does not know read as `Active`
/// so one odd record cannot fail a whole listing.
impl<'de> Deserialize<'de> for FieldStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "inactive" => FieldStatus::Inactive,
            "archived" => FieldStatus::Archived,
            _ => FieldStatus::default(),
        })
    }
}

/// Geographic location of a field
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A field record as returned by the store
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(alias = "_id")]
    pub id: FieldId,
    pub field_name: String,
    #[serde(default)]
    pub crop: Option<String>,
    pub area: f64,
    #[serde(default)]
    pub area_unit: AreaUnit,
    #[serde(default)]
    pub soil_type: FieldSoilType,
    pub location: Location,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "calendar_date")]
    pub planting_date: Option<NaiveDate>,
    #[serde(default, with = "calendar_date")]
    pub expected_harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: FieldStatus,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
    #[serde(default)]
    pub expenses: Vec<serde_json::Value>,
    #[serde(default)]
    pub tasks: Vec<serde_json::Value>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Field {
    pub fn is_archived(&self) -> bool {
        self.status == FieldStatus::Archived
    }

    /// Area with its unit, e.g. `12.5 acres`
    pub fn area_display(&self) -> String {
        format!("{} {}", self.area, self.area_unit.label())
    }
}

/// Body of create/update calls
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPayload {
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    pub area: f64,
    pub area_unit: AreaUnit,
    pub soil_type: FieldSoilType,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "calendar_date"
    )]
    pub planting_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "calendar_date"
    )]
    pub expected_harvest_date: Option<NaiveDate>,
    pub status: FieldStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Date Handling
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a calendar date from any of the shapes the store emits.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date as written, not
/// shifted to UTC), and naive date-times with a `T` or space separator.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }

    // Last resort: leading date component of an unknown timestamp format
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Serde adapter for optional calendar dates (`YYYY-MM-DD` on output)
pub mod calendar_date {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        // Non-string and unparseable values read as "no date"
        let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(parse_calendar_date))
    }
}

/// Serde adapter for the lenient `createdAt` timestamp.
///
/// Unparseable values become `None` rather than failing the whole record.
mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(t) => serializer.serialize_str(&t.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(|s| {
            DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
        }))
    }
}
