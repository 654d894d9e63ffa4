//! # agri-core - Core Domain Types
//!
//! Foundation crate for AgriDesk. Provides the prediction form and field
//! record domain types, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Prediction (`prediction`)
//! - [`PredictionMode`] - Crop, soil type, or fertilizer prediction
//! - [`InputField`] - The nine form inputs and their wire keys
//! - [`field_policy()`] - Per-mode required/disabled/optional table
//! - [`PredictionInput`] - Raw form values with [`PredictionInput::validate`]
//! - [`PredictionPayload`], [`PredictionResult`] - Wire body and response value
//!
//! ### Fields (`field`, `draft`)
//! - [`Field`] - A parcel record owned by the remote field store
//! - [`FieldPayload`] - Body for create/update calls
//! - [`FieldDraft`] - Typed, nested editable copy of a record
//! - [`DraftField`] - Addressable inputs of the field form
//!
//! ### Catalogs (`catalog`)
//! - [`SOIL_TYPES`], [`CROP_TYPES`], [`FERTILIZERS`] - Categorical vocabularies
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Setup errors: configuration, service URLs, IO
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use agri_core::prelude::*;
//! ```

pub mod catalog;
pub mod draft;
pub mod error;
pub mod field;
pub mod logging;
pub mod prediction;

/// Prelude for common imports used throughout all AgriDesk crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use catalog::{cycle_option, CROP_TYPES, FERTILIZERS, SOIL_TYPES};
pub use draft::{DraftError, DraftField, FieldDraft, LocationDraft};
pub use error::{Error, Result};
pub use field::{
    parse_calendar_date, AreaUnit, Field, FieldId, FieldPayload, FieldSoilType, FieldStatus,
    Location,
};
pub use prediction::{
    field_policy, FieldPolicy, InputField, InputKind, PredictionInput, PredictionMode,
    PredictionPayload, PredictionResult, ValidationError,
};
