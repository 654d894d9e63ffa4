//! # agri-client - Remote Service Transports
//!
//! HTTP clients for the two backends AgriDesk talks to: the prediction
//! service and the field store.
//!
//! Depends on [`agri_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Prediction Service
//! - [`PredictionApi`] - Submit a validated payload for one prediction mode
//! - [`HttpPredictionClient`] - reqwest implementation, one endpoint per mode
//! - [`PredictionError`] - Validation / server / network / unexpected failures
//!
//! ### Field Store
//! - [`FieldsApi`] - List, create, update, and delete field records
//! - [`HttpFieldsApi`] - reqwest implementation of the REST store
//! - [`StoreError`] - Failed store call, carries a display message
//!
//! Both traits come in a `Send` flavour (used by the engine, which spawns
//! calls onto tokio) and a `Local*` flavour.

pub mod errors;
pub mod fields;
pub mod http;
pub mod prediction;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use errors::{error_detail, PredictionError, PredictionErrorKind, StoreError};
pub use fields::{FieldsApi, HttpFieldsApi, LocalFieldsApi};
pub use http::{build_client, parse_base_url};
pub use prediction::{HttpPredictionClient, LocalPredictionApi, PredictionApi};
