//! agri-app - Application state and orchestration for AgriDesk
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! the Engine abstraction that owns state and background tasks, and configuration
//! loading. The prediction form and the field manager are plain state machines
//! driven by [`Message`]s; remote calls leave the update function as
//! [`UpdateAction`]s.

pub mod actions;
pub mod config;
pub mod engine;
pub mod field_manager;
pub mod field_store;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod prediction_form;
pub mod process;
pub mod state;

// Re-export primary types
pub use engine::{Engine, HttpEngine};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, Screen, UiMode};
