//! agri-tui - Terminal UI for AgriDesk
//!
//! This crate provides the ratatui-based terminal interface. It drives an
//! [`agri_app::Engine`] and adds terminal rendering, event polling, and
//! widget display.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main entry point
pub use runner::run;
