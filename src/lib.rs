//! PROS site (pros-site)
//!
//! Responsive rendering and scroll-driven UI state for the PROS customs
//! office site, with a terminal host that previews it.
//!
//! Pure Core / Impure Shell: `engine`, `model`, `state` and `view_state`
//! never touch the terminal; `view` is the crossterm/ratatui shell that
//! measures the viewport and feeds events in.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
pub mod view_state;
