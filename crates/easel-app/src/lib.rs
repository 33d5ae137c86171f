//! Easel application shell.
//!
//! Wires the core session (gesture capture, history, dispatcher) into an
//! eframe UI: toolbar, tool options, the canvas view with its live preview
//! overlay, and the status bar.

pub mod app;
pub mod panels;
pub mod session;
pub mod shortcuts;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::EaselApp;
pub use session::{PlatformSession, Session};
