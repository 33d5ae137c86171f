//! Easel Core Library
//!
//! Platform-agnostic client logic for the Easel drawing client: pointer
//! gesture capture, the local snapshot history, the wire protocol spoken to
//! the rendering backend, and the command dispatcher that drives it.

pub mod color;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod input;
pub mod protocol;
pub mod raster;
pub mod status;
pub mod tools;
pub mod transport;

pub use color::Rgba;
pub use config::EaselConfig;
pub use dispatch::{DispatchEvent, Dispatcher};
pub use history::SnapshotHistory;
pub use input::{PathPoint, PointerDevice, PointerEvent};
pub use raster::RasterImage;
pub use status::{StatusKind, StatusLine};
pub use tools::{GestureOutcome, ToolKind, ToolManager, ToolSettings};
pub use transport::{PlatformTransport, Transport, TransportError, TransportEvent};
