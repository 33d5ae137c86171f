//! Easel Render Library
//!
//! CPU-side raster work for the drawing client: decoding backend image
//! payloads, encoding snapshots to PNG, and rasterizing finished gestures
//! into the base bitmap for the optimistic local commit.

pub mod codec;
pub mod draw;

pub use codec::{decode_data_url, encode_data_url, encode_png};
pub use draw::draw_shape;

use thiserror::Error;

/// Render/codec errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Protocol(#[from] easel_core::protocol::ProtocolError),
    #[error("unsupported image payload: {0}")]
    UnsupportedMime(String),
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("image encode failed: {0}")]
    Encode(String),
}
