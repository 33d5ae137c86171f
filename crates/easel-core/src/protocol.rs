//! Wire protocol spoken to the rendering backend.
//!
//! Every user action becomes one JSON command POSTed to the backend; the
//! backend replies with the full rasterized canvas as a PNG data URL plus
//! authoritative undo/redo flags. The backend is a black box: the client
//! never rasterizes authoritatively, it only previews and optimistically
//! commits.

use crate::color::Rgba;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A drawing command sent to the backend, tagged by `tool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Command {
    /// Freehand path. `color` absent means an eraser stroke.
    Stroke {
        path: Vec<[i32; 2]>,
        size: u32,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "crate::color::wire_hex::opt"
        )]
        color: Option<Rgba>,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        #[serde(with = "crate::color::wire_hex")]
        color: Rgba,
        size: u32,
    },
    Rectangle {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        #[serde(with = "crate::color::wire_hex")]
        color: Rgba,
        size: u32,
        fill: bool,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "crate::color::wire_hex::opt"
        )]
        fill_color: Option<Rgba>,
    },
    /// Flood fill starting at a pixel.
    Fill {
        x: i32,
        y: i32,
        #[serde(with = "crate::color::wire_hex")]
        color: Rgba,
    },
    /// Discard the session and start a fresh canvas.
    NewCanvas {
        width: u32,
        height: u32,
        #[serde(with = "crate::color::wire_hex")]
        color: Rgba,
    },
    Undo,
    Redo,
    /// Fetch the current session canvas (or create one with the given
    /// dimensions when the session is new).
    Init {
        width: u32,
        height: u32,
        #[serde(with = "crate::color::wire_hex")]
        color: Rgba,
    },
}

impl Command {
    /// Short name for logs and status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Stroke { color: Some(_), .. } => "stroke",
            Command::Stroke { color: None, .. } => "erase",
            Command::Line { .. } => "line",
            Command::Rectangle { .. } => "rectangle",
            Command::Fill { .. } => "fill",
            Command::NewCanvas { .. } => "new canvas",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Init { .. } => "init",
        }
    }

    /// Whether a successful response to this command resets the local
    /// snapshot history (fresh or re-fetched canvas).
    pub fn resets_history(&self) -> bool {
        matches!(self, Command::NewCanvas { .. } | Command::Init { .. })
    }
}

/// Backend response. Success and error replies share one shape: a 2xx reply
/// carries `image_data_url` and the history flags, an error reply carries
/// `error` (and may still report flags).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
    #[serde(default)]
    pub can_undo: bool,
    #[serde(default)]
    pub can_redo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn parse(body: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Split a `data:<mime>;base64,<payload>` URL into its mime type and bytes.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>), ProtocolError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ProtocolError::InvalidDataUrl("missing data: prefix".into()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| ProtocolError::InvalidDataUrl("missing ;base64, separator".into()))?;
    if mime.is_empty() {
        return Err(ProtocolError::InvalidDataUrl("empty mime type".into()));
    }
    let bytes = BASE64.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Build a `data:` URL from a mime type and raw bytes.
pub fn make_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}
