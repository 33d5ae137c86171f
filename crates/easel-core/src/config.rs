//! Client configuration.
//!
//! Native builds read `easel/config.json` under the platform config
//! directory, with the `EASEL_ENDPOINT` environment variable taking
//! precedence for the backend URL. WASM builds use the defaults.

use crate::color::Rgba;
use crate::raster::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Backend endpoint assumed when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/draw";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid endpoint {0:?}: {1}")]
    InvalidEndpoint(String, String),
}

/// Defaults for freshly created canvases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDefaults {
    pub width: u32,
    pub height: u32,
    pub color: Rgba,
}

impl Default for CanvasDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            color: Rgba::white(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaselConfig {
    /// Backend endpoint receiving drawing commands.
    pub endpoint: String,
    pub canvas: CanvasDefaults,
}

impl Default for EaselConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            canvas: CanvasDefaults::default(),
        }
    }
}

impl EaselConfig {
    /// Load the effective configuration for this platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .and_then(|path| match Self::load_from(&path) {
                Ok(config) => Some(config),
                Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    log::warn!("ignoring unreadable config {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_default();
        if let Ok(endpoint) = std::env::var("EASEL_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Err(e) = config.validate_endpoint() {
            log::warn!("{e}; falling back to {DEFAULT_ENDPOINT}");
            config.endpoint = DEFAULT_ENDPOINT.to_string();
        }
        config
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Path of the config file (`<config dir>/easel/config.json`).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("easel").join("config.json"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check that the endpoint is an absolute http(s) URL.
    pub fn validate_endpoint(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(self.endpoint.clone(), e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidEndpoint(
                self.endpoint.clone(),
                format!("unsupported scheme {:?}", url.scheme()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EaselConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.height, 600);
        assert!(config.validate_endpoint().is_ok());
    }

    #[test]
    fn test_endpoint_validation() {
        let mut config = EaselConfig::default();
        config.endpoint = "ftp://example.com/draw".into();
        assert!(config.validate_endpoint().is_err());
        config.endpoint = "/relative/path".into();
        assert!(config.validate_endpoint().is_err());
        config.endpoint = "https://paint.example.com/api/draw".into();
        assert!(config.validate_endpoint().is_ok());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = EaselConfig::default();
        config.endpoint = "http://paint.example.com/api/draw".into();
        config.canvas.width = 1024;
        config.save_to(&path).unwrap();

        let loaded = EaselConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"endpoint":"http://example.com/d"}"#).unwrap();

        let loaded = EaselConfig::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, "http://example.com/d");
        assert_eq!(loaded.canvas, CanvasDefaults::default());
    }
}
