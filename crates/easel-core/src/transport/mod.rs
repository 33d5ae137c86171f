//! Transport layer for backend commands.
//!
//! A transport delivers one serialized command to the backend endpoint and
//! reports the outcome as polled events, so the single-threaded UI loop
//! never blocks on the network. Platform implementations: a worker-thread
//! HTTP client on native, `fetch` on WASM.

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod http;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpTransport;

#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Outcome of a submitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The backend answered. Any HTTP status lands here; interpreting
    /// non-2xx bodies is the dispatcher's job.
    Completed { status: u16, body: String },
    /// The request never produced a response (connect/send/receive error).
    Failed { message: String },
}

/// Non-blocking request transport.
///
/// `submit` hands a request body off for delivery and returns immediately;
/// the outcome arrives through `poll`, drained once per frame. Callers
/// submit at most one request at a time.
pub trait Transport {
    fn submit(&mut self, body: String) -> Result<(), TransportError>;

    fn poll(&mut self) -> Vec<TransportEvent>;
}

/// Platform-specific transport type.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformTransport = HttpTransport;

#[cfg(target_arch = "wasm32")]
pub type PlatformTransport = FetchTransport;
