//! Transient status line shown under the canvas.

use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// How long a message stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A message with a timestamp; expired messages are dropped by the UI.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
    shown_at: Instant,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
            shown_at: Instant::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= STATUS_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_message_not_expired() {
        let line = StatusLine::info("ready");
        assert!(!line.is_expired(Instant::now()));
        assert!(!line.is_error());
    }

    #[test]
    fn test_expiry_after_ttl() {
        let line = StatusLine::error("boom");
        assert!(line.is_error());
        let later = Instant::now() + STATUS_TTL + Duration::from_millis(1);
        assert!(line.is_expired(later));
    }
}
