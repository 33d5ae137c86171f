//! eframe application state and frame loop.

use crate::session::PlatformSession;
use easel_core::Rgba;
use easel_core::config::EaselConfig;
use easel_core::transport::TransportError;
use std::time::Duration;

/// State of the "New canvas" dialog.
pub struct NewCanvasPanel {
    pub open: bool,
    pub width: u32,
    pub height: u32,
    pub color: egui::Color32,
}

pub struct EaselApp {
    pub(crate) session: PlatformSession,
    pub(crate) texture: Option<egui::TextureHandle>,
    pub(crate) texture_revision: Option<u64>,
    pub(crate) new_canvas: NewCanvasPanel,
    /// Last pointer position over the canvas, for leave events.
    pub(crate) last_canvas_pos: Option<kurbo::Point>,
}

impl EaselApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, TransportError> {
        let config = EaselConfig::load();
        log::info!("backend endpoint: {}", config.endpoint);
        let defaults = config.canvas;
        let session = PlatformSession::from_config(config)?;
        Ok(Self {
            session,
            texture: None,
            texture_revision: None,
            new_canvas: NewCanvasPanel {
                open: false,
                width: defaults.width,
                height: defaults.height,
                color: to_color32(defaults.color),
            },
            last_canvas_pos: None,
        })
    }
}

impl eframe::App for EaselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.tick() {
            ctx.request_repaint();
        }

        self.handle_shortcuts(ctx);
        self.toolbar_panel(ctx);
        self.options_panel(ctx);
        self.status_panel(ctx);
        self.canvas_panel(ctx);
        self.new_canvas_window(ctx);

        // The transport reports through polled events, so keep frames coming
        // while a command is in flight; a slower cadence covers status-line
        // expiry.
        if self.session.busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else if self.session.status().is_some() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}

pub(crate) fn to_color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub(crate) fn from_color32(color: egui::Color32) -> Rgba {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba::new(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color32_roundtrip() {
        let original = Rgba::new(12, 34, 56, 255);
        assert_eq!(from_color32(to_color32(original)), original);
    }
}
