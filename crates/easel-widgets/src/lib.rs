//! Reusable egui widget components for the Easel drawing client:
//!
//! - **Buttons**: toolbar tool buttons and small action buttons
//! - **Colors**: color wells and preset swatches
//! - **Layout**: section labels, separators, panel frames

pub mod buttons;
pub mod colors;
pub mod layout;

pub use buttons::{ActionButton, ToolButton, ToolButtonStyle};
pub use colors::{ColorWell, color_swatch};
pub use layout::{panel_frame, section_label, vertical_separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (color swatches)
    pub const SMALL: f32 = 20.0;
    /// Toolbar tool button size
    pub const TOOL: f32 = 32.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Error text color
    pub const ERROR: Color32 = Color32::from_rgb(220, 53, 69);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(250, 250, 252);
}
