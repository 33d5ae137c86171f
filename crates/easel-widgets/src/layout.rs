//! Layout helpers shared by the panels.

use egui::{Frame, Margin, RichText, Ui};

use crate::theme;

/// A muted, small-caps style section heading.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text.to_uppercase()).small().color(theme::TEXT_MUTED));
}

/// Thin vertical separator between toolbar groups.
pub fn vertical_separator(ui: &mut Ui) {
    ui.add(egui::Separator::default().vertical().spacing(8.0));
}

/// Standard frame for side/top panels.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .inner_margin(Margin::same(6))
}
