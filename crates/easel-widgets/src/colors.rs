//! Color selection widgets.

use egui::{Color32, CornerRadius, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// Preset palette shown next to the color well.
pub const PRESET_COLORS: [Color32; 8] = [
    Color32::BLACK,
    Color32::from_rgb(128, 128, 128),
    Color32::from_rgb(220, 53, 69),
    Color32::from_rgb(255, 153, 0),
    Color32::from_rgb(255, 221, 0),
    Color32::from_rgb(40, 167, 69),
    Color32::from_rgb(59, 130, 246),
    Color32::WHITE,
];

/// A labeled color well: the native egui color button plus preset swatches.
pub struct ColorWell<'a> {
    label: &'a str,
    color: &'a mut Color32,
    presets: bool,
}

impl<'a> ColorWell<'a> {
    pub fn new(label: &'a str, color: &'a mut Color32) -> Self {
        Self {
            label,
            color,
            presets: false,
        }
    }

    /// Also show the preset swatch row.
    pub fn with_presets(mut self) -> Self {
        self.presets = true;
        self
    }

    /// Show the widget; returns true when the color changed.
    pub fn show(self, ui: &mut Ui) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(self.label);
            let before = *self.color;
            ui.color_edit_button_srgba(self.color);
            changed |= *self.color != before;
            if self.presets {
                for preset in PRESET_COLORS {
                    if color_swatch(ui, preset, preset == *self.color) {
                        *self.color = preset;
                        changed = true;
                    }
                }
            }
        });
        changed
    }
}

/// A small clickable swatch; returns true if clicked.
pub fn color_swatch(ui: &mut Ui, color: Color32, selected: bool) -> bool {
    let size = vec2(sizing::SMALL, sizing::SMALL);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    if ui.is_rect_visible(rect) {
        let radius = CornerRadius::same(sizing::CORNER_RADIUS);
        ui.painter().rect_filled(rect, radius, color);
        let stroke = if selected {
            Stroke::new(2.0, theme::ACCENT)
        } else {
            Stroke::new(1.0, theme::BORDER)
        };
        ui.painter().rect_stroke(rect, radius, stroke, StrokeKind::Inside);
    }
    response.clicked()
}
