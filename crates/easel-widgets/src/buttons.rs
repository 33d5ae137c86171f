//! Button components: toolbar tool buttons and enabled/disabled actions.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, FontId, Sense, Stroke, StrokeKind, Ui, Vec2, vec2,
};

use crate::{sizing, theme};

/// Style configuration for tool buttons.
#[derive(Clone)]
pub struct ToolButtonStyle {
    /// Button size
    pub size: Vec2,
    /// Corner radius
    pub corner_radius: u8,
    /// Background color when hovered
    pub hover_color: Color32,
    /// Background color when selected/active
    pub selected_color: Color32,
    /// Label color when not selected
    pub text_color: Color32,
    /// Label color when selected
    pub selected_text_color: Color32,
}

impl Default for ToolButtonStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::TOOL, sizing::TOOL),
            corner_radius: sizing::CORNER_RADIUS,
            hover_color: theme::HOVER_BG,
            selected_color: theme::ACCENT,
            text_color: theme::TEXT,
            selected_text_color: Color32::WHITE,
        }
    }
}

/// A toolbar button showing a short label, solid accent when selected.
pub struct ToolButton<'a> {
    label: &'a str,
    tooltip: &'a str,
    shortcut: Option<&'a str>,
    selected: bool,
    style: ToolButtonStyle,
}

impl<'a> ToolButton<'a> {
    pub fn new(label: &'a str, tooltip: &'a str) -> Self {
        Self {
            label,
            tooltip,
            shortcut: None,
            selected: false,
            style: ToolButtonStyle::default(),
        }
    }

    /// Set whether the button is selected/active.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set keyboard shortcut (shown in the hover tooltip).
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn style(mut self, style: ToolButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg = if self.selected {
                self.style.selected_color
            } else if response.hovered() {
                self.style.hover_color
            } else {
                Color32::TRANSPARENT
            };
            let radius = CornerRadius::same(self.style.corner_radius);
            ui.painter().rect_filled(rect, radius, bg);
            if !self.selected {
                ui.painter().rect_stroke(
                    rect,
                    radius,
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Inside,
                );
            }
            let text_color = if self.selected {
                self.style.selected_text_color
            } else {
                self.style.text_color
            };
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                FontId::proportional(14.0),
                text_color,
            );
        }

        let tooltip = match self.shortcut {
            Some(shortcut) => format!("{} ({shortcut})", self.tooltip),
            None => self.tooltip.to_string(),
        };
        let response = response
            .on_hover_text(tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        response.clicked()
    }
}

/// A text action button that can be disabled (undo/redo, create canvas).
pub struct ActionButton<'a> {
    label: &'a str,
    enabled: bool,
    shortcut: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
            shortcut: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let mut response = ui.add_enabled(self.enabled, egui::Button::new(self.label));
        if let Some(shortcut) = self.shortcut {
            response = response.on_hover_text(shortcut);
        }
        response.clicked()
    }
}
