//! Keyboard shortcut registry and handling.

use crate::app::EaselApp;
use easel_core::tools::ToolKind;
use egui::{Key, Modifiers};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("B", false, false, "Brush"),
            Shortcut::new("E", false, false, "Eraser"),
            Shortcut::new("L", false, false, "Line"),
            Shortcut::new("R", false, false, "Rectangle"),
            Shortcut::new("F", false, false, "Fill"),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("S", true, false, "Save as PNG"),
            Shortcut::new("C", true, false, "Copy canvas to clipboard"),
            Shortcut::new("Escape", false, false, "Cancel current gesture"),
        ]
    }
}

const TOOL_KEYS: [(Key, ToolKind); 5] = [
    (Key::B, ToolKind::Brush),
    (Key::E, ToolKind::Eraser),
    (Key::L, ToolKind::Line),
    (Key::R, ToolKind::Rectangle),
    (Key::F, ToolKind::Fill),
];

impl EaselApp {
    pub(crate) fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Redo before undo so Ctrl+Shift+Z is not shadowed.
        let redo = ctx.input_mut(|i| {
            i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y)
        });
        if redo {
            self.session.request_redo();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z)) {
            self.session.request_undo();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::S)) {
            self.save_drawing();
        }
        #[cfg(not(target_arch = "wasm32"))]
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::C)) {
            self.copy_to_clipboard();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape)) {
            self.session.cancel_gesture();
        }

        // Bare letters switch tools, but not while a text field has focus.
        if ctx.wants_keyboard_input() {
            return;
        }
        for (key, tool) in TOOL_KEYS {
            if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, key)) {
                self.session.set_tool(tool);
            }
        }
    }
}
