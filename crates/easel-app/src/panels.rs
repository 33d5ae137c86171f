//! Panel layout: toolbar, tool options, canvas view, status bar.

use crate::app::{EaselApp, from_color32, to_color32};
use easel_core::input::{PointerDevice, PointerEvent};
use easel_core::status::StatusLine;
use easel_core::tools::{DraftShape, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, ToolKind};
use easel_widgets::{ActionButton, ColorWell, ToolButton, panel_frame, theme, vertical_separator};
use egui::{CornerRadius, Stroke, StrokeKind};

/// Toolbar entries: tool, button label, tooltip, shortcut key.
const TOOLS: [(ToolKind, &str, &str, &str); 5] = [
    (ToolKind::Brush, "B", "Brush", "B"),
    (ToolKind::Eraser, "E", "Eraser", "E"),
    (ToolKind::Line, "L", "Line", "L"),
    (ToolKind::Rectangle, "R", "Rectangle", "R"),
    (ToolKind::Fill, "F", "Fill", "F"),
];

impl EaselApp {
    pub(crate) fn toolbar_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("toolbar")
            .resizable(false)
            .exact_width(44.0)
            .frame(panel_frame())
            .show(ctx, |ui| {
                ui.add_space(2.0);
                for (tool, label, tooltip, key) in TOOLS {
                    let clicked = ToolButton::new(label, tooltip)
                        .shortcut(key)
                        .selected(self.session.tool() == tool)
                        .show(ui);
                    if clicked {
                        self.session.set_tool(tool);
                    }
                    ui.add_space(4.0);
                }
                ui.separator();
                if ToolButton::new("+", "New canvas").show(ui) {
                    self.new_canvas.open = !self.new_canvas.open;
                }
                ui.add_space(4.0);
                if ToolButton::new("S", "Save as PNG").shortcut("Ctrl+S").show(ui) {
                    self.save_drawing();
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.add_space(4.0);
                    if ToolButton::new("C", "Copy to clipboard")
                        .shortcut("Ctrl+C")
                        .show(ui)
                    {
                        self.copy_to_clipboard();
                    }
                }
            });
    }

    pub(crate) fn options_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("options")
            .frame(panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let busy = self.session.busy();
                    if ActionButton::new("Undo")
                        .enabled(self.session.can_undo() && !busy)
                        .shortcut("Ctrl+Z")
                        .show(ui)
                    {
                        self.session.request_undo();
                    }
                    if ActionButton::new("Redo")
                        .enabled(self.session.can_redo() && !busy)
                        .shortcut("Ctrl+Y")
                        .show(ui)
                    {
                        self.session.request_redo();
                    }
                    vertical_separator(ui);

                    let tool = self.session.tool();
                    if tool != ToolKind::Eraser {
                        let mut color = to_color32(self.session.settings().color);
                        if ColorWell::new("Color", &mut color).with_presets().show(ui) {
                            self.session.settings_mut().color = from_color32(color);
                        }
                    }
                    if tool != ToolKind::Fill {
                        let mut size = self.session.settings().size;
                        ui.add(
                            egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE)
                                .text("Size"),
                        );
                        self.session.settings_mut().set_size(size);
                    }
                    if tool == ToolKind::Rectangle {
                        vertical_separator(ui);
                        let mut rect_fill = self.session.settings().rect_fill;
                        ui.checkbox(&mut rect_fill, "Fill");
                        self.session.settings_mut().rect_fill = rect_fill;
                        if rect_fill {
                            let mut fill = to_color32(self.session.settings().rect_fill_color);
                            if ColorWell::new("Fill color", &mut fill).show(ui) {
                                self.session.settings_mut().rect_fill_color = from_color32(fill);
                            }
                        }
                    }
                });
            });
    }

    pub(crate) fn status_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .frame(panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.session.busy() {
                        ui.spinner();
                        ui.label("Working…");
                    }
                    if let Some(status) = self.session.status() {
                        let color = if status.is_error() {
                            theme::ERROR
                        } else {
                            theme::TEXT
                        };
                        ui.colored_label(color, &status.message);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let base = self.session.base();
                        ui.colored_label(
                            theme::TEXT_MUTED,
                            format!(
                                "{}×{}  ·  {}",
                                base.width(),
                                base.height(),
                                self.session.endpoint()
                            ),
                        );
                    });
                });
            });
    }

    pub(crate) fn canvas_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.refresh_texture(ctx);
            egui::ScrollArea::both().show(ui, |ui| {
                let base = self.session.base();
                let size = egui::vec2(base.width() as f32, base.height() as f32);
                let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                ui.painter().rect_stroke(
                    rect,
                    CornerRadius::ZERO,
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Outside,
                );

                self.forward_pointer(ui, rect, &response);

                if let Some(shape) = self.session.preview_shape() {
                    draw_preview(ui.painter(), rect, &shape);
                }
            });
        });
    }

    /// Re-upload the canvas texture when the base raster changed.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() && self.texture_revision == Some(self.session.revision()) {
            return;
        }
        let base = self.session.base();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [base.width() as usize, base.height() as usize],
            base.pixels(),
        );
        match &mut self.texture {
            Some(handle) => handle.set(image, egui::TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST)),
        }
        self.texture_revision = Some(self.session.revision());
    }

    /// Translate egui pointer state into canvas-local pointer events.
    fn forward_pointer(&mut self, ui: &egui::Ui, rect: egui::Rect, response: &egui::Response) {
        let (pressed, released, hover_pos, (device, pressure)) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.hover_pos(),
                pointer_sample(i),
            )
        });
        let to_canvas = |pos: egui::Pos2| {
            kurbo::Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
        };

        if pressed {
            // hovered() is layer-aware, so presses through dialogs are not
            // forwarded.
            if response.hovered() {
                if let Some(pos) = hover_pos.filter(|pos| rect.contains(*pos)) {
                    let position = to_canvas(pos);
                    self.last_canvas_pos = Some(position);
                    self.session.handle_pointer(PointerEvent::Down {
                        position,
                        device,
                        pressure,
                    });
                }
            }
            return;
        }

        if !self.session.is_drawing() {
            return;
        }
        match hover_pos {
            Some(pos) => {
                let position = to_canvas(pos);
                self.last_canvas_pos = Some(position);
                if released {
                    self.session
                        .handle_pointer(PointerEvent::Up { position, pressure });
                } else {
                    self.session
                        .handle_pointer(PointerEvent::Move { position, pressure });
                }
            }
            None => {
                // Pointer left the window mid-gesture.
                let position = self.last_canvas_pos.unwrap_or(kurbo::Point::ZERO);
                self.session
                    .handle_pointer(PointerEvent::Leave { position, pressure });
            }
        }
    }

    pub(crate) fn new_canvas_window(&mut self, ctx: &egui::Context) {
        if !self.new_canvas.open {
            return;
        }
        let session = &mut self.session;
        let panel = &mut self.new_canvas;
        let mut open = panel.open;
        let mut created = false;
        egui::Window::new("New canvas")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Width");
                    ui.add(egui::DragValue::new(&mut panel.width).range(100..=4096).suffix(" px"));
                    ui.label("Height");
                    ui.add(egui::DragValue::new(&mut panel.height).range(100..=4096).suffix(" px"));
                });
                ColorWell::new("Background", &mut panel.color).show(ui);
                ui.add_space(4.0);
                ui.label("Creating a new canvas discards the backend history.");
                if ui.button("Create").clicked() {
                    created = session.request_new_canvas(
                        panel.width,
                        panel.height,
                        from_color32(panel.color),
                    );
                }
            });
        panel.open = open && !created;
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn save_drawing(&mut self) {
        let bytes = match self.session.export_png() {
            Ok(bytes) => bytes,
            Err(e) => {
                self.session
                    .notify(StatusLine::error(format!("Could not encode canvas: {e}")));
                return;
            }
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("drawing.png")
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            return;
        };
        match std::fs::write(&path, bytes) {
            Ok(()) => self.session.notify(StatusLine::info(format!(
                "Drawing saved to {}",
                path.display()
            ))),
            Err(e) => self
                .session
                .notify(StatusLine::error(format!("Could not save drawing: {e}"))),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn save_drawing(&mut self) {
        self.session.notify(StatusLine::info(
            "Saving is not available in the browser build.",
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn copy_to_clipboard(&mut self) {
        let base = self.session.base();
        let result = arboard::Clipboard::new().and_then(|mut clipboard| {
            clipboard.set_image(arboard::ImageData {
                width: base.width() as usize,
                height: base.height() as usize,
                bytes: std::borrow::Cow::Borrowed(base.pixels()),
            })
        });
        match result {
            Ok(()) => self
                .session
                .notify(StatusLine::info("Canvas copied to clipboard.")),
            Err(e) => self
                .session
                .notify(StatusLine::error(format!("Clipboard copy failed: {e}"))),
        }
    }
}

/// Best-effort device classification from egui's input events: touch events
/// with a force reading are treated as pen input, without one as touch;
/// everything else is the mouse.
fn pointer_sample(input: &egui::InputState) -> (PointerDevice, Option<f64>) {
    let mut device = PointerDevice::Mouse;
    let mut pressure = None;
    for event in &input.events {
        if let egui::Event::Touch { force, .. } = event {
            device = match force {
                Some(_) => PointerDevice::Pen,
                None => PointerDevice::Touch,
            };
            pressure = force.map(|f| f as f64);
        }
    }
    (device, pressure)
}

/// Paint the in-progress gesture over the canvas rect.
fn draw_preview(painter: &egui::Painter, rect: egui::Rect, shape: &DraftShape) {
    let to_screen =
        |p: kurbo::Point| egui::pos2(rect.min.x + p.x as f32, rect.min.y + p.y as f32);
    match shape {
        DraftShape::Stroke { points, color } => {
            let color = to_color32(*color);
            match points.as_slice() {
                [] => {}
                [only] => {
                    painter.circle_filled(
                        to_screen(only.position()),
                        (only.width / 2.0) as f32,
                        color,
                    );
                }
                _ => {
                    for pair in points.windows(2) {
                        painter.line_segment(
                            [to_screen(pair[0].position()), to_screen(pair[1].position())],
                            Stroke::new(pair[0].width as f32, color),
                        );
                    }
                }
            }
        }
        DraftShape::Line {
            from,
            to,
            width,
            color,
        } => {
            painter.line_segment(
                [to_screen(*from), to_screen(*to)],
                Stroke::new(*width as f32, to_color32(*color)),
            );
        }
        DraftShape::Rectangle {
            from,
            to,
            width,
            color,
            fill,
        } => {
            let r = egui::Rect::from_two_pos(to_screen(*from), to_screen(*to));
            if let Some(fill) = fill {
                painter.rect_filled(r, CornerRadius::ZERO, to_color32(*fill));
            }
            painter.rect_stroke(
                r,
                CornerRadius::ZERO,
                Stroke::new(*width as f32, to_color32(*color)),
                StrokeKind::Middle,
            );
        }
    }
}
