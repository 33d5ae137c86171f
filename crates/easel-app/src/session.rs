//! Client session: one canvas synchronized with the backend.
//!
//! The session owns every piece of client state: the base raster, the
//! gesture state machine, the snapshot history, and the command dispatcher.
//! The UI layer feeds it pointer events and polls it once per frame; nothing
//! in here blocks.

use easel_core::config::EaselConfig;
use easel_core::dispatch::{DispatchEvent, Dispatcher};
use easel_core::input::{PointerDevice, PointerEvent, pressure_width};
use easel_core::protocol::{Command, Response};
use easel_core::raster::valid_canvas_size;
use easel_core::status::StatusLine;
use easel_core::tools::{DraftShape, GestureOutcome, ToolKind, ToolManager, ToolSettings};
use easel_core::transport::{PlatformTransport, Transport, TransportError};
use easel_core::{RasterImage, Rgba, SnapshotHistory};
use easel_render::RenderError;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// A drawing session against one backend endpoint.
pub struct Session<T: Transport> {
    config: EaselConfig,
    /// The displayed canvas: last backend raster, or the optimistic commit
    /// awaiting acknowledgement.
    base: RasterImage,
    /// Bumped whenever `base` changes, so the UI re-uploads its texture.
    revision: u64,
    history: SnapshotHistory,
    tools: ToolManager,
    dispatcher: Dispatcher<T>,
    status: Option<StatusLine>,
    /// Server-authoritative history flags from the latest response.
    can_undo: bool,
    can_redo: bool,
    /// Set after a communication failure; history controls stay disabled
    /// until the next successful response re-establishes the flags.
    resync: bool,
    /// Device that started the active gesture.
    active_device: PointerDevice,
}

pub type PlatformSession = Session<PlatformTransport>;

impl Session<PlatformTransport> {
    /// Build a session with the platform transport and request the initial
    /// canvas.
    pub fn from_config(config: EaselConfig) -> Result<Self, TransportError> {
        let transport = PlatformTransport::new(&config.endpoint)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> Session<T> {
    pub fn new(config: EaselConfig, transport: T) -> Self {
        let defaults = config.canvas;
        let mut session = Self {
            config,
            base: RasterImage::filled(defaults.width, defaults.height, defaults.color),
            revision: 0,
            history: SnapshotHistory::new(),
            tools: ToolManager::new(),
            dispatcher: Dispatcher::new(transport),
            status: None,
            can_undo: false,
            can_redo: false,
            resync: false,
            active_device: PointerDevice::Mouse,
        };
        session.submit(Command::Init {
            width: defaults.width,
            height: defaults.height,
            color: defaults.color,
        });
        session
    }

    // --- Accessors -------------------------------------------------------

    pub fn base(&self) -> &RasterImage {
        &self.base
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.tools.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.tools.settings
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Show a status message (save/copy results from the UI layer).
    pub fn notify(&mut self, line: StatusLine) {
        self.status = Some(line);
    }

    /// Whether a command is in flight (drives the busy indicator).
    pub fn busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_active()
    }

    /// The in-progress shape to overlay on the canvas.
    pub fn preview_shape(&self) -> Option<DraftShape> {
        self.tools.preview_shape()
    }

    pub fn can_undo(&self) -> bool {
        self.can_undo && !self.resync
    }

    pub fn can_redo(&self) -> bool {
        self.can_redo && !self.resync
    }

    // --- Input capture ---------------------------------------------------

    /// Feed a pointer event in canvas-local coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                device,
                pressure,
            } => {
                if !device.can_draw() || self.tools.is_active() {
                    return;
                }
                // Presses outside the canvas never start a gesture.
                if !self
                    .base
                    .contains(position.x.floor() as i32, position.y.floor() as i32)
                {
                    return;
                }
                let position = self.base.clamp_point(position);
                if self.tools.current_tool == ToolKind::Fill {
                    let command = self.tools.fill_command(position);
                    self.submit(command);
                    return;
                }
                self.active_device = device;
                let width = pressure_width(self.tools.settings.size, device, pressure);
                self.tools.begin(position, width);
            }
            PointerEvent::Move { position, pressure } => {
                if !self.tools.is_active() {
                    return;
                }
                let position = self.base.clamp_point(position);
                let width = pressure_width(self.tools.settings.size, self.active_device, pressure);
                self.tools.update(position, width);
            }
            PointerEvent::Up { position, pressure } => {
                if !self.tools.is_active() {
                    return;
                }
                let position = self.base.clamp_point(position);
                let width = pressure_width(self.tools.settings.size, self.active_device, pressure);
                let outcome = self.tools.end(position, width);
                self.finish_gesture(outcome);
            }
            PointerEvent::Leave { position, pressure } => {
                if !self.tools.is_active() {
                    return;
                }
                let position = self.base.clamp_point(position);
                let width = pressure_width(self.tools.settings.size, self.active_device, pressure);
                let outcome = self.tools.leave(position, width);
                self.finish_gesture(outcome);
            }
        }
    }

    /// Abort the in-progress gesture (Escape).
    pub fn cancel_gesture(&mut self) {
        self.tools.cancel();
    }

    fn finish_gesture(&mut self, outcome: Option<GestureOutcome>) {
        match outcome {
            Some(GestureOutcome::Commit { shape, command }) => {
                // Optimistic commit: draw locally, snapshot, then dispatch.
                easel_render::draw_shape(&mut self.base, &shape);
                self.revision += 1;
                self.history.push(self.base.clone());
                self.submit(command);
            }
            Some(GestureOutcome::TooShort) => {
                self.status = Some(StatusLine::info("Stroke too short, not sent."));
            }
            Some(GestureOutcome::Cancelled) => {
                self.status = Some(StatusLine::info("Shape cancelled."));
            }
            None => {}
        }
    }

    // --- History ---------------------------------------------------------

    /// Undo: restore the previous local snapshot right away and ask the
    /// backend to step its version pointer back.
    pub fn request_undo(&mut self) {
        if !self.can_undo() {
            return;
        }
        if let Some(snapshot) = self.history.undo() {
            self.base = snapshot.clone();
            self.revision += 1;
        }
        self.submit(Command::Undo);
    }

    pub fn request_redo(&mut self) {
        if !self.can_redo() {
            return;
        }
        if let Some(snapshot) = self.history.redo() {
            self.base = snapshot.clone();
            self.revision += 1;
        }
        self.submit(Command::Redo);
    }

    // --- Canvas lifecycle ------------------------------------------------

    /// Request a fresh canvas. Returns false (with a status message) when
    /// the dimensions are below the backend's minimum.
    pub fn request_new_canvas(&mut self, width: u32, height: u32, color: Rgba) -> bool {
        if !valid_canvas_size(width, height) {
            self.status = Some(StatusLine::error(
                "Width and height must be at least 100 pixels.",
            ));
            return false;
        }
        self.submit(Command::NewCanvas {
            width,
            height,
            color,
        });
        true
    }

    /// Encode the current canvas as PNG bytes (save dialog, clipboard).
    pub fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        easel_render::encode_png(&self.base)
    }

    // --- Dispatch --------------------------------------------------------

    fn submit(&mut self, command: Command) {
        if let Err(e) = self.dispatcher.enqueue(command) {
            self.status = Some(StatusLine::error(format!("Command dropped: {e}")));
        }
    }

    /// Drain dispatcher events and expire the status line. Returns true when
    /// anything changed and the UI should repaint.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for event in self.dispatcher.poll() {
            changed = true;
            match event {
                DispatchEvent::Completed { command, response } => {
                    self.apply_response(&command, response);
                }
                DispatchEvent::Failed {
                    command,
                    message,
                    response,
                } => {
                    self.apply_failure(&command, &message, response);
                }
            }
        }
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.is_expired(Instant::now()))
        {
            self.status = None;
            changed = true;
        }
        changed
    }

    fn apply_response(&mut self, command: &Command, response: Response) {
        if let Some(url) = &response.image_data_url {
            match easel_render::decode_data_url(url) {
                Ok(image) => {
                    self.base = image;
                    self.revision += 1;
                    if command.resets_history() {
                        self.history.clear();
                    }
                    if self.history.is_empty() {
                        self.history.push(self.base.clone());
                    }
                }
                Err(e) => {
                    self.apply_failure(command, &format!("undecodable server image: {e}"), None);
                    return;
                }
            }
        } else if matches!(command, Command::Init { .. }) {
            log::warn!("init response carried no image; keeping the local canvas");
        }

        self.can_undo = response.can_undo;
        self.can_redo = response.can_redo;
        self.resync = false;
        if let Some(message) = response.message {
            self.status = Some(StatusLine::info(message));
        }
    }

    fn apply_failure(&mut self, command: &Command, message: &str, response: Option<Response>) {
        log::error!("{} failed: {message}", command.label());
        self.status = Some(StatusLine::error(format!(
            "{} failed: {message}",
            command.label()
        )));
        match response {
            // The backend rejected the command but still reported its
            // history state.
            Some(response) => {
                self.can_undo = response.can_undo;
                self.can_redo = response.can_redo;
                self.resync = false;
            }
            // Nothing authoritative came back; disable history controls
            // until the next successful response.
            None => {
                self.can_undo = false;
                self.can_redo = false;
                self.resync = true;
            }
        }
    }
}
