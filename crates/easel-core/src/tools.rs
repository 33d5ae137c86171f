//! Tool selection and the drawing gesture state machine.

use crate::color::Rgba;
use crate::input::PathPoint;
use crate::protocol::Command;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Minimum squared distance between two recorded path points.
pub const MIN_POINT_DISTANCE_SQ: f64 = 4.0;
/// Brush size bounds enforced by the UI.
pub const MIN_BRUSH_SIZE: f64 = 1.0;
pub const MAX_BRUSH_SIZE: f64 = 100.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Line,
    Rectangle,
    Fill,
}

impl ToolKind {
    /// Whether this tool draws through a press-move-release gesture. Fill
    /// acts on the press alone.
    pub fn is_gesture(self) -> bool {
        !matches!(self, ToolKind::Fill)
    }

    /// Whether this tool accumulates a freehand path.
    pub fn is_stroke(self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser)
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Fill => "Fill",
        }
    }
}

/// User-adjustable tool options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Stroke/outline color.
    pub color: Rgba,
    /// Nominal brush size in pixels.
    pub size: f64,
    /// Whether rectangles are filled.
    pub rect_fill: bool,
    /// Rectangle fill color (used when `rect_fill` is set).
    pub rect_fill_color: Rgba,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: Rgba::black(),
            size: 5.0,
            rect_fill: false,
            rect_fill_color: Rgba::white(),
        }
    }
}

impl ToolSettings {
    /// Clamp a requested brush size to the supported range.
    pub fn set_size(&mut self, size: f64) {
        self.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }
}

/// Geometry of an in-progress or finalized gesture, used both for the live
/// preview overlay and for the optimistic local commit.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftShape {
    Stroke {
        points: Vec<PathPoint>,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba,
    },
    Rectangle {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba,
        fill: Option<Rgba>,
    },
}

/// State of the gesture state machine.
#[derive(Debug, Clone, Default)]
enum GestureState {
    #[default]
    Idle,
    Drawing {
        origin: Point,
        current: Point,
        points: Vec<PathPoint>,
    },
}

/// What finalizing a gesture produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Rasterize `shape` into the base, snapshot, and dispatch `command`.
    Commit { shape: DraftShape, command: Command },
    /// The stroke never cleared the movement threshold; nothing to dispatch.
    TooShort,
    /// The gesture was aborted (pointer left the canvas mid line/rectangle).
    Cancelled,
}

/// Tracks the current tool, its options, and any in-progress gesture.
///
/// Callers feed it canvas-local, already-clamped positions; the manager owns
/// accumulation, the movement threshold, and command construction.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    pub current_tool: ToolKind,
    pub settings: ToolSettings,
    state: GestureState,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools. An in-progress gesture is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = GestureState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// Begin a gesture at `point`. `width` is the pressure-scaled width of
    /// the first sample. Does nothing for non-gesture tools.
    pub fn begin(&mut self, point: Point, width: f64) {
        if !self.current_tool.is_gesture() {
            return;
        }
        let mut points = Vec::new();
        if self.current_tool.is_stroke() {
            points.push(PathPoint::new(point, width));
        }
        self.state = GestureState::Drawing {
            origin: point,
            current: point,
            points,
        };
    }

    /// Track pointer movement. Stroke tools record a new path point only
    /// once the pointer has moved `MIN_POINT_DISTANCE_SQ` away from the last
    /// sample.
    pub fn update(&mut self, point: Point, width: f64) {
        let is_stroke = self.current_tool.is_stroke();
        if let GestureState::Drawing {
            current, points, ..
        } = &mut self.state
        {
            *current = point;
            if is_stroke {
                let far_enough = points
                    .last()
                    .is_none_or(|last| last.distance_squared(point) >= MIN_POINT_DISTANCE_SQ);
                if far_enough {
                    points.push(PathPoint::new(point, width));
                }
            }
        }
    }

    /// Finalize the gesture at `point` (pointer released over the canvas).
    pub fn end(&mut self, point: Point, width: f64) -> Option<GestureOutcome> {
        let GestureState::Drawing {
            origin, mut points, ..
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        if self.current_tool.is_stroke() {
            let moved = points
                .last()
                .is_none_or(|last| last.distance_squared(point) > 0.0);
            if moved {
                points.push(PathPoint::new(point, width));
            }
            return Some(self.finish_stroke(points));
        }
        Some(self.finish_figure(origin, point))
    }

    /// The pointer left the canvas mid-gesture. Strokes finalize with the
    /// path recorded so far; line and rectangle gestures are cancelled.
    pub fn leave(&mut self, point: Point, width: f64) -> Option<GestureOutcome> {
        if !self.is_active() {
            return None;
        }
        if self.current_tool.is_stroke() {
            return self.end(point, width);
        }
        self.state = GestureState::Idle;
        Some(GestureOutcome::Cancelled)
    }

    /// Abort the gesture without producing anything.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    /// The shape to overlay on the base raster while drawing.
    pub fn preview_shape(&self) -> Option<DraftShape> {
        let GestureState::Drawing {
            origin,
            current,
            points,
        } = &self.state
        else {
            return None;
        };
        match self.current_tool {
            ToolKind::Brush | ToolKind::Eraser => Some(DraftShape::Stroke {
                points: points.clone(),
                color: self.stroke_color(),
            }),
            ToolKind::Line => Some(DraftShape::Line {
                from: *origin,
                to: *current,
                width: self.settings.size,
                color: self.settings.color,
            }),
            ToolKind::Rectangle => Some(DraftShape::Rectangle {
                from: *origin,
                to: *current,
                width: self.settings.size,
                color: self.settings.color,
                fill: self.settings.rect_fill.then_some(self.settings.rect_fill_color),
            }),
            ToolKind::Fill => None,
        }
    }

    /// The command for a fill press at `point`.
    pub fn fill_command(&self, point: Point) -> Command {
        Command::Fill {
            x: point.x.round() as i32,
            y: point.y.round() as i32,
            color: self.settings.color,
        }
    }

    /// Eraser strokes draw in the canvas background color.
    fn stroke_color(&self) -> Rgba {
        match self.current_tool {
            ToolKind::Eraser => Rgba::white(),
            _ => self.settings.color,
        }
    }

    fn finish_stroke(&self, points: Vec<PathPoint>) -> GestureOutcome {
        if points.len() < 2 {
            return GestureOutcome::TooShort;
        }
        let path = points
            .iter()
            .map(|p| [p.x.round() as i32, p.y.round() as i32])
            .collect();
        let command = Command::Stroke {
            path,
            size: self.settings.size.round() as u32,
            // The backend takes no color for eraser paths.
            color: (self.current_tool == ToolKind::Brush).then_some(self.settings.color),
        };
        GestureOutcome::Commit {
            shape: DraftShape::Stroke {
                points,
                color: self.stroke_color(),
            },
            command,
        }
    }

    fn finish_figure(&self, origin: Point, end: Point) -> GestureOutcome {
        let (x1, y1) = (origin.x.round() as i32, origin.y.round() as i32);
        let (x2, y2) = (end.x.round() as i32, end.y.round() as i32);
        let size = self.settings.size.round() as u32;
        match self.current_tool {
            ToolKind::Line => GestureOutcome::Commit {
                shape: DraftShape::Line {
                    from: origin,
                    to: end,
                    width: self.settings.size,
                    color: self.settings.color,
                },
                command: Command::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: self.settings.color,
                    size,
                },
            },
            ToolKind::Rectangle => {
                let fill = self.settings.rect_fill.then_some(self.settings.rect_fill_color);
                GestureOutcome::Commit {
                    shape: DraftShape::Rectangle {
                        from: origin,
                        to: end,
                        width: self.settings.size,
                        color: self.settings.color,
                        fill,
                    },
                    command: Command::Rectangle {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: self.settings.color,
                        size,
                        fill: self.settings.rect_fill,
                        fill_color: fill,
                    },
                }
            }
            // Stroke tools go through finish_stroke; fill never begins.
            _ => GestureOutcome::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection_resets_gesture() {
        let mut tm = ToolManager::new();
        tm.begin(Point::new(0.0, 0.0), 5.0);
        assert!(tm.is_active());
        tm.set_tool(ToolKind::Line);
        assert!(!tm.is_active());
    }

    #[test]
    fn test_stroke_threshold_accumulation() {
        let mut tm = ToolManager::new();
        tm.begin(Point::new(10.0, 10.0), 5.0);
        // Below the threshold: not recorded.
        tm.update(Point::new(11.0, 10.0), 5.0);
        // At the threshold (2px => squared 4): recorded.
        tm.update(Point::new(13.0, 10.0), 5.0);
        match tm.preview_shape() {
            Some(DraftShape::Stroke { points, .. }) => assert_eq!(points.len(), 2),
            other => panic!("unexpected preview: {other:?}"),
        }
    }

    #[test]
    fn test_short_stroke_not_dispatched() {
        let mut tm = ToolManager::new();
        tm.begin(Point::new(10.0, 10.0), 5.0);
        let outcome = tm.end(Point::new(10.0, 10.0), 5.0);
        assert_eq!(outcome, Some(GestureOutcome::TooShort));
        assert!(!tm.is_active());
    }

    #[test]
    fn test_stroke_commit_carries_path_and_color() {
        let mut tm = ToolManager::new();
        tm.settings.color = Rgba::new(255, 0, 0, 255);
        tm.begin(Point::new(0.0, 0.0), 5.0);
        tm.update(Point::new(10.0, 0.0), 5.0);
        let outcome = tm.end(Point::new(20.0, 0.0), 5.0).unwrap();
        match outcome {
            GestureOutcome::Commit { shape, command } => {
                match shape {
                    DraftShape::Stroke { points, color } => {
                        assert_eq!(points.len(), 3);
                        assert_eq!(color, Rgba::new(255, 0, 0, 255));
                    }
                    other => panic!("unexpected shape: {other:?}"),
                }
                match command {
                    Command::Stroke { path, size, color } => {
                        assert_eq!(path, vec![[0, 0], [10, 0], [20, 0]]);
                        assert_eq!(size, 5);
                        assert_eq!(color, Some(Rgba::new(255, 0, 0, 255)));
                    }
                    other => panic!("unexpected command: {other:?}"),
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_eraser_sends_no_color() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Eraser);
        tm.begin(Point::new(0.0, 0.0), 5.0);
        tm.update(Point::new(10.0, 0.0), 5.0);
        let Some(GestureOutcome::Commit { shape, command }) = tm.end(Point::new(10.0, 0.0), 5.0)
        else {
            panic!("eraser stroke did not commit");
        };
        assert!(matches!(command, Command::Stroke { color: None, .. }));
        assert!(matches!(
            shape,
            DraftShape::Stroke { color, .. } if color == Rgba::white()
        ));
    }

    #[test]
    fn test_line_commit_geometry() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        tm.settings.set_size(3.0);
        tm.begin(Point::new(1.4, 2.6), 3.0);
        tm.update(Point::new(50.0, 60.0), 3.0);
        let Some(GestureOutcome::Commit { command, .. }) = tm.end(Point::new(50.0, 60.0), 3.0)
        else {
            panic!("line did not commit");
        };
        assert_eq!(
            command,
            Command::Line {
                x1: 1,
                y1: 3,
                x2: 50,
                y2: 60,
                color: Rgba::black(),
                size: 3,
            }
        );
    }

    #[test]
    fn test_rectangle_fill_options() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);
        tm.settings.rect_fill = true;
        tm.settings.rect_fill_color = Rgba::new(0, 255, 0, 255);
        tm.begin(Point::new(0.0, 0.0), 5.0);
        let Some(GestureOutcome::Commit { command, .. }) = tm.end(Point::new(30.0, 20.0), 5.0)
        else {
            panic!("rectangle did not commit");
        };
        match command {
            Command::Rectangle {
                fill, fill_color, ..
            } => {
                assert!(fill);
                assert_eq!(fill_color, Some(Rgba::new(0, 255, 0, 255)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_leave_cancels_figures_but_finishes_strokes() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);
        tm.begin(Point::new(0.0, 0.0), 5.0);
        assert_eq!(
            tm.leave(Point::new(5.0, 5.0), 5.0),
            Some(GestureOutcome::Cancelled)
        );

        tm.set_tool(ToolKind::Brush);
        tm.begin(Point::new(0.0, 0.0), 5.0);
        tm.update(Point::new(10.0, 0.0), 5.0);
        assert!(matches!(
            tm.leave(Point::new(10.0, 0.0), 5.0),
            Some(GestureOutcome::Commit { .. })
        ));
    }

    #[test]
    fn test_fill_command() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Fill);
        tm.settings.color = Rgba::new(1, 2, 3, 255);
        // Fill never enters the drawing state.
        tm.begin(Point::new(5.0, 5.0), 5.0);
        assert!(!tm.is_active());
        assert_eq!(
            tm.fill_command(Point::new(5.4, 5.6)),
            Command::Fill {
                x: 5,
                y: 6,
                color: Rgba::new(1, 2, 3, 255),
            }
        );
    }

    #[test]
    fn test_size_clamping() {
        let mut s = ToolSettings::default();
        s.set_size(0.0);
        assert_eq!(s.size, MIN_BRUSH_SIZE);
        s.set_size(500.0);
        assert_eq!(s.size, MAX_BRUSH_SIZE);
    }
}
