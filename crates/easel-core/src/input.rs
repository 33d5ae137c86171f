//! Pointer event types and path sampling.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pressure assumed for devices that do not report any.
pub const DEFAULT_PRESSURE: f64 = 0.5;
/// A pen resting on the surface still produces a visible mark.
const MIN_PEN_PRESSURE: f64 = 0.01;

/// The kind of device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerDevice {
    Mouse,
    Pen,
    Touch,
}

impl PointerDevice {
    /// Only mouse and pen gestures start drawing; touch is reserved for the
    /// surrounding UI (scrolling, pinching) and is rejected.
    pub fn can_draw(self) -> bool {
        matches!(self, PointerDevice::Mouse | PointerDevice::Pen)
    }

    /// Normalize a raw pressure reading for this device.
    pub fn normalize_pressure(self, raw: Option<f64>) -> f64 {
        let p = raw.unwrap_or(DEFAULT_PRESSURE);
        match self {
            PointerDevice::Pen => p.max(MIN_PEN_PRESSURE),
            _ => p,
        }
    }
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
        device: PointerDevice,
        pressure: Option<f64>,
    },
    Move {
        position: Point,
        pressure: Option<f64>,
    },
    Up {
        position: Point,
        pressure: Option<f64>,
    },
    /// The pointer left the canvas mid-gesture.
    Leave {
        position: Point,
        pressure: Option<f64>,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Leave { position, .. } => position,
        }
    }
}

/// A recorded `(x, y, width)` sample of a pointer gesture. The width is the
/// nominal brush size scaled by pressure; it drives the local preview and
/// the optimistic commit, while the wire command carries coordinates plus
/// the nominal size only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl PathPoint {
    pub fn new(position: Point, width: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Per-point stroke width from nominal size and device pressure.
pub fn pressure_width(nominal_size: f64, device: PointerDevice, pressure: Option<f64>) -> f64 {
    (nominal_size * device.normalize_pressure(pressure)).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_validation() {
        assert!(PointerDevice::Mouse.can_draw());
        assert!(PointerDevice::Pen.can_draw());
        assert!(!PointerDevice::Touch.can_draw());
    }

    #[test]
    fn test_default_pressure() {
        assert_eq!(PointerDevice::Mouse.normalize_pressure(None), 0.5);
        assert_eq!(PointerDevice::Pen.normalize_pressure(None), 0.5);
    }

    #[test]
    fn test_pen_pressure_floor() {
        assert_eq!(PointerDevice::Pen.normalize_pressure(Some(0.0)), 0.01);
        assert_eq!(PointerDevice::Mouse.normalize_pressure(Some(0.0)), 0.0);
    }

    #[test]
    fn test_pressure_width_floor() {
        // Even at near-zero pressure the mark is at least one pixel wide.
        assert_eq!(
            pressure_width(10.0, PointerDevice::Mouse, Some(0.01)),
            1.0
        );
        assert_eq!(pressure_width(10.0, PointerDevice::Mouse, None), 5.0);
    }

    #[test]
    fn test_distance_squared() {
        let p = PathPoint::new(Point::new(1.0, 2.0), 3.0);
        assert_eq!(p.distance_squared(Point::new(4.0, 6.0)), 25.0);
    }
}
