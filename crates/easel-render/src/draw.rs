//! Rasterization of finished gestures.
//!
//! The backend owns authoritative rendering; these routines exist for the
//! optimistic local commit that keeps the canvas responsive until the
//! backend's raster arrives and replaces it. Coverage is binary (no
//! antialiasing), matching the backend's output closely enough for the
//! moment the two rasters swap.

use easel_core::input::PathPoint;
use easel_core::tools::DraftShape;
use easel_core::{RasterImage, Rgba};
use kurbo::{Point, Rect};

/// Rasterize a finalized gesture into the bitmap.
pub fn draw_shape(image: &mut RasterImage, shape: &DraftShape) {
    match shape {
        DraftShape::Stroke { points, color } => draw_stroke(image, points, *color),
        DraftShape::Line {
            from,
            to,
            width,
            color,
        } => draw_segment(image, *from, *to, *width, *color),
        DraftShape::Rectangle {
            from,
            to,
            width,
            color,
            fill,
        } => draw_rect(image, *from, *to, *width, *color, *fill),
    }
}

/// Draw a variable-width freehand path. Consecutive samples are joined by
/// round-capped segments using the leading sample's width, the same rule the
/// preview uses.
pub fn draw_stroke(image: &mut RasterImage, points: &[PathPoint], color: Rgba) {
    match points {
        [] => {}
        [only] => draw_disc(image, only.position(), only.width / 2.0, color),
        _ => {
            for pair in points.windows(2) {
                draw_segment(
                    image,
                    pair[0].position(),
                    pair[1].position(),
                    pair[0].width,
                    color,
                );
            }
        }
    }
}

/// Draw a thick segment with round caps.
pub fn draw_segment(image: &mut RasterImage, a: Point, b: Point, width: f64, color: Rgba) {
    let half = (width / 2.0).max(0.5);
    let x0 = (a.x.min(b.x) - half).floor() as i32;
    let x1 = (a.x.max(b.x) + half).ceil() as i32;
    let y0 = (a.y.min(b.y) - half).floor() as i32;
    let y1 = (a.y.max(b.y) + half).ceil() as i32;

    let half_sq = half * half;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x as f64, y as f64);
            if dist_sq_to_segment(p, a, b) <= half_sq {
                image.set_pixel(x, y, color);
            }
        }
    }
}

/// Draw a filled disc (single-sample strokes).
pub fn draw_disc(image: &mut RasterImage, center: Point, radius: f64, color: Rgba) {
    let radius = radius.max(0.5);
    draw_segment(image, center, center, radius * 2.0, color);
}

/// Draw an axis-aligned rectangle between two corners: optional fill, then a
/// stroke band centered on the outline (square corners).
pub fn draw_rect(
    image: &mut RasterImage,
    from: Point,
    to: Point,
    width: f64,
    color: Rgba,
    fill: Option<Rgba>,
) {
    let rect = Rect::from_points(from, to);
    if let Some(fill_color) = fill {
        fill_region(image, rect, fill_color);
    }

    let half = (width / 2.0).max(0.5);
    let outer = rect.inflate(half, half);
    let inner = rect.inflate(-half, -half);
    let inner_valid = inner.x0 < inner.x1 && inner.y0 < inner.y1;

    let x0 = outer.x0.floor() as i32;
    let x1 = outer.x1.ceil() as i32;
    let y0 = outer.y0.floor() as i32;
    let y1 = outer.y1.ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x as f64, y as f64);
            if outer.contains(p) && !(inner_valid && inner.contains(p)) {
                image.set_pixel(x, y, color);
            }
        }
    }
}

/// Fill every pixel whose center lies inside the rectangle.
pub fn fill_region(image: &mut RasterImage, rect: Rect, color: Rgba) {
    let x0 = rect.x0.floor() as i32;
    let x1 = rect.x1.ceil() as i32;
    let y0 = rect.y0.floor() as i32;
    let y1 = rect.y1.ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if rect.contains(Point::new(x as f64, y as f64)) {
                image.set_pixel(x, y, color);
            }
        }
    }
}

fn dist_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return (p - a).hypot2();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let proj = a + ab * t;
    (p - proj).hypot2()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };

    fn blank() -> RasterImage {
        RasterImage::filled(32, 32, Rgba::white())
    }

    #[test]
    fn test_disc_marks_center_not_corners() {
        let mut img = blank();
        draw_disc(&mut img, Point::new(16.0, 16.0), 4.0, RED);
        assert_eq!(img.pixel(16, 16), Some(RED));
        assert_eq!(img.pixel(13, 16), Some(RED));
        assert_eq!(img.pixel(0, 0), Some(Rgba::white()));
        // Outside the radius along the diagonal.
        assert_eq!(img.pixel(20, 20), Some(Rgba::white()));
    }

    #[test]
    fn test_horizontal_segment() {
        let mut img = blank();
        draw_segment(&mut img, Point::new(4.0, 10.0), Point::new(20.0, 10.0), 2.0, RED);
        for x in 4..=20 {
            assert_eq!(img.pixel(x, 10), Some(RED), "x={x}");
        }
        assert_eq!(img.pixel(12, 14), Some(Rgba::white()));
    }

    #[test]
    fn test_stroke_joins_samples() {
        let mut img = blank();
        let points = vec![
            PathPoint::new(Point::new(4.0, 4.0), 2.0),
            PathPoint::new(Point::new(12.0, 4.0), 2.0),
            PathPoint::new(Point::new(12.0, 12.0), 2.0),
        ];
        draw_stroke(&mut img, &points, RED);
        assert_eq!(img.pixel(8, 4), Some(RED));
        assert_eq!(img.pixel(12, 8), Some(RED));
        assert_eq!(img.pixel(4, 12), Some(Rgba::white()));
    }

    #[test]
    fn test_single_sample_stroke_is_a_dot() {
        let mut img = blank();
        let points = vec![PathPoint::new(Point::new(10.0, 10.0), 6.0)];
        draw_stroke(&mut img, &points, RED);
        assert_eq!(img.pixel(10, 10), Some(RED));
        assert_eq!(img.pixel(10, 12), Some(RED));
        assert_eq!(img.pixel(10, 15), Some(Rgba::white()));
    }

    #[test]
    fn test_rect_outline_and_fill() {
        let mut img = blank();
        let green = Rgba::new(0, 255, 0, 255);
        draw_rect(
            &mut img,
            Point::new(8.0, 8.0),
            Point::new(24.0, 20.0),
            2.0,
            RED,
            Some(green),
        );
        // Outline on the edges.
        assert_eq!(img.pixel(8, 14), Some(RED));
        assert_eq!(img.pixel(16, 8), Some(RED));
        // Fill in the interior.
        assert_eq!(img.pixel(16, 14), Some(green));
        // Untouched outside.
        assert_eq!(img.pixel(4, 4), Some(Rgba::white()));
    }

    #[test]
    fn test_unfilled_rect_leaves_interior() {
        let mut img = blank();
        draw_rect(
            &mut img,
            Point::new(24.0, 20.0),
            Point::new(8.0, 8.0),
            2.0,
            RED,
            None,
        );
        // Corners are normalized, outline still lands on the edges.
        assert_eq!(img.pixel(8, 14), Some(RED));
        assert_eq!(img.pixel(16, 14), Some(Rgba::white()));
    }

    #[test]
    fn test_clipping_is_silent() {
        let mut img = RasterImage::filled(8, 8, Rgba::white());
        draw_segment(
            &mut img,
            Point::new(-20.0, 4.0),
            Point::new(30.0, 4.0),
            4.0,
            RED,
        );
        draw_rect(
            &mut img,
            Point::new(-10.0, -10.0),
            Point::new(100.0, 100.0),
            2.0,
            RED,
            None,
        );
        assert_eq!(img.pixel(4, 4), Some(RED));
    }

    #[test]
    fn test_draw_shape_dispatch() {
        let mut img = blank();
        draw_shape(
            &mut img,
            &DraftShape::Line {
                from: Point::new(2.0, 2.0),
                to: Point::new(2.0, 20.0),
                width: 2.0,
                color: RED,
            },
        );
        assert_eq!(img.pixel(2, 10), Some(RED));
    }
}
