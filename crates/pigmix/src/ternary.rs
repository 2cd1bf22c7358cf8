//! Projecting three-pigment ratios onto a triangle.
//!
//! A ternary plot shows every mixture of three pigments as a point inside an
//! equilateral triangle. The first pigment sits at the bottom-left corner, the
//! second pigment at the bottom-right corner, and the third pigment at the top
//! corner. A mixture's point is the ratio-weighted average of the corners.
//!
//! [`TernaryCanvas::project`] computes coordinates with the y-axis pointing
//! up, whereas [`TernaryCanvas::to_canvas`] flips them into screen
//! coordinates with the y-axis pointing down.

use crate::convert::DisplayColor;
use crate::{Float, Pigment};

const HALF_SQRT_3: Float = 0.866_025_403_784_438_6;

/// A point on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Point {
    pub x: Float,
    pub y: Float,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }
}

/// The geometry of a ternary plot.
///
/// The default canvas is 500 by 433 pixels, i.e., just about fits an
/// equilateral triangle, with 34 pixels padding and 8 pixel dots.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TernaryCanvas {
    width: Float,
    height: Float,
    padding: Float,
    dot_size: Float,
}

impl Default for TernaryCanvas {
    fn default() -> Self {
        Self::new(500.0, 433.0, 34.0, 8.0)
    }
}

impl TernaryCanvas {
    /// Create a new canvas.
    pub const fn new(width: Float, height: Float, padding: Float, dot_size: Float) -> Self {
        Self {
            width,
            height,
            padding,
            dot_size,
        }
    }

    /// Get a copy of this canvas with the given padding.
    #[must_use]
    pub const fn with_padding(&self, padding: Float) -> Self {
        Self::new(self.width, self.height, padding, self.dot_size)
    }

    /// Get a copy of this canvas with the given dot size.
    #[must_use]
    pub const fn with_dot_size(&self, dot_size: Float) -> Self {
        Self::new(self.width, self.height, self.padding, dot_size)
    }

    /// Get the width in pixels.
    pub fn width(&self) -> Float {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> Float {
        self.height
    }

    /// Get the padding between canvas edges and triangle in pixels.
    pub fn padding(&self) -> Float {
        self.padding
    }

    /// Get the size of the dots marking mixtures in pixels.
    pub fn dot_size(&self) -> Float {
        self.dot_size
    }

    /// Project the ratios onto this canvas, with the y-axis pointing up.
    ///
    /// Ratios need not add up to one. If they add up to zero, the result is
    /// the bottom-left corner.
    pub fn project(&self, ratios: &[Float; 3]) -> Point {
        let [_, b, c] = *ratios;
        let total = ratios.iter().sum::<Float>();
        let sum = if total == 0.0 { 1.0 } else { total };

        let x = 0.5 * b.mul_add(2.0, c) / sum;
        let y = HALF_SQRT_3 * c / sum;

        let inner_width = self.padding.mul_add(-2.0, self.width);
        let inner_height = self.padding.mul_add(-2.0, self.height);
        Point::new(
            x.mul_add(inner_width, self.padding),
            (y / HALF_SQRT_3).mul_add(inner_height, self.padding),
        )
    }

    /// Flip the point into screen coordinates, with the y-axis pointing down.
    pub fn to_canvas(&self, point: Point) -> Point {
        Point::new(point.x, self.height - point.y)
    }

    /// Get the three corners, with the y-axis pointing up.
    pub fn corners(&self) -> [Point; 3] {
        [
            self.project(&[1.0, 0.0, 0.0]),
            self.project(&[0.0, 1.0, 0.0]),
            self.project(&[0.0, 0.0, 1.0]),
        ]
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A pigment at its corner of the ternary plot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CornerLabel {
    pub pigment: Pigment,
    pub point: Point,
    pub color: DisplayColor,
}

/// A mixture's point on the ternary plot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TernaryPoint {
    pub ratios: [Float; 3],
    pub point: Point,
    pub color: DisplayColor,
}

/// A complete ternary plot.
///
/// Points and corners use coordinates with the y-axis pointing up.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TernaryPlot {
    pub canvas: TernaryCanvas,
    pub corners: [CornerLabel; 3],
    pub points: Vec<TernaryPoint>,
}

#[cfg(test)]
mod test {
    use super::{Point, TernaryCanvas};

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "{:?} should be {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_corners() {
        let canvas = TernaryCanvas::default();
        let [a, b, c] = canvas.corners();
        assert_close(a, Point::new(34.0, 34.0));
        assert_close(b, Point::new(466.0, 34.0));
        assert_close(c, Point::new(250.0, 399.0));
        assert_eq!(a.y, b.y, "bottom corners on same line");

        assert_close(canvas.to_canvas(a), Point::new(34.0, 399.0));
        assert_close(canvas.to_canvas(c), Point::new(250.0, 34.0));
    }

    #[test]
    fn test_projection() {
        let canvas = TernaryCanvas::default();
        let center = canvas.project(&[1.0, 1.0, 1.0]);
        assert_close(center, Point::new(250.0, 34.0 + 365.0 / 3.0));

        // Scaling the ratios does not move the point.
        assert_close(canvas.project(&[2.0, 6.0, 2.0]), canvas.project(&[0.1, 0.3, 0.1]));

        // Zero ratios fall back onto the bottom-left corner.
        assert_close(canvas.project(&[0.0, 0.0, 0.0]), Point::new(34.0, 34.0));

        let midpoint = canvas.project(&[0.5, 0.5, 0.0]);
        assert_close(midpoint, Point::new(250.0, 34.0));
    }

    #[test]
    fn test_geometry() {
        let canvas = TernaryCanvas::default().with_padding(0.0).with_dot_size(4.0);
        assert_eq!(canvas.padding(), 0.0, "padding");
        assert_eq!(canvas.dot_size(), 4.0, "dot size");
        assert_eq!(canvas.width(), 500.0, "width");
        assert_eq!(canvas.height(), 433.0, "height");
        assert_close(canvas.corners()[1], Point::new(500.0, 0.0));
        assert_close(canvas.corners()[2], Point::new(250.0, 433.0));
    }
}
