use std::ops::{Add, Mul, Neg, Sub};

/// A real-valued 2D coordinate.
///
/// All operations return new points; nothing mutates in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotate about `center` by `degrees` (positive is clockwise in screen
    /// space, where the y axis points down).
    pub fn rotated(self, center: Point, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point {
            x: cos * dx - sin * dy + center.x,
            y: sin * dx + cos * dy + center.y,
        }
    }

    pub fn round(self) -> Point {
        Point {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Component-wise scaling.
impl Mul<Point> for Point {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        Point::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// Axis-aligned `(width, height)` bounding extent of a shape at its current
/// scale, excluding any position offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };

    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn square(side: f64) -> Self {
        Self { w: side, h: side }
    }

    pub fn scaled(self, k: f64) -> Size {
        Size::new(self.w * k, self.h * k)
    }

    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

impl From<(f64, f64)> for Size {
    fn from((w, h): (f64, f64)) -> Self {
        Self { w, h }
    }
}

impl From<f64> for Size {
    fn from(side: f64) -> Self {
        Self::square(side)
    }
}

/// Axis-aligned rectangle used at the drawing-surface boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.w, size.h)
    }
}

/// Layout direction of a `Flex`/`Row`; the other direction is the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    #[default]
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
}

impl Axis {
    /// Extent of `size` along this axis.
    pub fn main(self, size: Size) -> f64 {
        match self {
            Axis::X => size.w,
            Axis::Y => size.h,
        }
    }

    /// Extent of `size` along the cross axis.
    pub fn cross(self, size: Size) -> f64 {
        match self {
            Axis::X => size.h,
            Axis::Y => size.w,
        }
    }

    /// Assemble a point from a main-axis and a cross-axis coordinate.
    pub fn pack(self, main: f64, cross: f64) -> Point {
        match self {
            Axis::X => Point::new(main, cross),
            Axis::Y => Point::new(cross, main),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(a * b, Point::new(3.0, -2.0));
        assert_eq!(Point::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn rotation_about_center() {
        let p = Point::new(2.0, 1.0).rotated(Point::new(1.0, 1.0), 90.0);
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_by_360_is_identity() {
        let p = Point::new(5.5, -3.25);
        let q = p.rotated(Point::new(1.0, 2.0), 360.0);
        assert!((p.x - q.x).abs() < 1e-9);
        assert!((p.y - q.y).abs() < 1e-9);
    }

    #[test]
    fn axis_pack_orders_coordinates() {
        assert_eq!(Axis::X.pack(10.0, 3.0), Point::new(10.0, 3.0));
        assert_eq!(Axis::Y.pack(10.0, 3.0), Point::new(3.0, 10.0));
        let s = Size::new(7.0, 9.0);
        assert_eq!(Axis::X.main(s), 7.0);
        assert_eq!(Axis::Y.main(s), 9.0);
        assert_eq!(Axis::Y.cross(s), 7.0);
    }
}
