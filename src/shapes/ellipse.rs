use std::sync::Arc;

use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Rect, Size};
use crate::render::Surface;
use crate::shape::{Shape, ShapeRef};

/// An axis-aligned filled ellipse around `center`.
#[derive(Clone, Debug)]
pub struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
    color: Rgba,
}

impl Ellipse {
    pub fn new(center: impl Into<Point>, rx: f64, ry: f64, color: Rgba) -> Self {
        Self {
            center: center.into(),
            rx,
            ry,
            color,
        }
    }

    pub fn circle(center: impl Into<Point>, radius: f64, color: Rgba) -> Self {
        Self::new(center, radius, radius, color)
    }

    fn bbox(&self, position: Point) -> Rect {
        Rect::new(
            self.center.x + position.x - self.rx,
            self.center.y + position.y - self.ry,
            self.rx * 2.0,
            self.ry * 2.0,
        )
    }

    /// Scaled copy; the center shifts by the radius delta so the box's
    /// top-left corner tracks the scale, like `Polygon` anchoring.
    fn scaled_parts(&self, k: f64) -> (Point, f64, f64) {
        let rx = self.rx * k;
        let ry = self.ry * k;
        let center = Point::new(
            self.center.x - (self.rx - rx),
            self.center.y - (self.ry - ry),
        );
        (center, rx, ry)
    }
}

impl Shape for Ellipse {
    fn box_get(&self) -> Size {
        Size::new(self.rx * 2.0, self.ry * 2.0)
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        surface.fill_ellipse(self.bbox(position), self.color)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        let (center, rx, ry) = self.scaled_parts(k);
        Arc::new(Ellipse::new(center, rx, ry, self.color))
    }
}

/// A filled circular sector of an ellipse.
///
/// Public angles are in degrees, counterclockwise, measured from 3 o'clock
/// (the mathematical convention). They are stored negated: the drawing
/// surface counts degrees clockwise in screen space (y down), so the sign
/// flip plus the start/stop swap at the fill call bridges the two
/// conventions. Preserve both when porting to another back end.
#[derive(Clone, Debug)]
pub struct PieSlice {
    ellipse: Ellipse,
    start: f64,
    stop: f64,
}

impl PieSlice {
    pub fn new(
        center: impl Into<Point>,
        rx: f64,
        ry: f64,
        color: Rgba,
        start_deg: f64,
        stop_deg: f64,
    ) -> Self {
        Self {
            ellipse: Ellipse::new(center, rx, ry, color),
            start: -start_deg,
            stop: -stop_deg,
        }
    }

    /// Starting angle in the public (counterclockwise) convention.
    pub fn start_deg(&self) -> f64 {
        -self.start
    }

    /// Stopping angle in the public (counterclockwise) convention.
    pub fn stop_deg(&self) -> f64 {
        -self.stop
    }
}

impl Shape for PieSlice {
    fn box_get(&self) -> Size {
        self.ellipse.box_get()
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        surface.fill_pie_slice(
            self.ellipse.bbox(position),
            self.stop,
            self.start,
            self.ellipse.color,
        )
    }

    fn resized(&self, k: f64) -> ShapeRef {
        let (center, rx, ry) = self.ellipse.scaled_parts(k);
        Arc::new(PieSlice::new(
            center,
            rx,
            ry,
            self.ellipse.color,
            self.start_deg(),
            self.stop_deg(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_box_is_twice_the_radii() {
        let e = Ellipse::new((10.0, 10.0), 4.0, 3.0, Rgba::BLACK);
        assert_eq!(e.box_get(), Size::new(8.0, 6.0));
    }

    #[test]
    fn ellipse_resize_scales_box() {
        let e = Ellipse::circle((5.0, 5.0), 4.0, Rgba::BLACK);
        assert_eq!(e.resized(2.5).box_get(), Size::new(20.0, 20.0));
    }

    #[test]
    fn pie_angles_survive_the_sign_flip() {
        let p = PieSlice::new((0.0, 0.0), 5.0, 5.0, Rgba::BLACK, 30.0, 120.0);
        assert_eq!(p.start_deg(), 30.0);
        assert_eq!(p.stop_deg(), 120.0);
        // And through a resize as well.
        let q = p.resized(2.0);
        let q = q.box_get();
        assert_eq!(q, Size::new(20.0, 20.0));
    }
}
