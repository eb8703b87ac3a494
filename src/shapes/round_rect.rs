use std::sync::Arc;

use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::render::Surface;
use crate::shape::{Shape, ShapeRef};
use crate::shapes::ellipse::PieSlice;
use crate::shapes::polygon::Polygon;

/// Per-corner radii, clockwise from the top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerRadius(pub [f64; 4]);

impl From<f64> for CornerRadius {
    fn from(r: f64) -> Self {
        Self([r; 4])
    }
}

impl From<[f64; 4]> for CornerRadius {
    fn from(radii: [f64; 4]) -> Self {
        Self(radii)
    }
}

/// A rectangle with rounded corners.
///
/// Not a drawing primitive: it decomposes into four quarter pie slices plus
/// one octagonal polygon, built on demand by [`Self::construct`].
#[derive(Clone, Debug)]
pub struct RoundRect {
    size: Size,
    radius: CornerRadius,
    color: Rgba,
    position: Point,
}

impl RoundRect {
    pub fn new(size: impl Into<Size>, radius: impl Into<CornerRadius>, color: Rgba) -> Self {
        Self::at(size, radius, color, Point::ZERO)
    }

    pub fn at(
        size: impl Into<Size>,
        radius: impl Into<CornerRadius>,
        color: Rgba,
        position: impl Into<Point>,
    ) -> Self {
        Self {
            size: size.into(),
            radius: radius.into(),
            color,
            position: position.into(),
        }
    }

    /// Radii after the limiting pass: any two corners sharing a side are
    /// scaled down proportionally until their sum fits that side.
    pub fn clamped_radii(&self) -> [f64; 4] {
        let mut r = self.radius.0.map(|v| v.max(0.0));
        let sides = [self.size.w, self.size.h];
        for corner in 0..4 {
            let next = (corner + 1) % 4;
            let side = sides[corner % 2];
            let sum = r[corner] + r[next];
            if sum > side && sum > 0.0 {
                let k = r[corner] / sum;
                r[corner] = side * k;
                r[next] = side * (1.0 - k);
            }
        }
        r
    }

    /// Decompose into the corner pie slices and the body polygon.
    /// Pure and idempotent; both `box_get` and `render` go through it.
    pub fn construct(&self) -> (Vec<PieSlice>, Polygon) {
        let r = self.clamped_radii();
        let p = self.position;
        let (w, h) = (self.size.w, self.size.h);

        // Corner order: top-left, top-right, bottom-right, bottom-left.
        let centers = [
            Point::new(p.x + r[0], p.y + r[0]),
            Point::new(p.x + w - r[1], p.y + r[1]),
            Point::new(p.x + w - r[2], p.y + h - r[2]),
            Point::new(p.x + r[3], p.y + h - r[3]),
        ];

        let mut pies = Vec::with_capacity(4);
        for (corner, center) in centers.into_iter().enumerate() {
            if r[corner] <= 0.0 {
                continue;
            }
            let c = corner as f64;
            pies.push(PieSlice::new(
                center,
                r[corner],
                r[corner],
                self.color,
                90.0 * (1.0 - c),
                90.0 * (2.0 - c),
            ));
        }

        let body = Polygon::new(
            [
                Point::new(p.x + r[0], p.y),
                Point::new(p.x + w - r[1], p.y),
                Point::new(p.x + w, p.y + r[1]),
                Point::new(p.x + w, p.y + h - r[2]),
                Point::new(p.x + w - r[2], p.y + h),
                Point::new(p.x + r[3], p.y + h),
                Point::new(p.x, p.y + h - r[3]),
                Point::new(p.x, p.y + r[0]),
            ],
            self.color,
        );
        (pies, body)
    }
}

impl Shape for RoundRect {
    fn box_get(&self) -> Size {
        let (_, body) = self.construct();
        body.box_get()
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let (pies, body) = self.construct();
        for pie in &pies {
            pie.render(surface, position)?;
        }
        body.render(surface, position)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(RoundRect {
            size: self.size.scaled(k),
            radius: CornerRadius(self.radius.0.map(|r| r * k)),
            color: self.color,
            position: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacent_sums_fit(rr: &RoundRect, w: f64, h: f64) {
        let r = rr.clamped_radii();
        let eps = 1e-9;
        assert!(r[0] + r[1] <= w + eps, "top: {} + {} > {}", r[0], r[1], w);
        assert!(r[1] + r[2] <= h + eps, "right");
        assert!(r[2] + r[3] <= w + eps, "bottom");
        assert!(r[3] + r[0] <= h + eps, "left");
    }

    #[test]
    fn small_radii_are_untouched() {
        let rr = RoundRect::new((100.0, 60.0), 10.0, Rgba::BLACK);
        assert_eq!(rr.clamped_radii(), [10.0; 4]);
    }

    #[test]
    fn oversized_radii_are_clamped_to_shared_sides() {
        for radii in [
            [80.0, 80.0, 80.0, 80.0],
            [100.0, 0.0, 0.0, 100.0],
            [35.0, 90.0, 10.0, 70.0],
            [1000.0, 1.0, 1000.0, 1.0],
        ] {
            let rr = RoundRect::new((100.0, 60.0), radii, Rgba::BLACK);
            adjacent_sums_fit(&rr, 100.0, 60.0);
        }
    }

    #[test]
    fn box_matches_nominal_size() {
        let rr = RoundRect::new((100.0, 60.0), 12.0, Rgba::BLACK);
        assert_eq!(rr.box_get(), Size::new(100.0, 60.0));
    }

    #[test]
    fn construct_is_idempotent() {
        let rr = RoundRect::new((50.0, 50.0), [40.0, 40.0, 40.0, 40.0], Rgba::BLACK);
        let a = rr.construct().1.box_get();
        let b = rr.construct().1.box_get();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_radius_skips_corner_pies() {
        let rr = RoundRect::new((40.0, 40.0), [0.0, 5.0, 0.0, 5.0], Rgba::BLACK);
        let (pies, _) = rr.construct();
        assert_eq!(pies.len(), 2);
    }

    #[test]
    fn resize_scales_size_and_radii() {
        let rr = RoundRect::new((100.0, 60.0), 10.0, Rgba::BLACK);
        assert_eq!(rr.resized(0.5).box_get(), Size::new(50.0, 30.0));
    }
}
