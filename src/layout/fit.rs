use std::sync::Arc;

use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Rect, Size};
use crate::foundation::math::fit_scale;
use crate::render::Surface;
use crate::shape::{DrawType, Shape, ShapeRef};
use crate::shapes::Polygon;

/// A target box for [`FitBox`], convertible from a size, a scalar (square
/// box), a `(w, h)` pair, or a polygon's bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpec(pub Size);

impl From<Size> for BoxSpec {
    fn from(size: Size) -> Self {
        Self(size)
    }
}

impl From<f64> for BoxSpec {
    fn from(side: f64) -> Self {
        Self(Size::square(side))
    }
}

impl From<(f64, f64)> for BoxSpec {
    fn from(pair: (f64, f64)) -> Self {
        Self(pair.into())
    }
}

impl From<&Polygon> for BoxSpec {
    fn from(poly: &Polygon) -> Self {
        Self(poly.box_get())
    }
}

/// Scales one child down (or up) to fit a target box, preserving aspect
/// ratio, and centers it inside.
#[derive(Clone, Debug)]
pub struct FitBox {
    child: ShapeRef,
    target: Size,
    offset: Point,
    debug: Option<Rgba>,
}

impl FitBox {
    pub fn new(child: ShapeRef, target: impl Into<BoxSpec>) -> Self {
        Self::at(child, target, Point::ZERO)
    }

    pub fn at(child: ShapeRef, target: impl Into<BoxSpec>, offset: impl Into<Point>) -> Self {
        Self {
            child,
            target: target.into().0,
            offset: offset.into(),
            debug: None,
        }
    }

    /// Stroke the target rectangle in `color` when rendering.
    pub fn with_debug_outline(mut self, color: Rgba) -> Self {
        self.debug = Some(color);
        self
    }

    /// The child scaled by the fit factor `min(tw/cw, th/ch)`.
    pub fn fitted(&self) -> ShapeRef {
        self.child.resized(fit_scale(self.target, self.child.box_get()))
    }
}

impl Shape for FitBox {
    fn box_get(&self) -> Size {
        self.target
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let position = position + self.offset;
        if let Some(color) = self.debug {
            surface.stroke_rect(Rect::from_origin_size(position, self.target), 1.0, color)?;
        }
        let fitted = self.fitted();
        let b = fitted.box_get();
        let centered = Point::new(
            (self.target.w - b.w) / 2.0,
            (self.target.h - b.h) / 2.0,
        )
        .round();
        fitted.render(surface, position + centered)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(FitBox {
            target: self.target.scaled(k),
            ..self.clone()
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::IntoShape;
    use crate::shapes::Rectangle;

    fn rect(w: f64, h: f64) -> ShapeRef {
        Rectangle::new((w, h), Rgba::BLACK).into_shape()
    }

    #[test]
    fn box_is_the_target_regardless_of_child() {
        let fit = FitBox::new(rect(500.0, 10.0), (100.0, 60.0));
        assert_eq!(fit.box_get(), Size::new(100.0, 60.0));
    }

    #[test]
    fn fitted_child_touches_at_least_one_axis() {
        let fit = FitBox::new(rect(200.0, 50.0), (100.0, 100.0));
        let b = fit.fitted().box_get();
        assert!(b.w <= 100.0 + 1e-9 && b.h <= 100.0 + 1e-9);
        assert!((b.w - 100.0).abs() < 1e-9);
        assert!((b.h - 25.0).abs() < 1e-9);
    }

    #[test]
    fn square_and_pair_specs_agree() {
        let a = FitBox::new(rect(10.0, 10.0), 64.0);
        let b = FitBox::new(rect(10.0, 10.0), (64.0, 64.0));
        assert_eq!(a.box_get(), b.box_get());
    }

    #[test]
    fn polygon_spec_uses_its_extent() {
        let poly = Polygon::new([(0.0, 0.0), (30.0, 0.0), (30.0, 20.0)], Rgba::BLACK);
        let fit = FitBox::new(rect(5.0, 5.0), &poly);
        assert_eq!(fit.box_get(), Size::new(30.0, 20.0));
    }

    #[test]
    fn resize_scales_the_target() {
        let fit = FitBox::new(rect(10.0, 10.0), (40.0, 20.0));
        assert_eq!(fit.resized(2.0).box_get(), Size::new(80.0, 40.0));
        let a = fit.resized(2.0).resized(3.0).box_get();
        let b = fit.resized(6.0).box_get();
        assert!((a.w - b.w).abs() < 1.0 && (a.h - b.h).abs() < 1.0);
    }
}
