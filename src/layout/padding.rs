use std::sync::Arc;

use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::foundation::math::fit_scale;
use crate::render::Surface;
use crate::shape::{DrawType, Shape, ShapeRef};

/// Per-side insets around a padded child.
///
/// The shorthand conversions follow the usual box-model reading: one value
/// for all sides, `[vertical, horizontal]`, `[top, horizontal, bottom]`, or
/// `[top, right, bottom, left]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

impl From<f64> for Insets {
    fn from(all: f64) -> Self {
        Self::new(all, all, all, all)
    }
}

impl From<[f64; 2]> for Insets {
    fn from([vertical, horizontal]: [f64; 2]) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<[f64; 3]> for Insets {
    fn from([top, horizontal, bottom]: [f64; 3]) -> Self {
        Self::new(top, horizontal, bottom, horizontal)
    }
}

impl From<[f64; 4]> for Insets {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Wraps one child with fixed insets.
///
/// `resized` scales the total box, then refits the child into the space the
/// unscaled insets leave over; the insets themselves never scale.
#[derive(Clone, Debug)]
pub struct Padding {
    child: ShapeRef,
    insets: Insets,
}

impl Padding {
    pub fn new(child: ShapeRef, insets: impl Into<Insets>) -> Self {
        Self {
            child,
            insets: insets.into(),
        }
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }
}

impl Shape for Padding {
    fn box_get(&self) -> Size {
        let b = self.child.box_get();
        Size::new(
            b.w + self.insets.horizontal(),
            b.h + self.insets.vertical(),
        )
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        self.child.render(
            surface,
            position + Point::new(self.insets.left, self.insets.top),
        )
    }

    fn resized(&self, k: f64) -> ShapeRef {
        let total = self.box_get().scaled(k);
        let inner = Size::new(
            total.w - self.insets.horizontal(),
            total.h - self.insets.vertical(),
        );
        let nk = fit_scale(inner, self.child.box_get()).max(0.0);
        Arc::new(Padding {
            child: self.child.resized(nk),
            insets: self.insets,
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}
