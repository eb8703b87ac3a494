use std::sync::Arc;

use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Axis, Point, Size};
use crate::render::Surface;
use crate::shape::{DrawType, Shape, ShapeRef};

/// How a `Flex` spaces its children along the layout axis: either every gap
/// is a fixed number of units, or the total on-axis extent is fixed and the
/// gap is derived from what the children leave over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spacing {
    Gap(f64),
    Total(f64),
}

/// Sum of main-axis extents and maximum cross-axis extent of `children`.
pub(crate) fn content_size(children: &[ShapeRef], axis: Axis) -> (f64, f64) {
    let mut main = 0.0;
    let mut cross = 0.0_f64;
    for child in children {
        let b = child.box_get();
        main += axis.main(b);
        cross = cross.max(axis.cross(b));
    }
    (main, cross)
}

/// Derived gap for a fixed total extent. The denominator degenerates to 2
/// for zero or one child without `space_around`.
pub(crate) fn derived_gap(total: f64, content_main: f64, count: usize, space_around: bool) -> f64 {
    let extra = if space_around { 2.0 } else { 0.0 };
    let mut quantity = count as f64 - 1.0 + extra;
    if quantity <= 0.0 {
        quantity = 2.0;
    }
    (total - content_main) / quantity
}

/// Lays children along one axis, centering each on the cross axis.
///
/// The scale factor `k` is deferred: `resized` only accumulates it, and
/// `render` paints each child as `child.resized(k)` at scaled offsets, so the
/// children themselves stay untouched.
#[derive(Clone, Debug)]
pub struct Flex {
    children: Vec<ShapeRef>,
    spacing: Spacing,
    axis: Axis,
    space_around: bool,
    k: f64,
}

impl Flex {
    pub fn new(children: impl IntoIterator<Item = ShapeRef>, spacing: Spacing, axis: Axis) -> Self {
        Self {
            children: children.into_iter().collect(),
            spacing,
            axis,
            space_around: false,
            k: 1.0,
        }
    }

    pub fn with_space_around(mut self) -> Self {
        self.space_around = true;
        self
    }

    /// The unscaled gap between consecutive children.
    pub fn gap(&self) -> f64 {
        match self.spacing {
            Spacing::Gap(gap) => gap,
            Spacing::Total(total) => {
                let (main, _) = content_size(&self.children, self.axis);
                derived_gap(total, main, self.children.len(), self.space_around)
            }
        }
    }
}

impl Shape for Flex {
    fn box_get(&self) -> Size {
        let (content_main, cross) = content_size(&self.children, self.axis);
        let main = match self.spacing {
            Spacing::Gap(gap) => {
                // Leading and trailing gaps count toward the extent, so the
                // box always covers what render paints.
                let around = if self.space_around { 2.0 } else { 0.0 };
                content_main + gap * (self.children.len().saturating_sub(1) as f64 + around)
            }
            Spacing::Total(total) => total,
        };
        let packed = self.axis.pack(main, cross);
        Size::new(packed.x * self.k, packed.y * self.k)
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let gap = self.gap();
        let (_, cross) = content_size(&self.children, self.axis);
        let mut cursor = if self.space_around { gap } else { 0.0 };
        for child in &self.children {
            let b = child.box_get();
            let offset = self.axis.pack(
                (self.k * cursor).round(),
                (self.k * (cross - self.axis.cross(b)) / 2.0).round(),
            );
            child.resized(self.k).render(surface, position + offset)?;
            cursor += gap + self.axis.main(b);
        }
        Ok(())
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Flex {
            k: self.k * k,
            ..self.clone()
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}

/// Like `Flex`, but both extents are a fixed, externally supplied box that
/// the children fill; the gap is always derived, and every child sits one
/// gap-width past the previous edge, the first one included. A lone child
/// is thereby centered along the axis.
#[derive(Clone, Debug)]
pub struct Row {
    children: Vec<ShapeRef>,
    size: Size,
    axis: Axis,
    space_around: bool,
    k: f64,
}

impl Row {
    pub fn new(children: impl IntoIterator<Item = ShapeRef>, size: impl Into<Size>, axis: Axis) -> Self {
        Self {
            children: children.into_iter().collect(),
            size: size.into(),
            axis,
            space_around: false,
            k: 1.0,
        }
    }

    pub fn with_space_around(mut self) -> Self {
        self.space_around = true;
        self
    }

    /// The unscaled gap between consecutive children.
    pub fn gap(&self) -> f64 {
        let (main, _) = content_size(&self.children, self.axis);
        derived_gap(
            self.axis.main(self.size),
            main,
            self.children.len(),
            self.space_around,
        )
    }
}

impl Shape for Row {
    fn box_get(&self) -> Size {
        self.size.scaled(self.k)
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let gap = self.gap();
        let cross = self.axis.cross(self.size);
        // The first child always sits one gap in; the derived gap absorbs
        // whatever the fixed extent leaves over.
        let mut cursor = gap;
        for child in &self.children {
            let b = child.box_get();
            let offset = self.axis.pack(
                (self.k * cursor).round(),
                (self.k * (cross - self.axis.cross(b)) / 2.0).round(),
            );
            child.resized(self.k).render(surface, position + offset)?;
            cursor += gap + self.axis.main(b);
        }
        Ok(())
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Row {
            k: self.k * k,
            ..self.clone()
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}
