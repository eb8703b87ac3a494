use std::fmt;
use std::sync::Arc;

use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::render::Surface;

/// Which half of the drawing surface a shape paints through.
///
/// Path shapes go through the vector rasterizer ([`crate::render::PathSurface`]);
/// pixel shapes write image data directly ([`crate::render::PixelSurface`]).
/// [`crate::render::RasterSurface`] carries both, but a split backend can use
/// this tag to route each child to the matching half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawType {
    Path,
    Pixel,
}

/// The capability set every drawable/layoutable node implements.
///
/// Contract:
/// - `box_get` reports the tight bounding box at the current scale, excluding
///   any position offset, and is consistent with what `render` paints.
/// - `render` paints the shape with its local origin at `position`.
/// - `resized(k)` is pure (the receiver is unmodified) and composes:
///   `resized(k1).resized(k2)` matches `resized(k1 * k2)` within rounding.
///
/// Containers re-derive all geometry from their children on every call; there
/// is no cached layout state to invalidate.
pub trait Shape: fmt::Debug + Send + Sync {
    fn box_get(&self) -> Size;

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()>;

    fn resized(&self, k: f64) -> ShapeRef;

    fn draw_type(&self) -> DrawType {
        DrawType::Path
    }
}

/// Shared handle to a shape tree node. Containers hold children through this,
/// so `resized` containers can reuse the same children without cloning them.
pub type ShapeRef = Arc<dyn Shape>;

/// Move a concrete shape behind a [`ShapeRef`].
pub trait IntoShape {
    fn into_shape(self) -> ShapeRef;
}

impl<S: Shape + 'static> IntoShape for S {
    fn into_shape(self) -> ShapeRef {
        Arc::new(self)
    }
}
