//! Fizz is a small vector-graphics composition library.
//!
//! A tree of declarative shapes (polygons, ellipses, text, bitmaps, rounded
//! rectangles, stars) is laid out by container shapes (flex rows, grids,
//! padding, fit-to-box) and rendered onto a raster canvas, with optional
//! animated-GIF capture. The public API is tree-oriented:
//!
//! - Build leaf shapes and wrap them in [`layout`] containers
//! - Place roots on a [`Canvas`] at absolute positions
//! - Render to an image, save it, or capture frames with a [`GifRecorder`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub mod canvas;
pub mod encode;
pub mod layout;
pub mod render;
pub mod shape;
pub mod shapes;
pub mod template;

pub use crate::assets::font::{Align, Align2, FontFace};
pub use crate::canvas::{Canvas, Placement};
pub use crate::encode::GifRecorder;
pub use crate::foundation::color::{hsl, HslArg, Rgba};
pub use crate::foundation::error::{FizzError, FizzResult};
pub use crate::foundation::geometry::{Axis, Point, Rect, Size};
pub use crate::layout::{BoxSpec, Cell, FitBox, Flex, Grid, Insets, Padding, Row, Spacing};
pub use crate::render::{PathSurface, PixelSurface, RasterSurface, Surface};
pub use crate::shape::{DrawType, IntoShape, Shape, ShapeRef};
pub use crate::shapes::{
    Dot, Ellipse, PieSlice, Polygon, Raster, Rectangle, RoundRect, Star, Stencil, Text,
};
pub use crate::template::Template;
