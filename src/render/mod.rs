//! The drawing-surface boundary.
//!
//! Leaf shapes never rasterize anything themselves; they call into one of the
//! two surface contracts below. Path shapes ([`crate::DrawType::Path`]) use the
//! vector half, pixel shapes write image data through the raw half.
//! [`RasterSurface`] implements both over one pixel buffer.

pub mod cpu;

pub use cpu::RasterSurface;

use image::{GrayImage, RgbaImage};

use crate::assets::font::{Align, FontFace};
use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Rect};

/// Vector fill operations ("path/fill" surface kind).
///
/// Pie-slice angles are in degrees, measured from 3 o'clock and increasing
/// clockwise in screen space (the y axis points down).
pub trait PathSurface {
    fn fill_polygon(&mut self, points: &[Point], color: Rgba) -> FizzResult<()>;

    fn fill_ellipse(&mut self, bbox: Rect, color: Rgba) -> FizzResult<()>;

    fn fill_pie_slice(
        &mut self,
        bbox: Rect,
        start_deg: f64,
        stop_deg: f64,
        color: Rgba,
    ) -> FizzResult<()>;

    /// Outline a rectangle; diagnostic overlays only.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba) -> FizzResult<()>;

    /// Paint a multiline text block with its top-left corner at `position`,
    /// aligning lines inside the block per `align`.
    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        font: &FontFace,
        px: f32,
        align: Align,
        color: Rgba,
    ) -> FizzResult<()>;
}

/// Raw pixel operations ("pixel/image" surface kind).
pub trait PixelSurface {
    fn dimensions(&self) -> (u32, u32);

    fn put_pixel(&mut self, position: Point, color: Rgba);

    /// Paint `color` wherever `mask` has coverage, top-left at `position`.
    fn blit_mask(&mut self, position: Point, mask: &GrayImage, color: Rgba) -> FizzResult<()>;

    /// Alpha-composite `image` at `position`; when `mask` is given it
    /// modulates the image's alpha channel.
    fn paste(
        &mut self,
        position: Point,
        image: &RgbaImage,
        mask: Option<&GrayImage>,
    ) -> FizzResult<()>;
}

/// The full surface a shape tree renders onto.
pub trait Surface: PathSurface + PixelSurface {}

impl<T: PathSurface + PixelSurface> Surface for T {}
