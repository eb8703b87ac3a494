use std::sync::Arc;

use crate::assets::font::{Align2, FontFace};
use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::render::Surface;
use crate::shape::{Shape, ShapeRef};

/// A multiline text block.
///
/// The bounding box comes from the font's metrics; the two-axis alignment
/// shifts the paint origin relative to the measured box (e.g. the default
/// `"cs"` centers horizontally around the paint position and hangs the block
/// down from it).
#[derive(Clone, Debug)]
pub struct Text {
    text: String,
    font: FontFace,
    px: f32,
    offset: Point,
    align: Align2,
    color: Rgba,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontFace, px: f32) -> Self {
        Self {
            text: text.into(),
            font,
            px,
            offset: Point::ZERO,
            align: Align2::default(),
            color: Rgba::BLACK,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: Align2) -> Self {
        self.align = align;
        self
    }

    pub fn with_offset(mut self, offset: impl Into<Point>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    /// Top-left corner of the measured block when painted at `position`.
    pub fn origin(&self, position: Point) -> Point {
        let size = self.box_get();
        let anchor = position + self.offset;
        Point::new(
            anchor.x + self.align.x.origin_shift(size.w),
            anchor.y + self.align.y.origin_shift(size.h),
        )
    }
}

impl Shape for Text {
    fn box_get(&self) -> Size {
        self.font.measure(&self.text, self.px)
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        surface.draw_text(
            self.origin(position),
            &self.text,
            &self.font,
            self.px,
            self.align.x,
            self.color,
        )
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Text {
            px: (f64::from(self.px) * k) as f32,
            ..self.clone()
        })
    }
}
