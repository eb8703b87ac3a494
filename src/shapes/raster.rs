use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbaImage};

use crate::canvas::Canvas;
use crate::foundation::color::Rgba;
use crate::foundation::error::{FizzError, FizzResult};
use crate::foundation::geometry::{Point, Size};
use crate::foundation::math::fit_scale;
use crate::render::Surface;
use crate::shape::{DrawType, Shape, ShapeRef};

fn dims_to_size(dims: (u32, u32)) -> Size {
    Size::new(f64::from(dims.0), f64::from(dims.1))
}

fn size_to_dims(size: Size) -> (u32, u32) {
    (
        size.w.round().max(1.0) as u32,
        size.h.round().max(1.0) as u32,
    )
}

/// Center crop with cover semantics: scale uniformly until the image covers
/// the target on both axes, then cut the middle.
fn cover_crop(image: &RgbaImage, target: (u32, u32)) -> RgbaImage {
    if image.dimensions() == target {
        return image.clone();
    }
    let k = fit_scale(dims_to_size(image.dimensions()), dims_to_size(target));
    let scale = if k > 0.0 { 1.0 / k } else { 1.0 };
    let nw = ((f64::from(image.width()) * scale).round() as u32).max(target.0);
    let nh = ((f64::from(image.height()) * scale).round() as u32).max(target.1);
    let resized = imageops::resize(image, nw, nh, FilterType::Lanczos3);
    let ox = (nw - target.0) / 2;
    let oy = (nh - target.1) / 2;
    imageops::crop_imm(&resized, ox, oy, target.0, target.1).to_image()
}

/// Aspect-fit a mask into `target` dimensions, centered on an empty
/// (zero-coverage) background.
fn fit_mask(target: (u32, u32), mask: &GrayImage) -> GrayImage {
    if mask.dimensions() == target {
        return mask.clone();
    }
    let k = fit_scale(dims_to_size(target), dims_to_size(mask.dimensions()));
    let nw = ((f64::from(mask.width()) * k).round() as u32).clamp(1, target.0.max(1));
    let nh = ((f64::from(mask.height()) * k).round() as u32).clamp(1, target.1.max(1));
    let resized = imageops::resize(mask, nw, nh, FilterType::Lanczos3);
    let mut out = GrayImage::new(target.0, target.1);
    let ox = i64::from((target.0 - nw) / 2);
    let oy = i64::from((target.1 - nh) / 2);
    imageops::replace(&mut out, &resized, ox, oy);
    out
}

/// A decoded bitmap placed as a shape, with optional target size
/// (cover-cropped) and an optional luminance mask modulating its alpha.
#[derive(Clone, Debug)]
pub struct Raster {
    image: Arc<RgbaImage>,
    offset: Point,
    size: Option<Size>,
    mask: Option<Arc<GrayImage>>,
}

impl Raster {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
            offset: Point::ZERO,
            size: None,
            mask: None,
        }
    }

    /// Decode an image file. Unreadable files surface as I/O errors,
    /// undecodable data as `UnsupportedInput`.
    pub fn open(path: impl AsRef<Path>) -> FizzResult<Self> {
        let decoded = image::ImageReader::open(path.as_ref())?
            .decode()
            .map_err(|e| FizzError::unsupported(format!("invalid image: {e}")))?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    /// Decode from in-memory encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> FizzResult<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| FizzError::unsupported(format!("invalid image bytes: {e}")))?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    /// Snapshot a canvas render as a raster shape.
    pub fn from_canvas(canvas: &Canvas) -> FizzResult<Self> {
        Ok(Self::from_image(canvas.render()?))
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_offset(mut self, offset: impl Into<Point>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn with_mask(mut self, mask: GrayImage) -> Self {
        self.mask = Some(Arc::new(mask));
        self
    }

    fn target_dims(&self) -> (u32, u32) {
        match self.size {
            Some(size) => size_to_dims(size),
            None => self.image.dimensions(),
        }
    }

    /// The pixels this shape will paint: the source image cover-cropped to
    /// the target size when one is set.
    pub fn get(&self) -> RgbaImage {
        cover_crop(&self.image, self.target_dims())
    }

    /// Center cover-crop to an explicit size.
    pub fn crop(&self, size: (u32, u32)) -> RgbaImage {
        cover_crop(&self.image, size)
    }

    /// Center crop to the largest contained square.
    pub fn square(&self) -> RgbaImage {
        let side = self.image.width().min(self.image.height());
        self.crop((side, side))
    }
}

impl Shape for Raster {
    fn box_get(&self) -> Size {
        self.size
            .unwrap_or_else(|| dims_to_size(self.image.dimensions()))
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let img = self.get();
        let fitted = self.mask.as_deref().map(|m| fit_mask(img.dimensions(), m));
        surface.paste(position + self.offset, &img, fitted.as_ref())
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Raster {
            size: Some(self.box_get().scaled(k)),
            ..self.clone()
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}

/// A single-channel mask painted in a solid color: the mask picks where the
/// color lands and how strongly.
#[derive(Clone, Debug)]
pub struct Stencil {
    mask: Arc<GrayImage>,
    color: Rgba,
    offset: Point,
    size: Option<Size>,
}

impl Stencil {
    pub fn new(mask: GrayImage, color: Rgba) -> Self {
        Self {
            mask: Arc::new(mask),
            color,
            offset: Point::ZERO,
            size: None,
        }
    }

    /// Decode a mask from an image file, converting to luminance.
    pub fn open(path: impl AsRef<Path>, color: Rgba) -> FizzResult<Self> {
        let decoded = image::ImageReader::open(path.as_ref())?
            .decode()
            .map_err(|e| FizzError::unsupported(format!("invalid mask image: {e}")))?;
        Ok(Self::new(decoded.to_luma8(), color))
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_offset(mut self, offset: impl Into<Point>) -> Self {
        self.offset = offset.into();
        self
    }
}

impl Shape for Stencil {
    fn box_get(&self) -> Size {
        self.size
            .unwrap_or_else(|| dims_to_size(self.mask.dimensions()))
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let target = size_to_dims(self.box_get());
        let mask = if self.mask.dimensions() == target {
            (*self.mask).clone()
        } else {
            fit_mask(target, &self.mask)
        };
        surface.blit_mask(position + self.offset, &mask, self.color)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Stencil {
            size: Some(self.box_get().scaled(k)),
            ..self.clone()
        })
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}
