use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::render::{PixelSurface, RasterSurface};
use crate::shape::ShapeRef;

/// One shape placed on a canvas at an absolute position, addressable by
/// label for later removal or repositioning.
#[derive(Clone, Debug)]
pub struct Placement {
    pub shape: ShapeRef,
    pub position: Point,
    pub label: String,
}

/// An ordered list of shape placements on a fixed-size surface.
///
/// Placement order is z-order: later placements paint over earlier ones.
/// When a background image is set, its dimensions override the configured
/// size as the surface extent.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: Size,
    color: Rgba,
    background: Option<RgbaImage>,
    placements: Vec<Placement>,
    next_label: u64,
}

impl Canvas {
    pub fn new(size: impl Into<Size>, color: Rgba) -> Self {
        Self {
            size: size.into(),
            color,
            background: None,
            placements: Vec::new(),
            next_label: 0,
        }
    }

    pub fn with_background(mut self, image: RgbaImage) -> Self {
        self.background = Some(image);
        self
    }

    /// Surface extent in pixels: the background image's dimensions when one
    /// is set, otherwise the configured size.
    pub fn dimensions(&self) -> (u32, u32) {
        match &self.background {
            Some(image) => image.dimensions(),
            None => (
                self.size.w.round().max(1.0) as u32,
                self.size.h.round().max(1.0) as u32,
            ),
        }
    }

    fn fresh_label(&mut self) -> String {
        let label = format!("obj{}", self.next_label);
        self.next_label += 1;
        label
    }

    /// Append a shape; returns the generated label.
    pub fn put(&mut self, shape: ShapeRef, position: impl Into<Point>) -> String {
        let label = self.fresh_label();
        self.placements.push(Placement {
            shape,
            position: position.into(),
            label: label.clone(),
        });
        label
    }

    /// Append a shape under an explicit label.
    pub fn put_labeled(
        &mut self,
        shape: ShapeRef,
        position: impl Into<Point>,
        label: impl Into<String>,
    ) {
        self.placements.push(Placement {
            shape,
            position: position.into(),
            label: label.into(),
        });
    }

    /// Insert a shape at a z-order index; indices past the end append.
    pub fn insert(&mut self, index: usize, shape: ShapeRef, position: impl Into<Point>) -> String {
        let label = self.fresh_label();
        let index = index.min(self.placements.len());
        self.placements.insert(
            index,
            Placement {
                shape,
                position: position.into(),
                label: label.clone(),
            },
        );
        label
    }

    /// Remove the placement with `label`, returning its shape if found.
    pub fn pop(&mut self, label: &str) -> Option<ShapeRef> {
        let index = self.placements.iter().position(|p| p.label == label)?;
        Some(self.placements.remove(index).shape)
    }

    /// Reposition the placement with `label`; returns whether it was found.
    pub fn move_to(&mut self, label: &str, position: impl Into<Point>) -> bool {
        match self.placements.iter_mut().find(|p| p.label == label) {
            Some(placement) => {
                placement.position = position.into();
                true
            }
            None => false,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Corner coordinates in clockwise order from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (w, h) = self.dimensions();
        let (w, h) = (f64::from(w), f64::from(h));
        [
            Point::ZERO,
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ]
    }

    pub fn center(&self) -> Point {
        let (w, h) = self.dimensions();
        Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0)
    }

    /// Paint the background, then every placement in z-order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn render(&self) -> FizzResult<RgbaImage> {
        let (w, h) = self.dimensions();
        tracing::debug!(w, h, placements = self.placements.len(), "rendering canvas");
        let mut surface = RasterSurface::new(w, h, self.color)?;
        if let Some(background) = &self.background {
            surface.paste(Point::ZERO, background, None)?;
        }
        for placement in &self.placements {
            tracing::trace!(label = %placement.label, "rendering placement");
            placement.shape.render(&mut surface, placement.position)?;
        }
        Ok(surface.into_image())
    }

    /// Render and write to `path`; the format comes from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> FizzResult<()> {
        self.render()?.save(path.as_ref())?;
        Ok(())
    }

    /// Render and encode into an in-memory buffer.
    pub fn to_bytes(&self, format: ImageFormat) -> FizzResult<Vec<u8>> {
        let image = self.render()?;
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format)?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::IntoShape;
    use crate::shapes::Rectangle;

    fn rect() -> ShapeRef {
        Rectangle::new((10.0, 10.0), Rgba::BLACK).into_shape()
    }

    #[test]
    fn labels_are_unique_and_monotonic() {
        let mut canvas = Canvas::new((50.0, 50.0), Rgba::WHITE);
        let a = canvas.put(rect(), (0.0, 0.0));
        let b = canvas.put(rect(), (10.0, 10.0));
        assert_ne!(a, b);
        assert_eq!(a, "obj0");
        assert_eq!(b, "obj1");
    }

    #[test]
    fn pop_and_move_address_by_label() {
        let mut canvas = Canvas::new((50.0, 50.0), Rgba::WHITE);
        let label = canvas.put(rect(), (0.0, 0.0));
        assert!(canvas.move_to(&label, (5.0, 5.0)));
        assert_eq!(canvas.placements()[0].position, Point::new(5.0, 5.0));
        assert!(canvas.pop(&label).is_some());
        assert!(canvas.pop(&label).is_none());
        assert!(!canvas.move_to(&label, (0.0, 0.0)));
    }

    #[test]
    fn insert_controls_z_order() {
        let mut canvas = Canvas::new((50.0, 50.0), Rgba::WHITE);
        let top = canvas.put(rect(), (0.0, 0.0));
        let under = canvas.insert(0, rect(), (0.0, 0.0));
        assert_eq!(canvas.placements()[0].label, under);
        assert_eq!(canvas.placements()[1].label, top);
    }

    #[test]
    fn background_image_dictates_dimensions() {
        let canvas =
            Canvas::new((50.0, 50.0), Rgba::WHITE).with_background(RgbaImage::new(30, 20));
        assert_eq!(canvas.dimensions(), (30, 20));
        assert_eq!(canvas.center(), Point::new(15.0, 10.0));
    }

    #[test]
    fn empty_canvas_renders_the_background_color() {
        let canvas = Canvas::new((4.0, 4.0), Rgba::RED);
        let image = canvas.render().unwrap();
        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(image.get_pixel(2, 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn corners_walk_clockwise_from_origin() {
        let canvas = Canvas::new((10.0, 20.0), Rgba::WHITE);
        assert_eq!(
            canvas.corners(),
            [
                Point::ZERO,
                Point::new(10.0, 0.0),
                Point::new(10.0, 20.0),
                Point::new(0.0, 20.0),
            ]
        );
    }
}
