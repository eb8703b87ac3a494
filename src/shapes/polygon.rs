use std::f64::consts::PI;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::color::Rgba;
use crate::foundation::error::FizzResult;
use crate::foundation::geometry::{Point, Size};
use crate::render::Surface;
use crate::shape::{DrawType, Shape, ShapeRef};

/// A filled polygon. The bounding box is the axis-aligned extent of the point
/// set; the points themselves may sit anywhere relative to the local origin,
/// and `render` paints them translated by the given position.
#[derive(Clone, Debug)]
pub struct Polygon {
    points: SmallVec<[Point; 8]>,
    color: Rgba,
}

impl Polygon {
    pub fn new(points: impl IntoIterator<Item = impl Into<Point>>, color: Rgba) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            color,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Top-left corner of the point set's extent.
    pub fn min_corner(&self) -> Point {
        Point::new(
            self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
            self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
        )
    }

    /// A copy rotated about `center` by `degrees`.
    pub fn rotated(&self, center: impl Into<Point>, degrees: f64) -> Polygon {
        let center = center.into();
        Polygon {
            points: self.points.iter().map(|p| p.rotated(center, degrees)).collect(),
            color: self.color,
        }
    }

    /// A copy scaled by `k` about the extent's top-left corner, so the box
    /// origin stays put while the extent scales.
    pub fn scaled(&self, k: f64) -> Polygon {
        if self.points.is_empty() {
            return self.clone();
        }
        let anchor = self.min_corner();
        Polygon {
            points: self
                .points
                .iter()
                .map(|p| (*p - anchor) * k + anchor)
                .collect(),
            color: self.color,
        }
    }
}

impl Shape for Polygon {
    fn box_get(&self) -> Size {
        if self.points.is_empty() {
            return Size::ZERO;
        }
        let min = self.min_corner();
        let max_x = self.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Size::new(max_x - min.x, max_y - min.y)
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        let translated: Vec<Point> = self.points.iter().map(|p| *p + position).collect();
        surface.fill_polygon(&translated, self.color)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(self.scaled(k))
    }
}

/// An axis-aligned rectangle, a `Polygon` under the hood.
#[derive(Clone, Debug)]
pub struct Rectangle {
    poly: Polygon,
    size: Size,
    position: Point,
}

impl Rectangle {
    pub fn new(size: impl Into<Size>, color: Rgba) -> Self {
        Self::at(size, color, Point::ZERO)
    }

    pub fn at(size: impl Into<Size>, color: Rgba, position: impl Into<Point>) -> Self {
        let size = size.into();
        let p = position.into();
        let points = [
            p,
            Point::new(p.x + size.w, p.y),
            Point::new(p.x + size.w, p.y + size.h),
            Point::new(p.x, p.y + size.h),
        ];
        Self {
            poly: Polygon::new(points, color),
            size,
            position: p,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl Shape for Rectangle {
    fn box_get(&self) -> Size {
        self.size
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        self.poly.render(surface, position)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Rectangle::at(
            self.size.scaled(k),
            self.poly.color(),
            self.position,
        ))
    }
}

/// A star polygon: `peaks` outer/inner vertex pairs placed alternately around
/// a circle at angle step `pi / peaks`, inner vertices at `inner_k * radius`.
#[derive(Clone, Debug)]
pub struct Star {
    peaks: u32,
    radius: f64,
    inner_k: f64,
    color: Rgba,
}

impl Star {
    pub fn new(peaks: u32, radius: f64, inner_k: f64, color: Rgba) -> Self {
        Self {
            peaks,
            radius,
            inner_k,
            color,
        }
    }

    /// The generated outline.
    pub fn to_polygon(&self) -> Polygon {
        let step = PI / f64::from(self.peaks.max(1));
        let mut points = Vec::with_capacity(self.peaks as usize * 2);
        for i in 0..self.peaks {
            let base = 2.0 * f64::from(i) * step;
            points.push(Point::new(
                self.radius * base.cos(),
                self.radius * base.sin(),
            ));
            points.push(Point::new(
                self.radius * self.inner_k * (base + step).cos(),
                self.radius * self.inner_k * (base + step).sin(),
            ));
        }
        Polygon::new(points, self.color)
    }
}

impl Shape for Star {
    fn box_get(&self) -> Size {
        self.to_polygon().box_get()
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        self.to_polygon().render(surface, position)
    }

    fn resized(&self, k: f64) -> ShapeRef {
        Arc::new(Star {
            radius: self.radius * k,
            ..self.clone()
        })
    }
}

/// A single pixel; the degenerate pixel-surface shape.
#[derive(Clone, Debug)]
pub struct Dot {
    pub offset: Point,
    pub color: Rgba,
}

impl Dot {
    pub fn new(offset: impl Into<Point>, color: Rgba) -> Self {
        Self {
            offset: offset.into(),
            color,
        }
    }
}

impl Shape for Dot {
    fn box_get(&self) -> Size {
        Size::square(1.0)
    }

    fn render(&self, surface: &mut dyn Surface, position: Point) -> FizzResult<()> {
        surface.put_pixel(position + self.offset, self.color);
        Ok(())
    }

    fn resized(&self, _k: f64) -> ShapeRef {
        Arc::new(self.clone())
    }

    fn draw_type(&self) -> DrawType {
        DrawType::Pixel
    }
}
