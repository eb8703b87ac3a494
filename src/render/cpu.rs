//! CPU raster surface: tiny-skia for path filling, direct pixel blending for
//! image data and glyph coverage.

use image::{GrayImage, RgbaImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::assets::font::{Align, FontFace};
use crate::foundation::color::Rgba;
use crate::foundation::error::{FizzError, FizzResult};
use crate::foundation::geometry::{Point, Rect};
use crate::render::{PathSurface, PixelSurface};

/// A fixed-size RGBA pixel buffer implementing both surface kinds.
///
/// Internally premultiplied (tiny-skia's native format); [`Self::into_image`]
/// converts back to straight alpha for encoding.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Rgba) -> FizzResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            FizzError::config(format!("surface dimensions must be > 0, got {width}x{height}"))
        })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Convert to a straight-alpha image for encoding or inspection.
    pub fn into_image(self) -> RgbaImage {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(w, h, data).expect("pixmap dimensions match buffer")
    }

    fn paint(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }

    fn fill(&mut self, path: &tiny_skia::Path, color: Rgba) {
        self.pixmap.fill_path(
            path,
            &Self::paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Source-over blend of a straight-alpha color, scaled by `coverage`,
    /// onto the premultiplied buffer. Out-of-bounds writes are dropped.
    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba, coverage: u8) {
        if x < 0 || y < 0 || x >= i64::from(self.pixmap.width()) || y >= i64::from(self.pixmap.height())
        {
            return;
        }
        let a = mul_div255(color.a, coverage);
        if a == 0 {
            return;
        }

        let idx = y as usize * self.pixmap.width() as usize + x as usize;
        let dst = self.pixmap.pixels()[idx];
        let inv = 255 - a;

        let out_r = mul_div255(color.r, a) + mul_div255(dst.red(), inv);
        let out_g = mul_div255(color.g, a) + mul_div255(dst.green(), inv);
        let out_b = mul_div255(color.b, a) + mul_div255(dst.blue(), inv);
        let out_a = a + mul_div255(dst.alpha(), inv);

        // Premultiplied components never exceed alpha, so this cannot fail.
        if let Some(px) = tiny_skia::PremultipliedColorU8::from_rgba(
            out_r.min(out_a),
            out_g.min(out_a),
            out_b.min(out_a),
            out_a,
        ) {
            self.pixmap.pixels_mut()[idx] = px;
        }
    }
}

fn mul_div255(x: u8, y: u8) -> u8 {
    ((u16::from(x) * u16::from(y) + 127) / 255) as u8
}

fn skia_rect(rect: Rect) -> FizzResult<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32)
        .ok_or_else(|| FizzError::config(format!("degenerate rectangle {rect:?}")))
}

/// Point on the ellipse inscribed in a centered box, at `deg` degrees
/// clockwise from 3 o'clock.
fn ellipse_point(cx: f64, cy: f64, rx: f64, ry: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + rx * rad.cos(), cy + ry * rad.sin())
}

/// Append a clockwise elliptical arc as cubic segments of at most 90 degrees.
fn arc_to(pb: &mut PathBuilder, cx: f64, cy: f64, rx: f64, ry: f64, from_deg: f64, to_deg: f64) {
    let sweep = to_deg - from_deg;
    let segments = (sweep / 90.0).ceil().max(1.0) as usize;
    let step = sweep / segments as f64;

    for i in 0..segments {
        let a0 = (from_deg + step * i as f64).to_radians();
        let a1 = (from_deg + step * (i + 1) as f64).to_radians();
        // Standard cubic approximation of a circular arc.
        let k = 4.0 / 3.0 * ((a1 - a0) / 4.0).tan();

        let (s, c) = (a0.sin(), a0.cos());
        let (s1, c1) = (a1.sin(), a1.cos());

        let p1 = (cx + rx * (c - k * s), cy + ry * (s + k * c));
        let p2 = (cx + rx * (c1 + k * s1), cy + ry * (s1 - k * c1));
        let end = (cx + rx * c1, cy + ry * s1);
        pb.cubic_to(
            p1.0 as f32, p1.1 as f32, p2.0 as f32, p2.1 as f32, end.0 as f32, end.1 as f32,
        );
    }
}

impl PathSurface for RasterSurface {
    fn fill_polygon(&mut self, points: &[Point], color: Rgba) -> FizzResult<()> {
        if points.len() < 3 {
            return Ok(());
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x as f32, points[0].y as f32);
        for p in &points[1..] {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill(&path, color);
        }
        Ok(())
    }

    fn fill_ellipse(&mut self, bbox: Rect, color: Rgba) -> FizzResult<()> {
        let rect = skia_rect(bbox)?;
        if let Some(path) = PathBuilder::from_oval(rect) {
            self.fill(&path, color);
        }
        Ok(())
    }

    fn fill_pie_slice(
        &mut self,
        bbox: Rect,
        start_deg: f64,
        stop_deg: f64,
        color: Rgba,
    ) -> FizzResult<()> {
        let mut stop = stop_deg;
        while stop < start_deg {
            stop += 360.0;
        }
        if stop - start_deg >= 360.0 {
            return self.fill_ellipse(bbox, color);
        }
        if stop == start_deg {
            return Ok(());
        }

        let cx = bbox.x + bbox.w / 2.0;
        let cy = bbox.y + bbox.h / 2.0;
        let rx = bbox.w / 2.0;
        let ry = bbox.h / 2.0;

        let mut pb = PathBuilder::new();
        pb.move_to(cx as f32, cy as f32);
        let (sx, sy) = ellipse_point(cx, cy, rx, ry, start_deg);
        pb.line_to(sx as f32, sy as f32);
        arc_to(&mut pb, cx, cy, rx, ry, start_deg, stop);
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill(&path, color);
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba) -> FizzResult<()> {
        let rect = skia_rect(rect)?;
        let path = PathBuilder::from_rect(rect);
        self.pixmap.stroke_path(
            &path,
            &Self::paint(color),
            &Stroke {
                width: width as f32,
                ..Stroke::default()
            },
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        font: &FontFace,
        px: f32,
        align: Align,
        color: Rgba,
    ) -> FizzResult<()> {
        for glyph in font.layout_glyphs(position, text, px, align) {
            let gx = glyph.origin.x.round() as i64;
            let gy = glyph.origin.y.round() as i64;
            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let coverage = glyph.coverage[row * glyph.width + col];
                    if coverage > 0 {
                        self.blend_pixel(gx + col as i64, gy + row as i64, color, coverage);
                    }
                }
            }
        }
        Ok(())
    }
}

impl PixelSurface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn put_pixel(&mut self, position: Point, color: Rgba) {
        self.blend_pixel(position.x.round() as i64, position.y.round() as i64, color, 255);
    }

    fn blit_mask(&mut self, position: Point, mask: &GrayImage, color: Rgba) -> FizzResult<()> {
        let ox = position.x.round() as i64;
        let oy = position.y.round() as i64;
        for (x, y, px) in mask.enumerate_pixels() {
            let coverage = px.0[0];
            if coverage > 0 {
                self.blend_pixel(ox + i64::from(x), oy + i64::from(y), color, coverage);
            }
        }
        Ok(())
    }

    fn paste(
        &mut self,
        position: Point,
        image: &RgbaImage,
        mask: Option<&GrayImage>,
    ) -> FizzResult<()> {
        let ox = position.x.round() as i64;
        let oy = position.y.round() as i64;
        for (x, y, px) in image.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            let a = match mask {
                Some(m) if x < m.width() && y < m.height() => {
                    mul_div255(a, m.get_pixel(x, y).0[0])
                }
                Some(_) => 0,
                None => a,
            };
            if a > 0 {
                self.blend_pixel(
                    ox + i64::from(x),
                    oy + i64::from(y),
                    Rgba::new(r, g, b, a),
                    255,
                );
            }
        }
        Ok(())
    }
}
