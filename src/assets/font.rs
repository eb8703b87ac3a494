use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use fontdue::layout::{CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle};

use crate::foundation::error::{FizzError, FizzResult};
use crate::foundation::geometry::{Point, Size};

/// Per-axis alignment of a text block relative to its paint position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    fn from_code(c: char) -> FizzResult<Self> {
        match c {
            's' => Ok(Align::Start),
            'c' => Ok(Align::Center),
            'e' => Ok(Align::End),
            other => Err(FizzError::config(format!(
                "alignment code must be one of 'c', 's', 'e', got '{other}'"
            ))),
        }
    }

    /// Offset of the block origin from the paint position for a block of the
    /// given extent along one axis.
    pub(crate) fn origin_shift(self, extent: f64) -> f64 {
        match self {
            Align::Start => 0.0,
            Align::Center => -(extent / 2.0).floor(),
            Align::End => -extent,
        }
    }
}

/// Two-axis alignment, parseable from the compact 2-character code
/// (one letter per axis, each of `c`/`s`/`e`): `"cs"` centers horizontally
/// and pins the top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Align2 {
    pub x: Align,
    pub y: Align,
}

impl Align2 {
    pub const fn new(x: Align, y: Align) -> Self {
        Self { x, y }
    }
}

impl Default for Align2 {
    fn default() -> Self {
        Self::new(Align::Center, Align::Start)
    }
}

impl FromStr for Align2 {
    type Err = FizzError;

    fn from_str(code: &str) -> FizzResult<Self> {
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(x), Some(y), None) => Ok(Self::new(Align::from_code(x)?, Align::from_code(y)?)),
            _ => Err(FizzError::config(format!(
                "alignment must be a 2-character code like \"cs\", got \"{code}\""
            ))),
        }
    }
}

/// A rasterized glyph positioned in surface space, ready to blend.
pub struct PlacedGlyph {
    /// Top-left corner of the coverage bitmap.
    pub origin: Point,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, one byte per pixel.
    pub coverage: Vec<u8>,
}

/// A loaded font. Cheap to clone; the parsed font data is shared.
///
/// Owns the multiline metrics and glyph layout the `Text` shape and the
/// raster surface both consume.
#[derive(Clone)]
pub struct FontFace {
    font: Arc<fontdue::Font>,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace").finish_non_exhaustive()
    }
}

impl FontFace {
    /// Load a TrueType/OpenType font from a file.
    pub fn load(path: impl AsRef<Path>) -> FizzResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Parse a font from raw TTF/OTF bytes.
    pub fn from_bytes(bytes: &[u8]) -> FizzResult<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(FizzError::font)?;
        Ok(Self {
            font: Arc::new(font),
        })
    }

    /// Tight box of a multiline text block at `px`: widest line by height of
    /// all lines.
    pub fn measure(&self, text: &str, px: f32) -> Size {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[self.font.as_ref()], &TextStyle::new(text, px, 0));

        let width = layout
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0f32, f32::max);
        Size::new(f64::from(width), f64::from(layout.height()))
    }

    /// Lay out a multiline block with its top-left corner at `origin`, with
    /// per-line horizontal alignment inside the block's own width, and
    /// rasterize every visible glyph.
    pub fn layout_glyphs(
        &self,
        origin: Point,
        text: &str,
        px: f32,
        align: Align,
    ) -> Vec<PlacedGlyph> {
        let block = self.measure(text, px);
        let settings = LayoutSettings {
            x: origin.x as f32,
            y: origin.y as f32,
            max_width: Some(block.w as f32 + 1.0),
            horizontal_align: match align {
                Align::Start => HorizontalAlign::Left,
                Align::Center => HorizontalAlign::Center,
                Align::End => HorizontalAlign::Right,
            },
            ..LayoutSettings::default()
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&settings);
        layout.append(&[self.font.as_ref()], &TextStyle::new(text, px, 0));

        let mut placed = Vec::new();
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (_, coverage) = self.font.rasterize_config(glyph.key);
            placed.push(PlacedGlyph {
                origin: Point::new(f64::from(glyph.x), f64::from(glyph.y)),
                width: glyph.width,
                height: glyph.height,
                coverage,
            });
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_codes_parse() {
        assert_eq!("cs".parse::<Align2>().unwrap(), Align2::default());
        assert_eq!(
            "ee".parse::<Align2>().unwrap(),
            Align2::new(Align::End, Align::End)
        );
        assert!("q".parse::<Align2>().is_err());
        assert!("csc".parse::<Align2>().is_err());
        assert!("cq".parse::<Align2>().is_err());
    }

    #[test]
    fn origin_shift_per_mode() {
        assert_eq!(Align::Start.origin_shift(10.0), 0.0);
        assert_eq!(Align::Center.origin_shift(10.0), -5.0);
        assert_eq!(Align::End.origin_shift(10.0), -10.0);
    }

    #[test]
    fn bad_font_bytes_are_rejected() {
        assert!(matches!(
            FontFace::from_bytes(&[0u8; 16]),
            Err(FizzError::Font(_))
        ));
    }
}
