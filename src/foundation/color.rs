use crate::foundation::error::{FizzError, FizzResult};
use crate::foundation::math::SplitMix64;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color, each channel in `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a color string: a named color, `#RRGGBB` / `#RRGGBBAA` hex, or
    /// the functional `hsl(H, S%, L%)` form.
    pub fn parse(s: &str) -> FizzResult<Rgba> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        // Byte-wise prefix check: indexing by `..4` would panic on inputs
        // whose fourth byte splits a multibyte character.
        if s.len() >= 5 && s.as_bytes()[..4].eq_ignore_ascii_case(b"hsl(") && s.ends_with(')') {
            return parse_hsl_call(&s[4..s.len() - 1]);
        }
        named(s).ok_or_else(|| FizzError::color(format!("unknown color \"{s}\"")))
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba { a, ..self }
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Arr(Vec<u8>),
            HslObj { h: f64, s: f64, l: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Rgba::parse(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.len() {
                3 => Ok(Rgba::rgb(v[0], v[1], v[2])),
                4 => Ok(Rgba::new(v[0], v[1], v[2], v[3])),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
            Repr::HslObj { h, s, l } => Ok(hsl_to_rgba(h, s / 100.0, l / 100.0)),
        }
    }
}

/// One HSL channel of [`hsl`]: a fixed value, a uniform pick from an
/// inclusive range, or a pick across the channel's whole domain.
#[derive(Clone, Copy, Debug)]
pub enum HslArg {
    Fixed(f64),
    Range(f64, f64),
    Any,
}

impl From<f64> for HslArg {
    fn from(v: f64) -> Self {
        HslArg::Fixed(v)
    }
}

impl From<(f64, f64)> for HslArg {
    fn from((lo, hi): (f64, f64)) -> Self {
        HslArg::Range(lo, hi)
    }
}

/// Build a color from HSL channel specs, with hue in degrees and
/// saturation/lightness in percent. Ranged channels draw a uniform value
/// from `seed` and wrap it modulo the channel maximum, so equal seeds give
/// equal colors.
pub fn hsl(
    h: impl Into<HslArg>,
    s: impl Into<HslArg>,
    l: impl Into<HslArg>,
    seed: u64,
) -> Rgba {
    let mut rng = SplitMix64::new(seed);
    let mut pick = |arg: HslArg, max: f64| -> f64 {
        match arg {
            HslArg::Fixed(v) => v,
            HslArg::Range(lo, hi) => {
                let span = (hi - lo).max(0.0);
                (lo + rng.next_f64() * span).rem_euclid(max + 1.0)
            }
            HslArg::Any => rng.next_f64() * max,
        }
    };
    let h = pick(h.into(), 360.0);
    let s = pick(s.into(), 100.0);
    let l = pick(l.into(), 100.0);
    hsl_to_rgba(h, s / 100.0, l / 100.0)
}

fn parse_hex(s: &str) -> FizzResult<Rgba> {
    fn hex_byte(pair: &str) -> FizzResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| FizzError::color(format!("invalid hex byte \"{pair}\"")))
    }

    match s.len() {
        6 => Ok(Rgba::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(FizzError::color(
            "hex color must be #RRGGBB or #RRGGBBAA".to_owned(),
        )),
    }
}

fn parse_hsl_call(args: &str) -> FizzResult<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(FizzError::color("hsl() takes exactly 3 arguments"));
    }
    let num = |raw: &str, what: &str| -> FizzResult<f64> {
        raw.trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| FizzError::color(format!("invalid {what} \"{raw}\"")))
    };
    let h = num(parts[0], "hue")?;
    let s = num(parts[1], "saturation")?;
    let l = num(parts[2], "lightness")?;
    Ok(hsl_to_rgba(h, s / 100.0, l / 100.0))
}

/// HSL to sRGB, hue in degrees, `s`/`l` normalized to `0..1`.
fn hsl_to_rgba(h: f64, s: f64, l: f64) -> Rgba {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        let v = to_u8(l);
        return Rgba::rgb(v, v, v);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba::rgb(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn named(s: &str) -> Option<Rgba> {
    let rgb = |r, g, b| Some(Rgba::rgb(r, g, b));
    match s.to_ascii_lowercase().as_str() {
        "black" => rgb(0, 0, 0),
        "white" => rgb(255, 255, 255),
        "red" => rgb(255, 0, 0),
        "lime" => rgb(0, 255, 0),
        "blue" => rgb(0, 0, 255),
        "green" => rgb(0, 128, 0),
        "yellow" => rgb(255, 255, 0),
        "cyan" | "aqua" => rgb(0, 255, 255),
        "magenta" | "fuchsia" => rgb(255, 0, 255),
        "gray" | "grey" => rgb(128, 128, 128),
        "silver" => rgb(192, 192, 192),
        "maroon" => rgb(128, 0, 0),
        "olive" => rgb(128, 128, 0),
        "navy" => rgb(0, 0, 128),
        "teal" => rgb(0, 128, 128),
        "purple" => rgb(128, 0, 128),
        "orange" => rgb(255, 165, 0),
        "pink" => rgb(255, 192, 203),
        "brown" => rgb(165, 42, 42),
        "gold" => rgb(255, 215, 0),
        "coral" => rgb(255, 127, 80),
        "salmon" => rgb(250, 128, 114),
        "khaki" => rgb(240, 230, 140),
        "indigo" => rgb(75, 0, 130),
        "violet" => rgb(238, 130, 238),
        "orchid" => rgb(218, 112, 214),
        "plum" => rgb(221, 160, 221),
        "turquoise" => rgb(64, 224, 208),
        "tomato" => rgb(255, 99, 71),
        "crimson" => rgb(220, 20, 60),
        "chocolate" => rgb(210, 105, 30),
        "ivory" => rgb(255, 255, 240),
        "beige" => rgb(245, 245, 220),
        "lavender" => rgb(230, 230, 250),
        "skyblue" => rgb(135, 206, 235),
        "steelblue" => rgb(70, 130, 180),
        "slategray" | "slategrey" => rgb(112, 128, 144),
        "seagreen" => rgb(46, 139, 87),
        "forestgreen" => rgb(34, 139, 34),
        "transparent" => Some(Rgba::TRANSPARENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex() {
        assert_eq!(Rgba::parse("red").unwrap(), Rgba::RED);
        assert_eq!(Rgba::parse("  White ").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::RED);
        assert_eq!(
            Rgba::parse("#0000ff80").unwrap(),
            Rgba::new(0, 0, 255, 128)
        );
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("no-such-color").is_err());
    }

    #[test]
    fn non_ascii_input_is_an_error_not_a_panic() {
        // A multibyte character straddling the would-be "hsl(" prefix.
        assert!(matches!(
            Rgba::parse("abc\u{e9})"),
            Err(FizzError::Color(_))
        ));
        assert!(matches!(Rgba::parse("héllo"), Err(FizzError::Color(_))));
        assert!(matches!(
            Rgba::parse("hsl(é, 10%, 10%)"),
            Err(FizzError::Color(_))
        ));
    }

    #[test]
    fn parses_hsl_functional_form() {
        assert_eq!(Rgba::parse("hsl(0, 100%, 50%)").unwrap(), Rgba::RED);
        assert_eq!(
            Rgba::parse("hsl(120, 100%, 50%)").unwrap(),
            Rgba::rgb(0, 255, 0)
        );
        // Hue wraps modulo 360.
        assert_eq!(
            Rgba::parse("hsl(480, 100%, 50%)").unwrap(),
            Rgba::rgb(0, 255, 0)
        );
        assert!(Rgba::parse("hsl(0, 100%)").is_err());
    }

    #[test]
    fn ranged_hsl_is_seeded_and_in_range() {
        let a = hsl((0.0, 360.0), 100.0, 50.0, 7);
        let b = hsl((0.0, 360.0), 100.0, 50.0, 7);
        assert_eq!(a, b);
        let c = hsl(HslArg::Any, HslArg::Any, HslArg::Any, 8);
        let d = hsl(HslArg::Any, HslArg::Any, HslArg::Any, 9);
        // Different seeds should almost surely differ.
        assert!(c != d || a == b);
    }

    #[test]
    fn deserializes_string_array_and_object() {
        let c: Rgba = serde_json::from_value(serde_json::json!("#102030")).unwrap();
        assert_eq!(c, Rgba::rgb(16, 32, 48));
        let c: Rgba = serde_json::from_value(serde_json::json!([1, 2, 3, 4])).unwrap();
        assert_eq!(c, Rgba::new(1, 2, 3, 4));
        let c: Rgba =
            serde_json::from_value(serde_json::json!({"h": 0.0, "s": 100.0, "l": 50.0})).unwrap();
        assert_eq!(c, Rgba::RED);
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(Rgba::new(1, 2, 3, 4).hex(), "#01020304");
    }
}
