use serde::{Deserialize, Serialize};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Stable identity of an element inside a [`crate::SceneRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pixel dimensions of a scene description's canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Rectangular scene region `[0, width] x [0, height]` that boundary-aware motion stays inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const EMPTY: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        fn extent(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }

        Self {
            width: extent(width),
            height: extent(height),
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    pub fn clamp(self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if !s.is_ascii() {
            return Err("hex color must be ASCII".to_owned());
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }

    /// Premultiplied channels, scaled by an extra `opacity` in `0..=1`.
    pub fn premul_with_opacity(self, opacity: f32) -> [u8; 4] {
        let op = opacity.clamp(0.0, 1.0);
        let a = (f32::from(self.a) * op).round().clamp(0.0, 255.0) as u16;
        fn premul(c: u8, a: u16) -> u8 {
            (((u16::from(c) * a) + 127) / 255) as u8
        }
        [
            premul(self.r, a),
            premul(self.g, a),
            premul(self.b, a),
            a as u8,
        ]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Returns `v` when finite, otherwise `fallback`.
pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

pub(crate) fn point_is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_normalize_degenerate_extents() {
        let b = Bounds::new(-5.0, f64::NAN);
        assert_eq!(b, Bounds::EMPTY);
        assert_eq!(b.clamp(Point::new(3.0, -2.0)), Point::ZERO);
    }

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds::new(800.0, 600.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(800.0, 600.0)));
        assert!(!b.contains(Point::new(800.1, 10.0)));
        assert!(!b.contains(Point::new(10.0, -0.1)));
    }

    #[test]
    fn color_parses_all_representations() {
        let hex: Rgba8 = serde_json::from_str("\"#ff8000\"").unwrap();
        assert_eq!(hex, Rgba8::rgb(255, 128, 0));

        let hex_a: Rgba8 = serde_json::from_str("\"FF800040\"").unwrap();
        assert_eq!(hex_a, Rgba8::rgba(255, 128, 0, 64));

        let obj: Rgba8 = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(obj, Rgba8::rgb(1, 2, 3));

        let arr: Rgba8 = serde_json::from_str("[1,2,3,4]").unwrap();
        assert_eq!(arr, Rgba8::rgba(1, 2, 3, 4));

        assert!(serde_json::from_str::<Rgba8>("\"#12345\"").is_err());
        assert!(serde_json::from_str::<Rgba8>("[1,2]").is_err());
    }

    #[test]
    fn premul_scales_by_alpha_and_opacity() {
        assert_eq!(Rgba8::WHITE.premul_with_opacity(1.0), [255, 255, 255, 255]);
        assert_eq!(Rgba8::WHITE.premul_with_opacity(0.0), [0, 0, 0, 0]);
        let half = Rgba8::rgb(200, 100, 0).premul_with_opacity(0.5);
        assert_eq!(half[3], 128);
        assert_eq!(half[0], 100);
    }
}
