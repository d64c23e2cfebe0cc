//! CPU preview rasterizer.
//!
//! Paints a [`DrawList`] into an RGBA image. Text is approximated by a glyph box per
//! character; this is a debugging aid, not a text renderer.

use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::{Bounds, Point, Rgba8},
    foundation::error::{SceneError, SceneResult},
    render::{
        FrameView, SceneRenderer,
        plan::{DrawList, DrawOp},
    },
};

/// Glyph box width relative to font size.
const GLYPH_ADVANCE: f64 = 0.6;
const GLYPH_HEIGHT: f64 = 0.7;

pub type PremulRgba8 = [u8; 4];

/// Source-over blend of premultiplied pixels with an extra opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Renderer that rasterizes each frame into an owned image (premultiplied RGBA8).
pub struct PreviewRenderer {
    image: RgbaImage,
    clear: Rgba8,
}

impl PreviewRenderer {
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::render("preview size must be > 0"));
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
            clear: Rgba8::rgb(18, 20, 28),
        })
    }

    pub fn with_clear(mut self, clear: Rgba8) -> Self {
        self.clear = clear;
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn paint(&mut self, list: &DrawList) {
        let clear = Rgba(self.clear.premul_with_opacity(1.0));
        for px in self.image.pixels_mut() {
            *px = clear;
        }

        for op in &list.ops {
            match op {
                DrawOp::Glow {
                    center,
                    radius,
                    color,
                    intensity,
                    ..
                } => self.fill_disc(*center, *radius, *color, *intensity * 0.5, true),
                DrawOp::FillCircle {
                    center,
                    radius,
                    color,
                    opacity,
                    ..
                } => self.fill_disc(*center, *radius, *color, *opacity, false),
                DrawOp::Text {
                    anchor,
                    content,
                    font_size,
                    color,
                    ..
                } => self.fill_glyph_boxes(*anchor, content, *font_size, *color),
            }
        }
    }

    /// Pixel range covering `[lo, hi)` on an axis of `len` pixels, clipped to the image.
    fn clip_span(lo: f64, hi: f64, len: u32) -> std::ops::Range<u32> {
        let max = f64::from(len);
        let start = lo.floor().clamp(0.0, max) as u32;
        let end = hi.ceil().clamp(0.0, max) as u32;
        start..end.max(start)
    }

    fn blend(&mut self, x: u32, y: u32, src: PremulRgba8, opacity: f32) {
        let px = self.image.get_pixel_mut(x, y);
        px.0 = over(px.0, src, opacity);
    }

    fn fill_disc(&mut self, c: Point, r: f64, color: Rgba8, opacity: f32, soft: bool) {
        if r <= 0.0 {
            return;
        }
        let src = color.premul_with_opacity(1.0);
        let xs = Self::clip_span(c.x - r, c.x + r, self.image.width());
        let ys = Self::clip_span(c.y - r, c.y + r, self.image.height());
        for y in ys {
            for x in xs.clone() {
                let d = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5).distance(c);
                if d > r {
                    continue;
                }
                let falloff = if soft { (1.0 - d / r) as f32 } else { 1.0 };
                self.blend(x, y, src, opacity * falloff);
            }
        }
    }

    fn fill_glyph_boxes(&mut self, anchor: Point, content: &str, font_size: f64, color: Rgba8) {
        let n = content.chars().count();
        if n == 0 || font_size <= 0.0 {
            return;
        }
        let advance = font_size * GLYPH_ADVANCE;
        let h = font_size * GLYPH_HEIGHT;
        let left = anchor.x - advance * n as f64 * 0.5;
        let top = anchor.y - h * 0.5;
        let src = color.premul_with_opacity(1.0);
        let (w, img_h) = (self.image.width(), self.image.height());
        let ys = Self::clip_span(top, top + h, img_h);

        for (i, ch) in content.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let gx0 = left + advance * i as f64 + advance * 0.1;
            let xs = Self::clip_span(gx0, gx0 + advance * 0.8, w);
            if xs.is_empty() {
                continue;
            }
            for y in ys.clone() {
                for x in xs.clone() {
                    self.blend(x, y, src, 1.0);
                }
            }
        }
    }
}

impl SceneRenderer for PreviewRenderer {
    fn render(&mut self, frame: &FrameView<'_>) -> SceneResult<()> {
        let want = Bounds::new(
            f64::from(self.image.width()),
            f64::from(self.image.height()),
        );
        if want != frame.bounds {
            return Err(SceneError::render(format!(
                "preview is {}x{} but scene bounds are {}x{}",
                want.width, want.height, frame.bounds.width, frame.bounds.height
            )));
        }
        let list = DrawList::from_frame(frame);
        self.paint(&list);
        Ok(())
    }
}
