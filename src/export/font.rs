//! Card typeface: DejaVu Sans Bold, embedded and rasterised with `ab_glyph`.
//!
//! Covers Latin (accented letters included), Greek and Cyrillic. Characters
//! outside the face, such as CJK ideographs, are drawn as its empty box.

use ab_glyph::{Font, FontRef, GlyphId, InvalidFont, PxScale, ScaleFont, point};

static DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

pub struct Typeface {
    font: FontRef<'static>,
}

impl Typeface {
    pub fn load() -> Result<Self, InvalidFont> {
        Ok(Self {
            font: FontRef::try_from_slice(DEJAVU_SANS_BOLD)?,
        })
    }

    /// Advance width of `text` at `size` px, kerning included.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Ascent to descent at `size` px.
    pub fn line_height(&self, size: f32) -> f32 {
        self.font.as_scaled(PxScale::from(size)).height()
    }

    /// Non-blank characters the face has no glyph for.
    pub fn missing(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|c| !c.is_whitespace() && self.font.glyph_id(*c).0 == 0)
            .collect()
    }

    /// Rasterise `text` with its line box's top-left at (`x`, `y`), in
    /// output pixels. `plot` receives each touched pixel and its coverage.
    pub fn draw(&self, text: &str, size: f32, x: f32, y: f32, mut plot: impl FnMut(u32, u32, f32)) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = y + scaled.ascent();
        let mut caret = x;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);

            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            outline.draw(|gx, gy, coverage| {
                let px = bounds.min.x + gx as f32;
                let py = bounds.min.y + gy as f32;
                if px >= 0.0 && py >= 0.0 {
                    plot(px as u32, py as u32, coverage);
                }
            });
        }
    }
}
