//! Label font: a TrueType face when one can be loaded, otherwise the built-in
//! 10x20 bitmap font from embedded-graphics.

use crate::canvas::Canvas;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub enum LabelFont {
    /// Anti-aliased TrueType glyphs at `scale`
    TrueType { font: FontVec, scale: PxScale },
    /// embedded-graphics FONT_10X20
    Builtin,
}

impl LabelFont {
    /// Try the TrueType file at `path`; fall back to [`LabelFont::Builtin`] if it is
    /// missing, unreadable or not a font.
    pub fn load_or_builtin<P: AsRef<Path>>(path: P, size: f32) -> Self {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Label font {} unavailable ({}), using built-in font", path.display(), e);
                return LabelFont::Builtin;
            }
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                debug!("Loaded label font {} at {}px", path.display(), size);
                LabelFont::TrueType {
                    font,
                    scale: PxScale::from(size),
                }
            }
            Err(e) => {
                warn!("Label font {} is invalid ({}), using built-in font", path.display(), e);
                LabelFont::Builtin
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin)
    }

    /// Draw `text` with its top-left corner at `top_left`.
    pub fn draw(&self, canvas: &mut Canvas, top_left: Point, text: &str, color: Rgb888) {
        match self {
            LabelFont::TrueType { font, scale } => {
                draw_outlined(canvas, font, *scale, top_left, text, color)
            }
            LabelFont::Builtin => {
                let style = MonoTextStyle::new(&FONT_10X20, color);
                Text::with_baseline(text, top_left, style, Baseline::Top)
                    .draw(canvas)
                    .ok();
            }
        }
    }
}

fn draw_outlined(
    canvas: &mut Canvas,
    font: &FontVec,
    scale: PxScale,
    top_left: Point,
    text: &str,
    color: Rgb888,
) {
    let scaled = font.as_scaled(scale);
    let mut caret = point(top_left.x as f32, top_left.y as f32 + scaled.ascent());
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue; // whitespace
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            if alpha > 0 {
                let p = Point::new(
                    bounds.min.x as i32 + x as i32,
                    bounds.min.y as i32 + y as i32,
                );
                canvas.blend_pixel(p, color, alpha);
            }
        });
    }
}
