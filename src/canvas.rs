//! RGB raster canvas that embedded-graphics primitives draw into.
//!
//! [`Canvas`] owns an [`image::RgbImage`] and implements [`DrawTarget`] so the usual
//! `Circle`/`Line`/`Text` primitives can be drawn on it. Translucent shapes go
//! through [`Canvas::translucent`], which blends every pixel it receives.

use crate::geometry::Pos;
use crate::renderer::RenderError;
use core::convert::Infallible;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// New canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb888) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, to_rgb(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `point`, or `None` outside the canvas.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        let (x, y) = self.index(point)?;
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        Some(Rgb888::new(r, g, b))
    }

    /// Mix `color` over the existing pixel with opacity `alpha` (255 = opaque).
    /// Points outside the canvas are ignored.
    pub fn blend_pixel(&mut self, point: Point, color: Rgb888, alpha: u8) {
        let Some((x, y)) = self.index(point) else {
            return;
        };
        let pixel = self.image.get_pixel_mut(x, y);
        if alpha == u8::MAX {
            *pixel = to_rgb(color);
            return;
        }
        let Rgb([r, g, b]) = *pixel;
        *pixel = Rgb([
            mix(r, color.r(), alpha),
            mix(g, color.g(), alpha),
            mix(b, color.b(), alpha),
        ]);
    }

    /// Fill the polygon through `vertices` at opacity `alpha`, one scanline at a
    /// time. A pixel is inside when its center is (even-odd rule, left edges
    /// inclusive, right edges exclusive). Anything outside the canvas is clipped.
    pub fn fill_polygon(&mut self, vertices: &[Pos], color: Rgb888, alpha: u8) {
        if vertices.len() < 3 {
            return;
        }
        let (min_y, max_y) = vertices
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.y), hi.max(v.y))
            });
        let top = min_y.floor().max(0.0) as i32;
        let bottom = max_y.ceil().min(self.height() as f32) as i32;
        let width = self.width() as f32;

        let mut crossings = Vec::with_capacity(vertices.len());
        for y in top..bottom {
            let scan = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in vertices.iter().enumerate() {
                let b = vertices[(i + 1) % vertices.len()];
                if (a.y <= scan) != (b.y <= scan) {
                    crossings.push(a.x + (scan - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(|l, r| l.total_cmp(r));

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i32;
                let end = (span[1] - 0.5).ceil().min(width) as i32;
                for x in start..end {
                    self.blend_pixel(Point::new(x, y), color, alpha);
                }
            }
        }
    }

    /// Draw target that blends everything drawn through it at `alpha`.
    pub fn translucent(&mut self, alpha: u8) -> Translucent<'_> {
        Translucent {
            canvas: self,
            alpha,
        }
    }

    /// PNG-encoded canvas contents.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write the canvas to `path` as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        std::fs::write(path, self.encode_png()?)?;
        Ok(())
    }

    fn index(&self, point: Point) -> Option<(u32, u32)> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.image.width() && y < self.image.height()).then_some((x, y))
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.blend_pixel(point, color, u8::MAX);
        }
        Ok(())
    }
}

/// Blending view of a [`Canvas`], see [`Canvas::translucent`].
pub struct Translucent<'a> {
    canvas: &'a mut Canvas,
    alpha: u8,
}

impl OriginDimensions for Translucent<'_> {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl DrawTarget for Translucent<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.canvas.blend_pixel(point, color, self.alpha);
        }
        Ok(())
    }
}

/// Convert a `[r, g, b]` config triple.
pub fn color(rgb: [u8; 3]) -> Rgb888 {
    Rgb888::new(rgb[0], rgb[1], rgb[2])
}

fn to_rgb(color: Rgb888) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

fn mix(under: u8, over: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((over as u32 * a + under as u32 * (255 - a) + 127) / 255) as u8
}
