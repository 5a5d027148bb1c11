//! # Phase Diagram Rendering
//!
//! Draws the sun–earth–moon diagram for one phase fraction onto a [`Canvas`] and
//! writes it out as PNG. Layout comes from [`SceneGeometry`]; colors and fonts
//! come from [`Config`].
//!
//! Draw order matters because later shapes cover earlier ones:
//! 1. Background and orbit path
//! 2. Sun glow, sun, light rays (and the optional light cone)
//! 3. Earth and the observer on its rim
//! 4. Illumination path from the moon to the observer
//! 5. Moon disc, then its shadow
//! 6. Text labels

use crate::canvas::{color, Canvas};
use crate::config::Config;
use crate::font::LabelFont;
use crate::geometry::SceneGeometry;
use crate::lunar::illuminated_fraction;
use embedded_graphics::{
    prelude::*,
    primitives::{Circle, Ellipse, Line, PrimitiveStyle},
};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while encoding or writing a diagram.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Output file could not be created or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders phase diagrams with a fixed configuration and label font.
pub struct PhaseRenderer {
    config: Config,
    font: LabelFont,
}

impl PhaseRenderer {
    /// Renderer for `config`, loading the label font it names (or the built-in one).
    pub fn new(config: Config) -> Self {
        let font = LabelFont::load_or_builtin(&config.labels.font_path, config.labels.font_size);
        Self::with_font(config, font)
    }

    pub fn with_font(config: Config, font: LabelFont) -> Self {
        Self { config, font }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `phase` and write it to `output_path` as PNG.
    pub fn render<P: AsRef<Path>>(&self, phase: f32, output_path: P) -> Result<(), RenderError> {
        let output_path = output_path.as_ref();
        self.render_image(phase).save_png(output_path)?;
        info!(
            "Rendered phase {:.3} ({:.0}% lit) to {}",
            phase,
            illuminated_fraction(phase) * 100.0,
            output_path.display()
        );
        Ok(())
    }

    /// Render `phase` to PNG bytes.
    pub fn render_png(&self, phase: f32) -> Result<Vec<u8>, RenderError> {
        self.render_image(phase).encode_png()
    }

    /// Render `phase` to an in-memory canvas.
    pub fn render_image(&self, phase: f32) -> Canvas {
        let geo = SceneGeometry::compute(phase, &self.config.scene);
        debug!(
            "Phase {:.3}: moon at ({:.1}, {:.1}), shadow amount {:.3}",
            phase, geo.moon.x, geo.moon.y, geo.shadow_amount
        );

        let palette = &self.config.palette;
        let mut canvas = Canvas::new(geo.width, geo.height, color(palette.background));

        self.draw_orbit(&mut canvas, &geo);
        self.draw_sun(&mut canvas, &geo);
        self.draw_light_rays(&mut canvas, &geo);
        self.draw_earth(&mut canvas, &geo);
        self.draw_moon(&mut canvas, &geo);
        self.draw_labels(&mut canvas, &geo);

        canvas
    }

    fn draw_orbit(&self, canvas: &mut Canvas, geo: &SceneGeometry) {
        let palette = &self.config.palette;
        circle(geo.center.to_point(), geo.orbit_radius)
            .into_styled(PrimitiveStyle::with_stroke(color(palette.orbit), 1))
            .draw(&mut canvas.translucent(palette.orbit_alpha))
            .ok();
    }

    fn draw_sun(&self, canvas: &mut Canvas, geo: &SceneGeometry) {
        let palette = &self.config.palette;
        let sun = geo.sun.to_point();
        let fill = PrimitiveStyle::with_fill(color(palette.sun));

        circle(sun, geo.glow_radius)
            .into_styled(fill)
            .draw(&mut canvas.translucent(palette.sun_glow_alpha))
            .ok();
        circle(sun, geo.sun_radius).into_styled(fill).draw(canvas).ok();
    }

    fn draw_light_rays(&self, canvas: &mut Canvas, geo: &SceneGeometry) {
        let palette = &self.config.palette;
        let light = color(palette.light);
        let sun = geo.sun.to_point();

        if self.config.scene.light_cone {
            let cone = [geo.sun, geo.cone[0], geo.cone[1]];
            canvas.fill_polygon(&cone, light, palette.cone_alpha);
        }

        let stroke = PrimitiveStyle::with_stroke(light, 2);
        for end in &geo.rays {
            Line::new(sun, end.to_point())
                .into_styled(stroke)
                .draw(&mut canvas.translucent(palette.ray_alpha))
                .ok();
        }
    }

    fn draw_earth(&self, canvas: &mut Canvas, geo: &SceneGeometry) {
        let palette = &self.config.palette;
        circle(geo.center.to_point(), geo.earth_radius)
            .into_styled(PrimitiveStyle::with_fill(color(palette.earth)))
            .draw(canvas)
            .ok();
        circle(geo.observer.to_point(), geo.observer_radius)
            .into_styled(PrimitiveStyle::with_fill(color(palette.observer)))
            .draw(canvas)
            .ok();
    }

    fn draw_moon(&self, canvas: &mut Canvas, geo: &SceneGeometry) {
        let palette = &self.config.palette;
        let moon = geo.moon.to_point();

        Line::new(moon, geo.observer.to_point())
            .into_styled(PrimitiveStyle::with_stroke(color(palette.light), 2))
            .draw(&mut canvas.translucent(palette.illumination_alpha))
            .ok();

        circle(moon, geo.moon_radius)
            .into_styled(PrimitiveStyle::with_fill(color(palette.moon)))
            .draw(canvas)
            .ok();

        // Zero width at the quarters
        let shadow = Size::new(diameter(geo.shadow_width), diameter(geo.moon_radius));
        if shadow.width > 0 {
            Ellipse::with_center(moon, shadow)
                .into_styled(PrimitiveStyle::with_fill(color(palette.moon_shadow)))
                .draw(canvas)
                .ok();
        }
    }

    fn draw_labels(&self, canvas: &mut Canvas, geo: &SceneGeometry) {
        let palette = &self.config.palette;
        let center = geo.center.to_point();
        let moon = geo.moon.to_point();

        let labels = [
            (Point::new(20, 20), geo.name.label(), palette.title),
            (Point::new(20, 50), "Sun", palette.sun),
            (
                Point::new(center.x - 30, center.y + (geo.earth_radius + 30.0).round() as i32),
                "Earth",
                palette.earth,
            ),
            (
                Point::new(moon.x - 25, moon.y + (geo.moon_radius + 20.0).round() as i32),
                "Moon",
                palette.moon,
            ),
        ];
        for (top_left, text, rgb) in labels {
            self.font.draw(canvas, top_left, text, color(rgb));
        }
    }
}

impl Default for PhaseRenderer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Render `phase` with the default configuration to PNG bytes.
pub fn render_phase(phase: f32) -> Result<Vec<u8>, RenderError> {
    PhaseRenderer::default().render_png(phase)
}

fn circle(center: Point, radius: f32) -> Circle {
    Circle::with_center(center, diameter(radius))
}

fn diameter(radius: f32) -> u32 {
    (radius * 2.0).round().max(0.0) as u32
}
