//! # Moon Phase Diagrams
//!
//! Renders static reference pictures of the sun, earth and moon for each named
//! lunar phase. Each picture shows where the moon sits on its orbit, the sunlight
//! falling on it, an observer on the earth looking at it, and how much of its
//! disc is shaded.
//!
//! ## Pipeline
//! 1. **Config**: scene constants from [`config::Config`] (defaults, or `moon-phase.toml`)
//! 2. **Geometry**: [`geometry::SceneGeometry`] lays out one phase fraction
//! 3. **Drawing**: [`renderer::PhaseRenderer`] draws embedded-graphics primitives
//!    onto a [`canvas::Canvas`]
//! 4. **Output**: the canvas is PNG-encoded and written to disk
//!
//! The geometry is stylized: the moon's shadow depends only on the angle between
//! the sun direction and the moon's orbital position, and the observer always
//! faces the moon.
//!
//! ## Example
//! ```
//! use moon_phase_lib::{lunar::PhaseName, geometry::SceneGeometry, config::SceneConfig};
//!
//! let geo = SceneGeometry::compute(0.5, &SceneConfig::default());
//! assert_eq!(geo.name, PhaseName::FullMoon);
//! assert_eq!((geo.width, geo.height), (800, 600));
//! ```

pub mod canvas;
pub mod config;
pub mod font;
pub mod geometry;
pub mod lunar;
pub mod renderer;

pub use lunar::PhaseName;
pub use renderer::{render_phase, PhaseRenderer, RenderError};
