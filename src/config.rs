//! # Scene Configuration
//!
//! All fixed scene constants (canvas size, scale, radii, colors, font) live here
//! rather than inline in the renderer. Defaults reproduce the reference diagrams;
//! an optional `moon-phase.toml` in the working directory can override any field.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file looked up by [`Config::load`]
pub const CONFIG_FILE: &str = "moon-phase.toml";

/// Application configuration loaded from moon-phase.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Scene layout and geometry
    pub scene: SceneConfig,
    /// Fill and stroke colors
    pub palette: Palette,
    /// Label font settings
    pub labels: LabelConfig,
}

/// Output canvas width; not settable from a config file
pub const CANVAS_WIDTH: u32 = 800;
/// Output canvas height; not settable from a config file
pub const CANVAS_HEIGHT: u32 = 600;

/// Canvas layout and body sizes. Radii and distances are multiples of `scale_unit`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas width in pixels
    #[serde(skip, default = "canvas_width")]
    pub canvas_width: u32,
    /// Canvas height in pixels
    #[serde(skip, default = "canvas_height")]
    pub canvas_height: u32,
    /// Base length every other size is expressed in
    pub scale_unit: f32,
    /// Direction of the sun as seen from the earth (π = left of center)
    pub sun_angle_radians: f32,
    /// Earth-to-sun distance
    pub sun_distance_scale: f32,
    pub sun_radius_scale: f32,
    /// Glow radius as a multiple of the sun radius
    pub sun_glow_factor: f32,
    pub orbit_radius_scale: f32,
    pub earth_radius_scale: f32,
    pub moon_radius_scale: f32,
    pub observer_radius_scale: f32,
    /// Number of rays fanned from the sun toward the moon
    pub ray_count: u32,
    /// Total angle covered by the ray fan
    pub ray_spread_radians: f32,
    pub ray_length_scale: f32,
    /// Fill the ray fan with a translucent cone
    pub light_cone: bool,
}

/// Colors as RGB triples, with alpha for the translucent elements
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Palette {
    pub background: [u8; 3],
    pub orbit: [u8; 3],
    pub orbit_alpha: u8,
    pub sun: [u8; 3],
    pub sun_glow_alpha: u8,
    pub light: [u8; 3],
    pub ray_alpha: u8,
    pub cone_alpha: u8,
    /// Moon-to-observer illumination path
    pub illumination_alpha: u8,
    pub earth: [u8; 3],
    pub observer: [u8; 3],
    pub moon: [u8; 3],
    pub moon_shadow: [u8; 3],
    pub title: [u8; 3],
}

/// Label font settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelConfig {
    /// TrueType font tried first; the built-in bitmap font is used if it can't be loaded
    pub font_path: PathBuf,
    /// Font size in pixels
    pub font_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            scale_unit: 80.0,
            sun_angle_radians: PI,
            sun_distance_scale: 4.0,
            sun_radius_scale: 0.8,
            sun_glow_factor: 1.4,
            orbit_radius_scale: 2.5,
            earth_radius_scale: 0.6,
            moon_radius_scale: 0.4,
            observer_radius_scale: 0.1,
            ray_count: 5,
            ray_spread_radians: PI / 8.0,
            ray_length_scale: 6.0,
            light_cone: false,
        }
    }
}

fn canvas_width() -> u32 {
    CANVAS_WIDTH
}

fn canvas_height() -> u32 {
    CANVAS_HEIGHT
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: [10, 14, 39],
            orbit: [255, 255, 255],
            orbit_alpha: 64,
            sun: [253, 184, 19],
            sun_glow_alpha: 80,
            light: [255, 249, 196],
            ray_alpha: 60,
            cone_alpha: 32,
            illumination_alpha: 180,
            earth: [74, 144, 226],
            observer: [255, 107, 107],
            moon: [192, 192, 192],
            moon_shadow: [80, 80, 80],
            title: [255, 255, 255],
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            font_path: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            font_size: 20.0,
        }
    }
}

impl Config {
    /// Load configuration from moon-phase.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded scene configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format in {}: {}", path.display(), e);
                    warn!("Using default scene configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file at {}, using default scene configuration", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scene.canvas_width, 800);
        assert_eq!(config.scene.canvas_height, 600);
        assert_eq!(config.scene.scale_unit, 80.0);
        assert_eq!(config.scene.sun_angle_radians, PI);
        assert_eq!(config.scene.ray_count, 5);
        assert!(!config.scene.light_cone);
        assert_eq!(config.palette.background, [10, 14, 39]);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.scene.scale_unit, parsed.scene.scale_unit);
        assert_eq!(config.labels.font_path, parsed.labels.font_path);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scene]\nlight_cone = true\n\n[palette]\nmoon = [200, 200, 210]").unwrap();

        let config = Config::load_from_path(file.path());
        assert!(config.scene.light_cone);
        assert_eq!(config.palette.moon, [200, 200, 210]);
        assert_eq!(config.scene.canvas_width, 800);
        assert_eq!(config.palette.earth, [74, 144, 226]);
    }

    #[test]
    fn test_file_cannot_resize_canvas() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[scene]\ncanvas_width = 320\ncanvas_height = 200\nscale_unit = 60.0"
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.scene.canvas_width, CANVAS_WIDTH);
        assert_eq!(config.scene.canvas_height, CANVAS_HEIGHT);
        // Other scene fields still apply
        assert_eq!(config.scene.scale_unit, 60.0);

        let toml_str = toml::to_string(&config).unwrap();
        assert!(!toml_str.contains("canvas_width"));
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scene = 12").unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.scene.canvas_height, 600);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.scene.canvas_width, 800);
    }
}
