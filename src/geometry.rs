//! # Scene Geometry
//!
//! Pure computation of where everything goes for a single phase fraction. Nothing
//! here touches pixels; [`crate::renderer`] turns a [`SceneGeometry`] into a picture.
//!
//! The layout is stylized rather than astronomical:
//! - The earth sits at the canvas center, the sun at `sun_angle_radians` from it.
//! - The moon rides a circular orbit at angle `phase × 2π`.
//! - The observer stands on the earth's rim facing the moon (same angle).

use crate::config::SceneConfig;
use crate::lunar::PhaseName;
use core::f32::consts::TAU;
use embedded_graphics::prelude::Point;

/// A position in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Pos { x, y }
    }

    /// Point at `radius` from `self` in direction `angle`.
    pub fn offset(self, radius: f32, angle: f32) -> Pos {
        Pos::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    /// Direction from `self` toward `other`.
    pub fn angle_to(self, other: Pos) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Nearest pixel.
    pub fn to_point(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

/// Everything needed to draw one phase diagram.
#[derive(Debug, Clone)]
pub struct SceneGeometry {
    pub phase: f32,
    pub name: PhaseName,
    pub width: u32,
    pub height: u32,
    /// Earth center, also the orbit center
    pub center: Pos,
    pub orbit_radius: f32,
    pub moon_angle: f32,
    pub moon: Pos,
    pub moon_radius: f32,
    pub sun: Pos,
    pub sun_radius: f32,
    pub glow_radius: f32,
    pub earth_radius: f32,
    pub observer: Pos,
    pub observer_radius: f32,
    /// End points of the rays; every ray starts at `sun`
    pub rays: Vec<Pos>,
    /// Outer corners of the light cone, at the edges of the ray spread
    pub cone: [Pos; 2],
    /// `cos(sun_angle − moon_angle)`, in [-1, 1]
    pub shadow_amount: f32,
    /// Half-width of the shadow ellipse drawn over the moon
    pub shadow_width: f32,
}

impl SceneGeometry {
    /// Lay out the scene for `phase`. Any finite fraction is accepted; angles wrap.
    pub fn compute(phase: f32, scene: &SceneConfig) -> Self {
        let scale = scene.scale_unit;
        let center = Pos::new(
            (scene.canvas_width / 2) as f32,
            (scene.canvas_height / 2) as f32,
        );

        let orbit_radius = scale * scene.orbit_radius_scale;
        let moon_angle = phase * TAU;
        let moon = center.offset(orbit_radius, moon_angle);
        let moon_radius = scale * scene.moon_radius_scale;

        let sun = center.offset(scale * scene.sun_distance_scale, scene.sun_angle_radians);
        let sun_radius = scale * scene.sun_radius_scale;

        let earth_radius = scale * scene.earth_radius_scale;
        let observer = center.offset(earth_radius, moon_angle);

        // Rays fan symmetrically around the sun→moon direction
        let sun_to_moon = sun.angle_to(moon);
        let ray_length = scale * scene.ray_length_scale;
        let count = scene.ray_count;
        // Outer rays sit on the edges of the spread, like the cone
        let step = if count > 1 {
            scene.ray_spread_radians / (count - 1) as f32
        } else {
            0.0
        };
        let middle = count.saturating_sub(1) as f32 / 2.0;
        let rays = (0..count)
            .map(|i| sun.offset(ray_length, sun_to_moon + (i as f32 - middle) * step))
            .collect();

        let half_spread = scene.ray_spread_radians / 2.0;
        let cone = [
            sun.offset(ray_length, sun_to_moon - half_spread),
            sun.offset(ray_length, sun_to_moon + half_spread),
        ];

        // Both the "more than half lit" and "less than half lit" cases
        // shade the same ellipse, so only the magnitude matters.
        let lit_side_angle = scene.sun_angle_radians - moon_angle;
        let shadow_amount = lit_side_angle.cos();
        let shadow_width = shadow_amount.abs() * moon_radius;

        SceneGeometry {
            phase,
            name: PhaseName::from_fraction(phase),
            width: scene.canvas_width,
            height: scene.canvas_height,
            center,
            orbit_radius,
            moon_angle,
            moon,
            moon_radius,
            sun,
            sun_radius,
            glow_radius: sun_radius * scene.sun_glow_factor,
            earth_radius,
            observer,
            observer_radius: scale * scene.observer_radius_scale,
            rays,
            cone,
            shadow_amount,
            shadow_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn scene(phase: f32) -> SceneGeometry {
        SceneGeometry::compute(phase, &SceneConfig::default())
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_fixed_layout() {
        let geo = scene(0.3);
        assert_eq!(geo.center, Pos::new(400.0, 300.0));
        assert_close(geo.orbit_radius, 200.0);
        assert_close(geo.sun.x, 80.0);
        assert_close(geo.sun.y, 300.0);
        assert_close(geo.sun_radius, 64.0);
        assert_close(geo.glow_radius, 89.6);
        assert_close(geo.earth_radius, 48.0);
        assert_close(geo.moon_radius, 32.0);
        assert_close(geo.observer_radius, 8.0);
    }

    #[test]
    fn test_moon_position_first_quarter() {
        let geo = scene(0.25);
        assert_close(geo.moon.x, 400.0);
        assert_close(geo.moon.y, 300.0 + 200.0);
        assert_eq!(geo.name, PhaseName::FirstQuarter);
    }

    #[test]
    fn test_observer_faces_moon() {
        let geo = scene(0.125);
        assert_close(geo.center.angle_to(geo.observer), geo.moon_angle);
        assert_close(geo.center.angle_to(geo.moon), geo.moon_angle);
        let dx = geo.observer.x - geo.center.x;
        let dy = geo.observer.y - geo.center.y;
        assert_close((dx * dx + dy * dy).sqrt(), geo.earth_radius);
    }

    #[test]
    fn test_new_moon_shadow_covers_disc() {
        let geo = scene(0.0);
        assert_close(geo.shadow_amount, -1.0);
        assert_close(geo.shadow_width, geo.moon_radius);
    }

    #[test]
    fn test_full_moon_shadow_matches_new_moon() {
        // Only the magnitude of the shadow term is used, so full moon is shaded
        // exactly like new moon.
        let geo = scene(0.5);
        assert_close(geo.shadow_amount, 1.0);
        assert_close(geo.shadow_width, geo.moon_radius);
    }

    #[test]
    fn test_quarter_moons_have_no_shadow() {
        assert_close(scene(0.25).shadow_width, 0.0);
        assert_close(scene(0.75).shadow_width, 0.0);
    }

    #[test]
    fn test_rays_fan_around_moon_direction() {
        let geo = scene(0.0);
        assert_eq!(geo.rays.len(), 5);

        // Sun and moon are on the same horizontal line at new moon
        let middle = geo.rays[2];
        assert_close(middle.y, geo.sun.y);
        assert_close(middle.x, geo.sun.x + 480.0);

        let first = geo.sun.angle_to(geo.rays[0]);
        let last = geo.sun.angle_to(geo.rays[4]);
        assert_close(first, -last);
        assert_close(last - first, core::f32::consts::PI / 8.0);

        // Evenly spaced
        let second = geo.sun.angle_to(geo.rays[1]);
        assert_close(second - first, core::f32::consts::PI / 32.0);
    }

    #[test]
    fn test_cone_spans_full_spread() {
        let geo = scene(0.0);
        let spread = geo.sun.angle_to(geo.cone[1]) - geo.sun.angle_to(geo.cone[0]);
        assert_close(spread, core::f32::consts::PI / 8.0);

        // Cone edges follow the outermost rays
        assert_close(geo.cone[0].x, geo.rays[0].x);
        assert_close(geo.cone[0].y, geo.rays[0].y);
        assert_close(geo.cone[1].x, geo.rays[4].x);
        assert_close(geo.cone[1].y, geo.rays[4].y);
    }

    #[test]
    fn test_single_ray_points_at_moon() {
        let config = SceneConfig {
            ray_count: 1,
            ..SceneConfig::default()
        };
        let geo = SceneGeometry::compute(0.0, &config);
        assert_eq!(geo.rays.len(), 1);
        assert_close(geo.rays[0].y, geo.sun.y);
    }

    #[test]
    fn test_phase_wraps() {
        let a = scene(0.2);
        let b = scene(1.2);
        assert_close(a.moon.x, b.moon.x);
        assert_close(a.moon.y, b.moon.y);
        assert_eq!(a.name, b.name);
    }
}
