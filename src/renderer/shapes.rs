//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

/// Colors for game elements
pub mod colors {
    use crate::renderer::Color;

    pub const SPARK: Color = [255, 255, 255, 255];
    pub const HUD_TEXT: Color = [255, 255, 255, 255];
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Diamond pointing along `angle`: long tips at `speed * 3`, short
/// shoulders at `speed * 0.5`
pub fn spark_diamond(center: Vec2, angle: f32, speed: f32) -> Vec<Vec2> {
    vec![
        center + direction(angle) * speed * 3.0,
        center + direction(angle + FRAC_PI_2) * speed * 0.5,
        center + direction(angle + PI) * speed * 3.0,
        center + direction(angle - FRAC_PI_2) * speed * 0.5,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spark_diamond_shape() {
        let pts = spark_diamond(Vec2::new(10.0, 10.0), 0.0, 2.0);
        assert_eq!(pts.len(), 4);
        assert!((pts[0] - Vec2::new(16.0, 10.0)).length() < 1e-4);
        assert!((pts[1] - Vec2::new(10.0, 11.0)).length() < 1e-4);
        assert!((pts[2] - Vec2::new(4.0, 10.0)).length() < 1e-4);
        assert!((pts[3] - Vec2::new(10.0, 9.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_speed_collapses() {
        let pts = spark_diamond(Vec2::new(3.0, 4.0), 1.2, 0.0);
        assert!(pts.iter().all(|p| (*p - Vec2::new(3.0, 4.0)).length() < 1e-6));
    }
}
