//! Isometric projection from world space to screen space
//!
//! World axes: x is lateral, y is height, z is forward. Screen origin is the
//! top-left corner of the viewport; the world origin maps to its centre.

use glam::{Vec2, Vec3};

use crate::consts::ISO_ANGLE;

/// Fixed-angle parallel projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    /// Projection angle (radians)
    pub angle: f32,
    pub scale: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            angle: ISO_ANGLE,
            scale: 1.0,
        }
    }
}

impl Projector {
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Project a world point into a viewport of the given pixel size
    #[inline]
    pub fn project(&self, p: Vec3, viewport: Vec2) -> Vec2 {
        let iso_x = (p.x - p.z) * self.angle.cos() * self.scale;
        let iso_y = (p.x + p.z) * self.angle.sin() * self.scale - p.y * self.scale;
        Vec2::new(iso_x, iso_y) + viewport * 0.5
    }
}
