//! Draw commands emitted by simulation entities
//!
//! Everything here is in projected screen space (pixels). Entities produce
//! commands; a [`crate::renderer::RenderSurface`] consumes them.

use glam::Vec2;

use crate::color::Color;

/// A single 2D drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned filled ellipse
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled convex polygon with an outline
    Polygon {
        points: Vec<Vec2>,
        fill: Color,
        stroke: Color,
    },
    /// Line segment
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
}
