//! Render surface abstraction
//!
//! The simulation paints through [`RenderSurface`]; it never sees the GPU.
//! [`VertexSurface`] tessellates every primitive into a triangle list that the
//! WebGPU pipeline uploads as-is.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::color::Color;
use crate::draw::DrawCommand;

/// Segments used for circles and ellipses
const ROUND_SEGMENTS: u32 = 32;
/// Outline width for stroked polygons (pixels)
const STROKE_WIDTH: f32 = 1.0;

/// Anything that can accept projected 2D primitives
pub trait RenderSurface {
    /// Current viewport size in pixels
    fn viewport(&self) -> Vec2;
    fn clear(&mut self);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], fill: Color, stroke: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    /// Dispatch a draw command to the matching primitive
    fn submit(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Ellipse {
                center,
                radii,
                color,
            } => self.fill_ellipse(*center, *radii, *color),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => self.fill_circle(*center, *radius, *color),
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
            } => self.fill_polygon(points, *fill, *stroke),
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => self.line(*from, *to, *color, *width),
        }
    }
}

/// CPU-side surface that collects pixel-space triangles
#[derive(Debug, Clone, Default)]
pub struct VertexSurface {
    size: Vec2,
    vertices: Vec<Vertex>,
}

impl VertexSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            vertices: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl RenderSurface for VertexSurface {
    fn viewport(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.vertices.extend(shapes::ellipse(
            center,
            radii,
            color.to_f32_array(),
            ROUND_SEGMENTS,
        ));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices.extend(shapes::circle(
            center,
            radius,
            color.to_f32_array(),
            ROUND_SEGMENTS,
        ));
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: Color, stroke: Color) {
        self.vertices
            .extend(shapes::convex_polygon(points, fill.to_f32_array()));
        self.vertices.extend(shapes::polygon_outline(
            points,
            STROKE_WIDTH,
            stroke.to_f32_array(),
        ));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.vertices
            .extend(shapes::line(from, to, width, color.to_f32_array()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_dispatch() {
        let mut surface = VertexSurface::new(Vec2::new(640.0, 480.0));
        surface.submit(&DrawCommand::Circle {
            center: Vec2::ZERO,
            radius: 5.0,
            color: Color::WHITE,
        });
        assert_eq!(surface.vertices().len(), 96);

        surface.submit(&DrawCommand::Polygon {
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
            fill: Color::WHITE,
            stroke: Color::BLACK,
        });
        // 2 fill triangles + 4 outline quads
        assert_eq!(surface.vertices().len(), 96 + 6 + 24);

        surface.clear();
        assert!(surface.vertices().is_empty());
        assert_eq!(surface.viewport(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_stroke_is_drawn_over_fill() {
        let mut surface = VertexSurface::new(Vec2::new(100.0, 100.0));
        let tri = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        surface.fill_polygon(&tri, Color::WHITE, Color::BLACK);
        let verts = surface.vertices();
        assert_eq!(verts[0].color, [1.0; 4]);
        assert_eq!(verts[verts.len() - 1].color, [0.0, 0.0, 0.0, 1.0]);
    }
}
