//! The runner: a sphere that always moves forward and can jump

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::projector::Projector;
use crate::color::Color;
use crate::draw::DrawCommand;
use crate::tuning::Tuning;

pub const PLAYER_COLOR: Color = Color::rgb(0x33, 0xFF, 0x57);

/// Vertical motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Lateral position
    pub x: f32,
    /// Height above the ground (never negative)
    pub y: f32,
    /// Forward position (only ever increases)
    pub z: f32,
    pub radius: f32,
    /// Upward velocity (units/tick)
    pub velocity_y: f32,
    pub is_jumping: bool,
    pub color: Color,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            radius,
            velocity_y: 0.0,
            is_jumping: false,
            color: PLAYER_COLOR,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn motion(&self) -> Motion {
        if self.is_jumping || self.y > 0.0 {
            Motion::Airborne
        } else {
            Motion::Grounded
        }
    }

    /// Advance one tick: gravity, ground clamp, forward motion
    pub fn update(&mut self, tuning: &Tuning) {
        self.velocity_y -= tuning.gravity;
        self.y += self.velocity_y;

        if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }

        self.z += tuning.speed;
    }

    /// Start a jump; ignored while airborne
    pub fn jump(&mut self, tuning: &Tuning) {
        if !self.is_jumping {
            self.velocity_y = tuning.jump_force;
            self.is_jumping = true;
        }
    }

    /// Strictly higher than the obstacle top
    pub fn is_above(&self, obstacle: &Obstacle) -> bool {
        self.y > obstacle.height
    }

    pub fn collides_with(&self, obstacle: &Obstacle) -> bool {
        let overlaps_z = (self.z - obstacle.z).abs() < obstacle.depth / 2.0 + self.radius;
        let overlaps_x = (self.x - obstacle.x).abs() < obstacle.width / 2.0 + self.radius;
        overlaps_z && overlaps_x && self.y < obstacle.height && !self.is_above(obstacle)
    }

    /// Ground shadow then the ball itself
    pub fn draw_commands(
        &self,
        projector: &Projector,
        viewport: Vec2,
        shadow: bool,
        out: &mut Vec<DrawCommand>,
    ) {
        let pos = projector.project(self.position(), viewport);

        if shadow {
            let ground = projector.project(Vec3::new(self.x, 0.0, self.z), viewport);
            out.push(DrawCommand::Ellipse {
                center: Vec2::new(pos.x, ground.y),
                radii: Vec2::new(self.radius * 0.8, self.radius * 0.4),
                color: Color::BLACK.with_alpha(0.3),
            });
        }

        out.push(DrawCommand::Circle {
            center: pos,
            radius: self.radius,
            color: self.color,
        });
    }
}
