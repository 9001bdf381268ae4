//! Box obstacles sitting in one of two lanes

use glam::{Vec2, Vec3};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::projector::Projector;
use crate::color::Color;
use crate::draw::DrawCommand;
use crate::error::ObstacleError;
use crate::tuning::Tuning;

/// Obstacle base colours
pub const PALETTE: [Color; 6] = [
    Color::rgb(0xFF, 0x57, 0x33),
    Color::rgb(0x33, 0xFF, 0x57),
    Color::rgb(0x33, 0x57, 0xFF),
    Color::rgb(0xF3, 0xFF, 0x33),
    Color::rgb(0xFF, 0x33, 0xF3),
    Color::rgb(0x33, 0xFF, 0xF3),
];

/// Side face shading (percent darker than the top)
const LEFT_SHADE: u32 = 20;
const RIGHT_SHADE: u32 = 40;

/// An axis-aligned box resting on the ground, centred on (x, z)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub x: f32,
    pub z: f32,
    pub color: Color,
    /// Set once the player clears the far edge; never reset
    pub passed: bool,
}

impl Obstacle {
    /// Random extents, lane and colour at forward position `z`
    pub fn spawn<R: Rng>(z: f32, tuning: &Tuning, rng: &mut R) -> Self {
        let width = rng.random_range(tuning.obstacle_width.clone());
        let height = rng.random_range(tuning.obstacle_height.clone());
        let depth = rng.random_range(tuning.obstacle_depth.clone());
        let x = if rng.random_bool(0.5) {
            tuning.lane_offset
        } else {
            -tuning.lane_offset
        };
        let color = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);

        Self {
            width,
            height,
            depth,
            x,
            z,
            color,
            passed: false,
        }
    }

    /// Explicit placement; extents must be positive and finite
    pub fn with_extents(
        x: f32,
        z: f32,
        width: f32,
        height: f32,
        depth: f32,
        color: Color,
    ) -> Result<Self, ObstacleError> {
        for (axis, value) in [("width", width), ("height", height), ("depth", depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ObstacleError::BadExtent { axis, value });
            }
        }
        Ok(Self {
            width,
            height,
            depth,
            x,
            z,
            color,
            passed: false,
        })
    }

    /// Far edge along the forward axis
    pub fn far_z(&self) -> f32 {
        self.z + self.depth / 2.0
    }

    /// Top, left and right faces, each filled and outlined
    pub fn draw_commands(&self, projector: &Projector, viewport: Vec2, out: &mut Vec<DrawCommand>) {
        let (hw, hd) = (self.width / 2.0, self.depth / 2.0);
        let corner = |dx: f32, y: f32, dz: f32| {
            projector.project(Vec3::new(self.x + dx, y, self.z + dz), viewport)
        };

        let front_bottom_left = corner(-hw, 0.0, -hd);
        let front_bottom_right = corner(hw, 0.0, -hd);
        let front_top_left = corner(-hw, self.height, -hd);
        let front_top_right = corner(hw, self.height, -hd);
        let back_bottom_left = corner(-hw, 0.0, hd);
        let back_bottom_right = corner(hw, 0.0, hd);
        let back_top_left = corner(-hw, self.height, hd);
        let back_top_right = corner(hw, self.height, hd);

        let faces = [
            (
                [front_top_left, front_top_right, back_top_right, back_top_left],
                self.color,
            ),
            (
                [front_bottom_left, front_top_left, back_top_left, back_bottom_left],
                self.color.darken(LEFT_SHADE),
            ),
            (
                [front_bottom_right, front_top_right, back_top_right, back_bottom_right],
                self.color.darken(RIGHT_SHADE),
            ),
        ];

        for (points, fill) in faces {
            out.push(DrawCommand::Polygon {
                points: points.to_vec(),
                fill,
                stroke: Color::BLACK,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rejects_bad_extents() {
        let c = PALETTE[0];
        assert_eq!(
            Obstacle::with_extents(50.0, 0.0, 0.0, 10.0, 10.0, c).unwrap_err(),
            ObstacleError::BadExtent {
                axis: "width",
                value: 0.0
            }
        );
        assert!(Obstacle::with_extents(50.0, 0.0, 10.0, -1.0, 10.0, c).is_err());
        assert!(Obstacle::with_extents(50.0, 0.0, 10.0, 10.0, f32::NAN, c).is_err());
        assert!(Obstacle::with_extents(50.0, 0.0, 10.0, 10.0, 10.0, c).is_ok());
    }

    #[test]
    fn test_spawn_is_seed_deterministic() {
        let tuning = Tuning::default();
        let a = Obstacle::spawn(500.0, &tuning, &mut Pcg32::seed_from_u64(7));
        let b = Obstacle::spawn(500.0, &tuning, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a.width, b.width);
        assert_eq!(a.height, b.height);
        assert_eq!(a.depth, b.depth);
        assert_eq!(a.x, b.x);
        assert_eq!(a.color, b.color);
        assert_eq!(a.z, 500.0);
        assert!(!a.passed);
    }

    #[test]
    fn test_both_lanes_and_palette_used() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let spawned: Vec<_> = (0..200)
            .map(|_| Obstacle::spawn(0.0, &tuning, &mut rng))
            .collect();
        assert!(spawned.iter().any(|o| o.x == 50.0));
        assert!(spawned.iter().any(|o| o.x == -50.0));
        for color in PALETTE {
            assert!(spawned.iter().any(|o| o.color == color));
        }
    }

    #[test]
    fn test_faces() {
        let block = Obstacle::with_extents(50.0, 300.0, 40.0, 60.0, 40.0, PALETTE[0]).unwrap();
        let mut out = Vec::new();
        block.draw_commands(&Projector::default(), Vec2::new(800.0, 600.0), &mut out);
        assert_eq!(out.len(), 3);

        let fills: Vec<String> = out
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Polygon { points, fill, stroke } => {
                    assert_eq!(points.len(), 4);
                    assert_eq!(*stroke, Color::BLACK);
                    fill.to_hex()
                }
                other => panic!("expected polygon, got {:?}", other),
            })
            .collect();
        assert_eq!(fills, ["#ff5733", "#cc2400", "#990000"]);

        // Top face sits `height` pixels above the ground footprint
        if let DrawCommand::Polygon { points, .. } = &out[0] {
            let ground =
                Projector::default().project(Vec3::new(30.0, 0.0, 280.0), Vec2::new(800.0, 600.0));
            assert!((points[0].x - ground.x).abs() < 1e-3);
            assert!((ground.y - points[0].y - 60.0).abs() < 1e-3);
        }
    }

    proptest! {
        #[test]
        fn spawned_extents_in_range(seed in any::<u64>(), z in 0.0f32..1.0e6) {
            let tuning = Tuning::default();
            let o = Obstacle::spawn(z, &tuning, &mut Pcg32::seed_from_u64(seed));
            prop_assert!((40.0..80.0).contains(&o.width));
            prop_assert!((30.0..100.0).contains(&o.height));
            prop_assert!((40.0..80.0).contains(&o.depth));
            prop_assert!(o.x == 50.0 || o.x == -50.0);
            prop_assert!(PALETTE.contains(&o.color));
        }
    }
}
