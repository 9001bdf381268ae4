//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON override can rebalance a run
//! without touching the simulation. Units are world units and ticks.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on live obstacles
pub const MAX_OBSTACLE_COUNT: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/tick²)
    pub gravity: f32,
    /// Upward velocity applied by a jump (units/tick)
    pub jump_force: f32,
    /// Forward motion per tick
    pub speed: f32,
    pub player_radius: f32,

    pub obstacle_width: Range<f32>,
    pub obstacle_height: Range<f32>,
    pub obstacle_depth: Range<f32>,
    /// Obstacles sit at +lane_offset or -lane_offset on x
    pub lane_offset: f32,

    /// Minimum z gap between consecutive obstacles
    pub min_obstacle_distance: f32,
    /// Extra random gap added on top of the minimum, in [0, spawn_jitter)
    pub spawn_jitter: f32,
    /// `last_obstacle_z` at the start of a run
    pub first_obstacle_z: f32,
    /// Obstacles kept alive ahead of the player
    pub obstacle_count: usize,
    /// Obstacles this far behind the player are retired
    pub retire_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_force: 12.0,
            speed: 3.0,
            player_radius: 20.0,

            obstacle_width: 40.0..80.0,
            obstacle_height: 30.0..100.0,
            obstacle_depth: 40.0..80.0,
            lane_offset: 50.0,

            min_obstacle_distance: 200.0,
            spawn_jitter: 200.0,
            first_obstacle_z: 300.0,
            obstacle_count: 5,
            retire_distance: 300.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a tuning JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("speed", self.speed),
            ("player_radius", self.player_radius),
            ("min_obstacle_distance", self.min_obstacle_distance),
            ("retire_distance", self.retire_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }

        for (field, value) in [
            ("lane_offset", self.lane_offset),
            ("spawn_jitter", self.spawn_jitter),
            ("first_obstacle_z", self.first_obstacle_z),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must be non-negative, got {}", value)));
            }
        }

        for (field, range) in [
            ("obstacle_width", &self.obstacle_width),
            ("obstacle_height", &self.obstacle_height),
            ("obstacle_depth", &self.obstacle_depth),
        ] {
            if !(range.start.is_finite() && range.end.is_finite()) {
                return Err(invalid(field, format!("bounds must be finite, got {:?}", range)));
            }
            if range.start <= 0.0 {
                return Err(invalid(field, format!("must start above 0, got {:?}", range)));
            }
            if range.is_empty() {
                return Err(invalid(field, format!("empty range {:?}", range)));
            }
        }

        if !(1..=MAX_OBSTACLE_COUNT).contains(&self.obstacle_count) {
            return Err(invalid(
                "obstacle_count",
                format!("must be 1..={}, got {}", MAX_OBSTACLE_COUNT, self.obstacle_count),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
