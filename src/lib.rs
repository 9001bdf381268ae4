//! Iso Runner - An isometric endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projection, physics, collisions, scoring)
//! - `draw`: Draw commands produced by the simulation
//! - `renderer`: Render surface abstraction and WebGPU pipeline
//! - `hud`: Score / game-over display fed by game events
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod color;
pub mod draw;
pub mod error;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use error::{ColorError, ConfigError, ObstacleError, RenderError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Isometric projection angle (30 degrees)
    pub const ISO_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Floor grid spacing and half-extent (world units)
    pub const GRID_SIZE: f32 = 50.0;
    pub const GRID_EXTENT: f32 = 1000.0;
}
