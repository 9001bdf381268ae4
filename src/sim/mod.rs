//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No GPU or platform dependencies; drawing goes through a surface trait

pub mod obstacle;
pub mod player;
pub mod projector;
pub mod world;

pub use obstacle::{Obstacle, PALETTE};
pub use player::{Motion, Player};
pub use projector::Projector;
pub use world::{Drawable, GameEvent, TickInput, World};
