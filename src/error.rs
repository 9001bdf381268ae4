//! Error types for the fallible edges of the game
//!
//! The simulation itself never fails; these cover parsing and validation.

use thiserror::Error;

/// Hex colour parsing failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("colour must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 6 hex digits, got {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in {0:?}")]
    BadDigits(String),
}

/// Rejected obstacle extents
#[derive(Debug, Error, PartialEq)]
pub enum ObstacleError {
    #[error("obstacle {axis} must be positive and finite (got {value})")]
    BadExtent { axis: &'static str, value: f32 },
}

/// Settings / tuning load failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// GPU setup failure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface not supported by the adapter")]
    UnsupportedSurface,
}
