//! Rendering module
//!
//! Draw commands are tessellated on the CPU into a triangle list and drawn
//! with a single WebGPU pipeline.

pub mod pipeline;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use pipeline::RenderState;
pub use surface::{RenderSurface, VertexSurface};
pub use vertex::Vertex;
