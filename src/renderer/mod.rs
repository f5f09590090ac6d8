//! WebGPU rendering module
//!
//! Thin by construction: the scene is tessellated on the CPU from a
//! `FrameState` and drawn as one colored triangle list.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, pixel_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
