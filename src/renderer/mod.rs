//! WebGPU rendering module
//!
//! The scene is flattened into colored rectangles in screen space, turned
//! into triangles, and drawn by a single alpha-blended pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawRect, build_scene};
