//! Rendering backends for the architecture graph.

pub mod dot;
pub mod engine;
pub mod json;

pub use dot::render_dot;
pub use engine::render_image;
pub use json::render_json;
