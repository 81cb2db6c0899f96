/// Output frame buffer.
pub mod frame;
/// Layer model and the per-worker compositor.
pub mod layer;
/// Frame-range rendering and full story runs.
pub mod pipeline;
/// Gradients and anti-aliased vector shapes.
pub mod shape;
/// Text shaping, measurement and drawing.
pub mod text;
