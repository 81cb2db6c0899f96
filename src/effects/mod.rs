/// Separable gaussian blur on premultiplied RGBA8 buffers.
pub mod blur;
/// Premultiplied source-over blending and clipped blits.
pub mod composite;
