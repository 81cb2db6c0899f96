//! Frame persistence and video encoding.
//!
//! Sinks consume rendered frames in timeline order; the encoder runs once over the finished
//! still sequence.

/// `ffmpeg` invocation over a PNG sequence.
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
