//! storyreel renders short promotional "story" videos (9:16) frame by frame.
//!
//! A story is a [`Timeline`] of scenes over normalized progress. Each frame index resolves to a
//! scene and a segment-local progress; the scene evaluates to an ordered layer list that is
//! composited onto a fresh canvas. Finished frames go to a [`FrameSink`] (PNG stills) and are
//! encoded once with `ffmpeg`.
//!
//! - Load a [`StoryConfig`]
//! - Build a [`StoryRenderer`] (or call [`run`] for the whole pipeline)
//! - Render single frames or stream a range into a [`FrameSink`]
#![forbid(unsafe_code)]

/// Easing and interpolation.
pub mod animation;
/// Source images and fonts.
pub mod assets;
/// JSON configuration.
pub mod config;
/// Pixel-level compositing and blur.
pub mod effects;
/// Frame sinks and `ffmpeg` encoding.
pub mod encode;
mod foundation;
/// Frames, layers, text and the render pipeline.
pub mod render;
/// Scene evaluators and storyboards.
pub mod scenes;
/// Progress-to-segment resolution.
pub mod timeline;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::assets::font::{FontBook, FontPaths, FontRole};
pub use crate::assets::store::{AssetKind, AssetPaths, AssetStore, SourceImage};
pub use crate::config::StoryConfig;
pub use crate::encode::ffmpeg::{EncodeJob, EncoderSettings, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::layer::{FrameWorker, Layer, LayerContent, LayerStack};
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, RunReport, StoryRenderer, run,
};
pub use crate::render::text::{TextAnchor, TextShadow, TextSpec};
pub use crate::scenes::{Scene, SceneAssets, StoryCopy, Storyboard};
pub use crate::timeline::controller::{FramePosition, Timeline};
pub use crate::timeline::segment::{ProgressRange, Segment};
