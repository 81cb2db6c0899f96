//! JSON story configuration.
//!
//! A [`StoryConfig`] is an explicit value handed to the engine; nothing is read from globals.
//! Every field has a default that reproduces the rice tasting campaign, so a config file only
//! needs the image paths.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::animation::ease::Ease;
use crate::assets::font::FontPaths;
use crate::assets::store::AssetPaths;
use crate::encode::ffmpeg::EncoderSettings;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scenes::{StoryCopy, Storyboard};
use crate::timeline::controller::{Timeline, validate_boundaries};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryConfig {
    pub canvas: Canvas,
    pub fps: u32,
    pub duration_secs: u32,
    pub storyboard: Storyboard,
    /// Inner scene boundaries; the storyboard's defaults when absent.
    pub boundaries: Option<Vec<f64>>,
    /// Easing of zoom, slide and grow motion.
    pub easing: Ease,
    pub assets: AssetPaths,
    pub fonts: FontPaths,
    pub copy: StoryCopy,
    /// Working directory for the still sequence.
    pub frames_dir: PathBuf,
    pub output: PathBuf,
    /// Keep the still sequence after a successful encode.
    pub keep_frames: bool,
    pub encoder: EncoderSettings,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::STORY,
            fps: 30,
            duration_secs: 15,
            storyboard: Storyboard::default(),
            boundaries: None,
            easing: Ease::Linear,
            assets: AssetPaths::default(),
            fonts: FontPaths::default(),
            copy: StoryCopy::default(),
            frames_dir: PathBuf::from("story_frames"),
            output: PathBuf::from("story.mp4"),
            keep_frames: false,
            encoder: EncoderSettings::default(),
        }
    }
}

impl StoryConfig {
    /// Parse a configuration from a JSON reader. Paths are kept as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse story config JSON: {e}")))
    }

    /// Parse a configuration file; relative paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open story config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(base);
        Ok(cfg)
    }

    /// Join every relative path onto `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() && !p.as_os_str().is_empty() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.assets.background);
        if let Some(p) = self.assets.product.as_mut() {
            resolve(p);
        }
        resolve(&mut self.fonts.bold);
        resolve(&mut self.fonts.regular);
        resolve(&mut self.frames_dir);
        resolve(&mut self.output);
    }

    pub fn validate(&self) -> ReelResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p output)",
            ));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be > 0"));
        }
        if self.duration_secs == 0 {
            return Err(ReelError::validation("duration_secs must be > 0"));
        }
        if let Some(b) = &self.boundaries {
            validate_boundaries(b)?;
            let expected = self.storyboard.scenes().len() - 1;
            if b.len() != expected {
                return Err(ReelError::validation(format!(
                    "storyboard {:?} needs {expected} boundaries, got {}",
                    self.storyboard,
                    b.len()
                )));
            }
        }
        if self.assets.background.as_os_str().is_empty() {
            return Err(ReelError::validation("assets.background is required"));
        }
        if self.storyboard == Storyboard::Showcase && self.assets.product.is_none() {
            return Err(ReelError::validation(
                "the showcase storyboard requires assets.product",
            ));
        }
        if self.frames_dir.as_os_str().is_empty() {
            return Err(ReelError::validation("frames_dir must be set"));
        }
        Ok(())
    }

    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// `fps * duration_secs`.
    pub fn total_frames(&self) -> ReelResult<u64> {
        Ok(self.fps()?.frames_for_secs(self.duration_secs))
    }

    pub fn timeline(&self) -> ReelResult<Timeline> {
        self.storyboard
            .timeline(self.total_frames()?, self.boundaries.as_deref())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
