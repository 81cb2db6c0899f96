use std::path::{Path, PathBuf};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// `printf`-style pattern of the still sequence, as passed to the encoder.
pub const FRAME_PATTERN: &str = "frame_%04d.png";

/// File name of frame `idx` inside a sequence directory.
pub fn frame_file_name(idx: FrameIndex) -> String {
    format!("frame_{:04}.png", idx.0)
}

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested render range. Sinks reject anything else.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// Shared push-side checks: started, ordered, correctly sized.
#[derive(Debug, Default)]
struct PushGuard {
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl PushGuard {
    fn begin(&mut self, cfg: SinkConfig) {
        self.cfg = Some(cfg);
        self.last_idx = None;
    }

    fn check(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ReelError::sink("sink received a frame before begin"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::sink(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::sink(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    guard: PushGuard,
    /// Frames in timeline order.
    pub(crate) frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.guard.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.guard.begin(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.guard.check(idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Writes each frame as a lossless RGB8 PNG named by [`frame_file_name`].
///
/// Frames go to a temporary name first and are renamed into place, so a failed write never
/// leaves a truncated file under a name the encoder reads.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    guard: PushGuard,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            guard: PushGuard::default(),
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames written since `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ReelError::sink(format!(
                "failed to create frames directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        let stale = remove_stale_frames(&self.dir)?;
        self.guard.begin(cfg);
        self.written = 0;
        tracing::debug!(dir = %self.dir.display(), stale, "png sequence sink started");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.guard.check(idx, frame)?;
        let png = frame.encode_png()?;

        let name = frame_file_name(idx);
        let final_path = self.dir.join(&name);
        let tmp_path = self.dir.join(format!(".{name}.tmp"));
        if let Err(e) = std::fs::write(&tmp_path, &png) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ReelError::sink(format!(
                "failed to write '{}': {e}",
                tmp_path.display()
            )));
        }
        std::fs::rename(&tmp_path, &final_path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            ReelError::sink(format!(
                "failed to move frame into '{}': {e}",
                final_path.display()
            ))
        })?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        tracing::debug!(frames = self.written, "png sequence sink finished");
        Ok(())
    }
}

/// Delete `frame_*.png` left by an earlier run so the encoder never picks them up.
fn remove_stale_frames(dir: &Path) -> ReelResult<usize> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ReelError::sink(format!("failed to list frames directory '{}': {e}", dir.display()))
    })?;
    let mut removed = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("frame_") && name.ends_with(".png") {
            std::fs::remove_file(entry.path()).map_err(|e| {
                ReelError::sink(format!("failed to remove stale frame '{name}': {e}"))
            })?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
