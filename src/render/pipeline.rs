use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::animation::ease::Ease;
use crate::assets::font::FontBook;
use crate::assets::store::AssetStore;
use crate::config::StoryConfig;
use crate::encode::ffmpeg::EncodeJob;
use crate::encode::sink::{FrameSink, PngSequenceSink, SinkConfig, frame_file_name};
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::render::layer::{FrameWorker, LayerStack};
use crate::scenes::{SceneAssets, SceneContext, StoryCopy};
use crate::timeline::controller::{FramePosition, Timeline};

/// Frames between progress log lines.
const PROGRESS_EVERY: u64 = 45;

/// How a frame range is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    /// Render chunks on a rayon pool instead of frame by frame.
    pub parallel: bool,
    /// Frames per parallel chunk; `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker threads for the pool; rayon's default when `None`.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Counters returned by [`StoryRenderer::render_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

/// Outcome of a full [`run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub stats: RenderStats,
    pub output: PathBuf,
    pub frames_dir: PathBuf,
    /// Whether the still sequence is still on disk.
    pub frames_kept: bool,
}

/// Everything needed to render any frame of a story, shared read-only across workers.
#[derive(Debug)]
pub struct StoryRenderer {
    timeline: Timeline,
    assets: SceneAssets,
    fonts: FontBook,
    copy: StoryCopy,
    canvas: Canvas,
    base: Rgba8,
    ease: Ease,
    fps: Fps,
}

impl StoryRenderer {
    /// Validate `cfg` and prepare per-run images from an already loaded store.
    pub fn new(cfg: &StoryConfig, store: &AssetStore, fonts: FontBook) -> ReelResult<Self> {
        cfg.validate()?;
        let timeline = cfg.timeline()?;
        let assets = SceneAssets::prepare(store, cfg.canvas, cfg.storyboard)?;
        Ok(Self {
            timeline,
            assets,
            fonts,
            copy: cfg.copy.clone(),
            canvas: cfg.canvas,
            base: cfg.storyboard.base_color(),
            ease: cfg.easing,
            fps: cfg.fps()?,
        })
    }

    /// Load images and fonts named by `cfg`. Image failures are fatal; font failures are not.
    #[tracing::instrument(skip_all)]
    pub fn from_config(cfg: &StoryConfig) -> ReelResult<Self> {
        cfg.validate()?;
        let store = AssetStore::load(&cfg.assets)?;
        let fonts = FontBook::load(&cfg.fonts);
        Self::new(cfg, &store, fonts)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Fresh per-thread compositing state.
    pub fn worker(&self) -> FrameWorker {
        FrameWorker::new(&self.fonts)
    }

    /// Resolve `idx` and evaluate its scene.
    pub fn layers(&self, idx: FrameIndex) -> ReelResult<(FramePosition, LayerStack)> {
        let pos = self.timeline.resolve(idx)?;
        let cx = SceneContext {
            canvas: self.canvas,
            assets: &self.assets,
            copy: &self.copy,
            ease: self.ease,
        };
        let layers = self.timeline.scene(&pos).evaluate(pos.local, &cx)?;
        Ok((pos, layers))
    }

    /// Render one frame from scratch. Depends only on `idx` and the shared state.
    pub fn render_frame(&self, worker: &mut FrameWorker, idx: FrameIndex) -> ReelResult<FrameRGBA> {
        let (pos, layers) = self.layers(idx)?;
        let mut frame = FrameRGBA::new_filled(self.canvas, self.base)?;
        worker.composite(&mut frame, &layers)?;
        tracing::trace!(
            frame = idx.0,
            segment = pos.segment,
            local = pos.local,
            layers = layers.len(),
            "rendered frame"
        );
        Ok(frame)
    }

    /// Render `range` into `sink`, pushing frames in index order.
    ///
    /// Any error stops the render; frames already pushed stay with the sink.
    pub fn render_range(
        &self,
        range: FrameRange,
        threading: RenderThreading,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<RenderStats> {
        if range.end.0 > self.timeline.total_frames() {
            return Err(ReelError::validation(format!(
                "render range end {} exceeds total frames {}",
                range.end.0,
                self.timeline.total_frames()
            )));
        }
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
        })?;

        let mut stats = RenderStats::default();
        if threading.parallel {
            let pool = build_thread_pool(threading.threads)?;
            let chunk = normalized_chunk_size(threading.chunk_size);
            for part in range.chunks(chunk) {
                let indices: Vec<u64> = (part.start.0..part.end.0).collect();
                let rendered = pool.install(|| {
                    indices
                        .par_iter()
                        .map_init(
                            || self.worker(),
                            |w, &f| self.render_frame(w, FrameIndex(f)),
                        )
                        .collect::<Vec<_>>()
                });
                for (f, frame) in indices.iter().zip(rendered) {
                    self.push(sink, FrameIndex(*f), &frame?, &mut stats)?;
                }
            }
        } else {
            let mut worker = self.worker();
            for f in range.start.0..range.end.0 {
                let frame = self.render_frame(&mut worker, FrameIndex(f))?;
                self.push(sink, FrameIndex(f), &frame, &mut stats)?;
            }
        }
        sink.end()?;
        Ok(stats)
    }

    fn push(
        &self,
        sink: &mut dyn FrameSink,
        idx: FrameIndex,
        frame: &FrameRGBA,
        stats: &mut RenderStats,
    ) -> ReelResult<()> {
        sink.push_frame(idx, frame)?;
        stats.frames_total += 1;
        stats.frames_rendered += 1;
        if idx.0 % PROGRESS_EVERY == 0 {
            tracing::info!(
                frame = idx.0,
                percent = (self.timeline.progress(idx) * 100.0) as u32,
                "rendering"
            );
        }
        Ok(())
    }
}

/// Full story run: load, render every frame to PNG stills, encode, clean up.
///
/// After a successful encode, and only when `keep_frames` is off, the frame series is deleted
/// file by file and the frames directory is removed if nothing else is left in it. On any
/// failure the frames stay on disk for inspection.
#[tracing::instrument(skip_all, fields(storyboard = ?cfg.storyboard))]
pub fn run(cfg: &StoryConfig, threading: RenderThreading) -> ReelResult<RunReport> {
    run_with_encoder(cfg, threading, "ffmpeg")
}

pub(crate) fn run_with_encoder(
    cfg: &StoryConfig,
    threading: RenderThreading,
    encoder: &str,
) -> ReelResult<RunReport> {
    let renderer = StoryRenderer::from_config(cfg)?;
    let total = renderer.timeline().total_frames();
    tracing::info!(
        frames = total,
        width = cfg.canvas.width,
        height = cfg.canvas.height,
        "rendering story"
    );

    let mut sink = PngSequenceSink::new(&cfg.frames_dir);
    let stats = renderer.render_range(
        FrameRange::new(FrameIndex(0), FrameIndex(total))?,
        threading,
        &mut sink,
    )?;

    EncodeJob {
        frames_dir: &cfg.frames_dir,
        fps: cfg.fps()?,
        output: &cfg.output,
        settings: &cfg.encoder,
    }
    .run_with_program(encoder)?;

    let frames_kept = cfg.keep_frames || !remove_frame_series(&cfg.frames_dir, total);
    Ok(RunReport {
        stats,
        output: cfg.output.clone(),
        frames_dir: cfg.frames_dir.clone(),
        frames_kept,
    })
}

/// Delete `frame_0000.png..` for `total` frames, then the directory itself if it is empty.
///
/// Returns `false` when some frame could not be removed. Other files are never touched.
fn remove_frame_series(dir: &Path, total: u64) -> bool {
    let mut all_removed = true;
    for idx in 0..total {
        let path = dir.join(frame_file_name(FrameIndex(idx)));
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not remove frame");
                all_removed = false;
            }
        }
    }
    if let Err(e) = std::fs::remove_dir(dir) {
        tracing::warn!(
            dir = %dir.display(),
            error = %e,
            "frames directory kept (not empty or not removable)"
        );
    }
    all_removed
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
