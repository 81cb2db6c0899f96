use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scenes::Scene;
use crate::timeline::segment::{ProgressRange, Segment};

/// Where a frame falls on the timeline. Derived per frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePosition {
    pub frame: FrameIndex,
    /// Global progress in `[0, 1)`.
    pub progress: f64,
    /// Index into [`Timeline::segments`].
    pub segment: usize,
    /// Progress inside the segment, in `[0, 1]`.
    pub local: f64,
}

/// Sorted segment table partitioning `[0, 1)`.
///
/// Resolution is stateless: any frame can be resolved in any order.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    segments: Vec<Segment>,
    total_frames: u64,
}

impl Timeline {
    /// Validate that `segments` partition `[0, 1)` contiguously with non-empty ranges.
    pub fn new(total_frames: u64, segments: Vec<Segment>) -> ReelResult<Self> {
        if total_frames == 0 {
            return Err(ReelError::validation("timeline needs at least one frame"));
        }
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            return Err(ReelError::validation("timeline needs at least one segment"));
        };
        if first.range.start != 0.0 {
            return Err(ReelError::validation(format!(
                "first segment must start at 0, got {}",
                first.range.start
            )));
        }
        if last.range.end != 1.0 {
            return Err(ReelError::validation(format!(
                "last segment must end at 1, got {}",
                last.range.end
            )));
        }
        for s in &segments {
            if s.range.span().is_nan() || s.range.span() <= 0.0 {
                return Err(ReelError::validation(format!(
                    "segment {} has empty range [{}, {})",
                    s.id, s.range.start, s.range.end
                )));
            }
        }
        for pair in segments.windows(2) {
            if pair[0].range.end != pair[1].range.start {
                return Err(ReelError::validation(format!(
                    "segments {} and {} are not contiguous ({} != {})",
                    pair[0].id, pair[1].id, pair[0].range.end, pair[1].range.start
                )));
            }
        }
        Ok(Self {
            segments,
            total_frames,
        })
    }

    /// Build from the inner thresholds between consecutive scenes.
    ///
    /// `boundaries` must be strictly increasing inside `(0, 1)` and number one fewer than
    /// `scenes`.
    pub fn from_boundaries(
        total_frames: u64,
        boundaries: &[f64],
        scenes: Vec<Scene>,
    ) -> ReelResult<Self> {
        if scenes.len() != boundaries.len() + 1 {
            return Err(ReelError::validation(format!(
                "{} scenes need {} boundaries, got {}",
                scenes.len(),
                scenes.len().saturating_sub(1),
                boundaries.len()
            )));
        }
        validate_boundaries(boundaries)?;

        let mut edges = Vec::with_capacity(boundaries.len() + 2);
        edges.push(0.0);
        edges.extend_from_slice(boundaries);
        edges.push(1.0);

        let segments = scenes
            .into_iter()
            .enumerate()
            .map(|(i, scene)| Segment {
                id: i as u32,
                range: ProgressRange::new(edges[i], edges[i + 1]),
                scene,
            })
            .collect();
        Self::new(total_frames, segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// `frame / total_frames`; only meaningful for frames inside the timeline.
    pub fn progress(&self, frame: FrameIndex) -> f64 {
        frame.0 as f64 / self.total_frames as f64
    }

    /// Index of the segment containing `progress`; the last range is closed at 1.
    pub fn locate(&self, progress: f64) -> Option<usize> {
        if !(0.0..=1.0).contains(&progress) {
            return None;
        }
        let i = self.segments.partition_point(|s| s.range.end <= progress);
        if i < self.segments.len() {
            Some(i)
        } else if progress == 1.0 {
            Some(self.segments.len() - 1)
        } else {
            None
        }
    }

    pub fn resolve(&self, frame: FrameIndex) -> ReelResult<FramePosition> {
        if frame.0 >= self.total_frames {
            return Err(ReelError::timeline(
                frame.0,
                self.progress(frame),
                format!("frame is outside 0..{}", self.total_frames),
            ));
        }
        let progress = self.progress(frame);
        let segment = self.locate(progress).ok_or_else(|| {
            ReelError::timeline(frame.0, progress, "no segment covers this progress")
        })?;
        Ok(FramePosition {
            frame,
            progress,
            segment,
            local: self.segments[segment].range.local(progress),
        })
    }

    /// Scene active at `pos`.
    pub fn scene(&self, pos: &FramePosition) -> &Scene {
        &self.segments[pos.segment].scene
    }
}

/// Check inner boundaries: finite, strictly increasing, strictly inside `(0, 1)`.
pub fn validate_boundaries(boundaries: &[f64]) -> ReelResult<()> {
    for &b in boundaries {
        if !b.is_finite() || b <= 0.0 || b >= 1.0 {
            return Err(ReelError::validation(format!(
                "boundary {b} must lie strictly between 0 and 1"
            )));
        }
    }
    if boundaries.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ReelError::validation(
            "boundaries must be strictly increasing",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/controller.rs"]
mod tests;
