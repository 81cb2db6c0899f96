use crate::animation::tween::clamp01;
use crate::scenes::Scene;

/// Half-open normalized progress range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressRange {
    pub start: f64,
    pub end: f64,
}

impl ProgressRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Position of `progress` inside the range, clamped to `[0, 1]`.
    pub fn local(self, progress: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        clamp01((progress - self.start) / span)
    }
}

/// A scene active over one progress range.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub id: u32,
    pub range: ProgressRange,
    pub scene: Scene,
}
