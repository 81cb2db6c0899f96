//! Scene evaluators: pure functions from segment-local progress to an ordered layer list.

use crate::animation::ease::Ease;
use crate::assets::font::FontRole;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::ReelResult;
use crate::render::layer::{Layer, LayerStack};
use crate::render::text::TextSpec;
use crate::timeline::controller::Timeline;

/// Staged text announcement over a poster.
pub mod announcement;
/// Prepared per-run images.
pub mod assets;
/// Story text.
pub mod copy;
/// Closing call to action.
pub mod cta;
/// Event details cards.
pub mod details;
/// Price highlight.
pub mod highlight;
/// Product reveal.
pub mod reveal;

pub use assets::SceneAssets;
pub use copy::StoryCopy;

/// Brand pink used by both storyboards.
pub const BRAND_PINK: Rgba8 = Rgba8::rgb(217, 22, 86);

/// A visual segment kind. Dispatch is by variant; evaluators share no state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Reveal,
    Details,
    PriceHighlight,
    CallToAction,
    /// Text blocks `0..stage` shown, block `stage` fading in.
    Announcement { stage: u8 },
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Details => "details",
            Self::PriceHighlight => "price_highlight",
            Self::CallToAction => "call_to_action",
            Self::Announcement { .. } => "announcement",
        }
    }

    /// Layers for this scene at segment-local progress `local`.
    pub fn evaluate(self, local: f64, cx: &SceneContext<'_>) -> ReelResult<LayerStack> {
        match self {
            Self::Reveal => reveal::evaluate(local, cx),
            Self::Details => details::evaluate(local, cx),
            Self::PriceHighlight => highlight::evaluate(local, cx),
            Self::CallToAction => cta::evaluate(local, cx),
            Self::Announcement { stage } => announcement::evaluate(stage, local, cx),
        }
    }
}

/// Which sequence of scenes a story plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storyboard {
    /// Product reveal, event details, price highlight, call to action.
    #[default]
    Showcase,
    /// Poster with four staged text announcements.
    Tasting,
}

impl Storyboard {
    pub fn scenes(self) -> Vec<Scene> {
        match self {
            Self::Showcase => vec![
                Scene::Reveal,
                Scene::Details,
                Scene::PriceHighlight,
                Scene::CallToAction,
            ],
            Self::Tasting => (0..announcement::STAGES)
                .map(|stage| Scene::Announcement { stage })
                .collect(),
        }
    }

    /// Inner progress thresholds between consecutive scenes.
    pub fn default_boundaries(self) -> &'static [f64] {
        match self {
            Self::Showcase => &[0.27, 0.53, 0.8],
            Self::Tasting => &[0.2, 0.4, 0.67],
        }
    }

    /// Color every frame starts from.
    pub fn base_color(self) -> Rgba8 {
        match self {
            Self::Showcase => Rgba8::WHITE,
            Self::Tasting => BRAND_PINK,
        }
    }

    /// Timeline over `total_frames`, with optional boundary overrides.
    pub fn timeline(self, total_frames: u64, boundaries: Option<&[f64]>) -> ReelResult<Timeline> {
        let boundaries = boundaries.unwrap_or(self.default_boundaries());
        Timeline::from_boundaries(total_frames, boundaries, self.scenes())
    }
}

/// Read-only inputs shared by every evaluator call.
#[derive(Clone, Copy, Debug)]
pub struct SceneContext<'a> {
    pub canvas: Canvas,
    pub assets: &'a SceneAssets,
    pub copy: &'a StoryCopy,
    /// Applied to zoom, slide and grow motion; fades stay linear.
    pub ease: Ease,
}

/// Text layer centered horizontally on the canvas at height `y`.
pub(crate) fn label(
    cx: &SceneContext<'_>,
    text: &str,
    font: FontRole,
    size_px: f32,
    color: Rgba8,
    y: f64,
) -> TextSpec {
    TextSpec::centered(
        text,
        font,
        size_px,
        color,
        Point::new(cx.canvas.center_x(), y),
    )
}

pub(crate) fn push_label(layers: &mut LayerStack, spec: TextSpec) {
    layers.push(Layer::text(spec));
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/mod.rs"]
mod tests;
