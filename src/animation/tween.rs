//! Interpolation helpers driven by segment-local progress.
//!
//! Every helper clamps its driving variable to `[0, 1]` first, so boundary rounding in progress
//! computation can never overshoot an animation.

use crate::animation::ease::Ease;
use crate::foundation::core::Rgba8;

/// Clamp `t` into `[0, 1]`; NaN maps to `0`.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Linear interpolation, exact at both endpoints.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp01(t)
}

/// Per-channel interpolation `c0 + (c1 - c0) * t`, truncated to an 8-bit value.
pub fn lerp_channel(c0: u8, c1: u8, t: f64) -> u8 {
    let v = f64::from(c0) + (f64::from(c1) - f64::from(c0)) * clamp01(t);
    v as u8
}

/// Channel-wise [`lerp_channel`] over straight RGBA.
pub fn lerp_rgba(c0: Rgba8, c1: Rgba8, t: f64) -> Rgba8 {
    Rgba8::new(
        lerp_channel(c0.r, c1.r, t),
        lerp_channel(c0.g, c1.g, t),
        lerp_channel(c0.b, c1.b, t),
        lerp_channel(c0.a, c1.a, t),
    )
}

/// Fade-in alpha `min(t * rate, 1) * 255`, truncated.
pub fn fade_alpha(t: f64, rate: f64) -> u8 {
    (clamp01(clamp01(t) * rate) * 255.0) as u8
}

/// A scalar animated from `from` to `to` over segment-local progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub ease: Ease,
}

impl Tween {
    pub const fn linear(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            ease: Ease::Linear,
        }
    }

    pub const fn with_ease(self, ease: Ease) -> Self {
        Self { ease, ..self }
    }

    pub fn sample(self, t: f64) -> f64 {
        lerp(self.from, self.to, self.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
