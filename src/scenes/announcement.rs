use crate::animation::tween::clamp01;
use crate::assets::font::FontRole;
use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::layer::{Layer, LayerStack};
use crate::render::text::{TextShadow, TextSpec};
use crate::scenes::{SceneContext, label, push_label};

/// Number of text blocks, one per stage.
pub const STAGES: u8 = 4;

const GOLD: Rgba8 = Rgba8::rgb(255, 223, 0);

fn headline_shadow() -> TextShadow {
    TextShadow {
        offset: Vec2::new(5.0, 5.0),
        color: Rgba8::BLACK,
        blur: None,
    }
}

/// Gold offset copy under the product line while it fades in.
fn product_echo() -> TextShadow {
    TextShadow {
        offset: Vec2::new(5.0, 5.0),
        color: GOLD,
        blur: None,
    }
}

/// Text block revealed at `stage`, fully opaque. `fading` marks the block of the active stage.
fn block(stage: u8, fading: bool, cx: &SceneContext<'_>) -> ReelResult<Vec<TextSpec>> {
    let copy = &cx.copy.tasting;
    let bold = FontRole::Bold;
    Ok(match stage {
        0 => vec![
            label(cx, &copy.headline, bold, 100.0, Rgba8::WHITE, 150.0)
                .with_shadow(headline_shadow()),
            label(cx, &copy.headline_2, bold, 100.0, Rgba8::WHITE, 270.0)
                .with_shadow(headline_shadow()),
        ],
        1 => {
            let product = label(cx, &copy.product, bold, 80.0, GOLD, 400.0);
            if fading {
                vec![product.with_shadow(product_echo())]
            } else {
                vec![product]
            }
        }
        2 => vec![
            label(cx, &copy.date, bold, 60.0, Rgba8::WHITE, 1400.0),
            label(cx, &copy.hours, bold, 60.0, Rgba8::WHITE, 1500.0),
        ],
        3 => vec![
            label(cx, &copy.price, bold, 80.0, GOLD, 1650.0),
            label(cx, &copy.call, FontRole::Regular, 50.0, Rgba8::WHITE, 1770.0),
        ],
        other => {
            return Err(ReelError::render(format!(
                "announcement stage {other} is out of range 0..{STAGES}"
            )));
        }
    })
}

/// Alpha of the block currently fading in.
pub fn stage_alpha(local: f64) -> u8 {
    (clamp01(local) * 255.0) as u8
}

pub(crate) fn evaluate(stage: u8, local: f64, cx: &SceneContext<'_>) -> ReelResult<LayerStack> {
    let (poster, origin) = cx.assets.poster()?;
    let mut layers = LayerStack::new();
    layers.push(Layer::image(poster.clone(), origin));

    for earlier in 0..stage {
        for spec in block(earlier, false, cx)? {
            push_label(&mut layers, spec);
        }
    }
    let alpha = stage_alpha(local);
    for spec in block(stage, true, cx)? {
        push_label(&mut layers, spec.with_alpha(alpha));
    }
    Ok(layers)
}
