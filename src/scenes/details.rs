use crate::animation::tween::clamp01;
use crate::assets::font::FontRole;
use crate::effects::blur::BlurSpec;
use crate::foundation::core::{Canvas, Rgba8, Vec2};
use crate::foundation::error::ReelResult;
use crate::render::layer::{Layer, LayerContent, LayerStack};
use crate::render::text::TextShadow;
use crate::scenes::{BRAND_PINK, SceneContext, label, push_label};

const CARD_MARGIN: i32 = 80;
const CARD_HEIGHT: u32 = 150;
const CARD_RADIUS: f64 = 20.0;
const SLIDE_DISTANCE: f64 = 200.0;

/// Horizontal slide offset of the cards: 200 px at the start, 0 at the end.
pub fn card_offset(local: f64, cx: &SceneContext<'_>) -> i32 {
    ((1.0 - cx.ease.apply(clamp01(local))) * SLIDE_DISTANCE) as i32
}

fn card(width: u32, left: i32, top: i32, color: Rgba8) -> Layer {
    let right = width as i32 - CARD_MARGIN;
    Layer::new(
        LayerContent::RoundedRect {
            width: (right - left).max(0) as u32,
            height: CARD_HEIGHT,
            radius: CARD_RADIUS,
            color,
        },
        (left, top),
    )
}

pub(crate) fn evaluate(local: f64, cx: &SceneContext<'_>) -> ReelResult<LayerStack> {
    let Canvas { width, height } = cx.canvas;
    let copy = &cx.copy.showcase;
    let mut layers = LayerStack::new();

    layers.push(Layer::image(cx.assets.details_backdrop()?.clone(), (0, 0)));

    let fade_top = (f64::from(height) * 0.4) as u32;
    layers.push(Layer::new(
        LayerContent::VerticalGradient {
            width,
            height: height - fade_top,
            top: Rgba8::WHITE.with_alpha(0),
            bottom: Rgba8::WHITE,
        },
        (0, fade_top as i32),
    ));

    let offset = card_offset(local, cx);

    let top = 700;
    layers.push(card(width, CARD_MARGIN + offset, top, BRAND_PINK));
    push_label(
        &mut layers,
        label(cx, &copy.details_day, FontRole::Regular, 55.0, Rgba8::WHITE, f64::from(top + 50)),
    );
    push_label(
        &mut layers,
        label(cx, &copy.details_date, FontRole::Regular, 48.0, Rgba8::WHITE, f64::from(top + 110)),
    );

    let top = 900;
    layers.push(card(width, CARD_MARGIN - offset, top, Rgba8::rgb(50, 50, 50)));
    push_label(
        &mut layers,
        label(cx, &copy.details_hours, FontRole::Bold, 90.0, Rgba8::WHITE, f64::from(top + 75)),
    );

    push_label(
        &mut layers,
        label(cx, &copy.details_heading, FontRole::Bold, 90.0, Rgba8::WHITE, 150.0).with_shadow(
            TextShadow {
                offset: Vec2::new(3.0, 3.0),
                color: Rgba8::BLACK.with_alpha(180),
                blur: Some(BlurSpec::from_sigma(3.0)),
            },
        ),
    );
    Ok(layers)
}
