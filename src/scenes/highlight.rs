use crate::animation::tween::Tween;
use crate::assets::font::FontRole;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::ReelResult;
use crate::render::layer::{Layer, LayerContent, LayerStack};
use crate::render::shape::Outline;
use crate::scenes::{BRAND_PINK, SceneContext, label, push_label};

const DISC_RADIUS: u32 = 350;
const GROW: Tween = Tween::linear(0.5, 1.0);
const PRICE_MAX_PX: f64 = 200.0;

/// Price font size: half size at the start, 200 px at the end.
pub fn price_size(local: f64, cx: &SceneContext<'_>) -> u32 {
    (PRICE_MAX_PX * GROW.with_ease(cx.ease).sample(local)) as u32
}

pub(crate) fn evaluate(local: f64, cx: &SceneContext<'_>) -> ReelResult<LayerStack> {
    let Canvas { width, height } = cx.canvas;
    let copy = &cx.copy.showcase;
    let grey = Rgba8::rgb(100, 100, 100);
    let cy = cx.canvas.center_y();
    let mut layers = LayerStack::new();

    layers.push(Layer::new(
        LayerContent::VerticalGradient {
            width,
            height,
            top: BRAND_PINK,
            bottom: Rgba8::WHITE,
        },
        (0, 0),
    ));
    layers.push(Layer::new(
        LayerContent::Disc {
            radius: DISC_RADIUS,
            fill: Rgba8::WHITE,
            outline: Some(Outline {
                color: BRAND_PINK,
                width: 8.0,
            }),
        },
        (
            (width / 2) as i32 - DISC_RADIUS as i32,
            (height / 2) as i32 - DISC_RADIUS as i32,
        ),
    ));

    push_label(
        &mut layers,
        label(cx, &copy.highlight_currency, FontRole::Bold, 90.0, grey, cy - 80.0),
    );
    push_label(
        &mut layers,
        label(
            cx,
            &copy.highlight_price,
            FontRole::Bold,
            price_size(local, cx) as f32,
            BRAND_PINK,
            cy + 50.0,
        ),
    );
    push_label(
        &mut layers,
        label(cx, &copy.highlight_unit, FontRole::Regular, 48.0, grey, cy + 200.0),
    );
    push_label(
        &mut layers,
        label(cx, &copy.highlight_caption, FontRole::Bold, 90.0, Rgba8::WHITE, 200.0),
    );
    Ok(layers)
}
