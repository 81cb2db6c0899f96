use crate::assets::font::FontRole;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::ReelResult;
use crate::render::layer::{Layer, LayerContent, LayerStack};
use crate::scenes::{BRAND_PINK, SceneContext, label, push_label};

const PANEL_HEIGHT: u32 = 600;
const PANEL_MARGIN: u32 = 100;

pub(crate) fn evaluate(_local: f64, cx: &SceneContext<'_>) -> ReelResult<LayerStack> {
    let Canvas { width, height } = cx.canvas;
    let copy = &cx.copy.showcase;
    let mut layers = LayerStack::new();

    layers.push(Layer::image(cx.assets.closing_backdrop()?.clone(), (0, 0)));
    layers.push(Layer::new(
        LayerContent::Solid {
            width,
            height,
            color: Rgba8::BLACK.with_alpha(150),
        },
        (0, 0),
    ));

    let panel_y = (height as i32 - PANEL_HEIGHT as i32).div_euclid(2);
    layers.push(Layer::new(
        LayerContent::RoundedRect {
            width: width.saturating_sub(2 * PANEL_MARGIN),
            height: PANEL_HEIGHT,
            radius: 30.0,
            color: Rgba8::WHITE,
        },
        (PANEL_MARGIN as i32, panel_y),
    ));

    let grey = Rgba8::rgb(80, 80, 80);
    let lines = [
        (&copy.cta_intro, FontRole::Regular, 55.0, Rgba8::rgb(100, 100, 100), 0),
        (&copy.cta_title, FontRole::Bold, 90.0, BRAND_PINK, 100),
        (&copy.cta_title_2, FontRole::Bold, 90.0, BRAND_PINK, 100),
        (&copy.cta_brand, FontRole::Regular, 48.0, grey, 120),
        (&copy.cta_when, FontRole::Regular, 48.0, grey, 80),
    ];
    let mut y = panel_y + 100;
    for (text, font, size, color, step) in lines {
        y += step;
        push_label(&mut layers, label(cx, text, font, size, color, f64::from(y)));
    }
    Ok(layers)
}
