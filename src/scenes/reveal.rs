use std::sync::Arc;

use crate::animation::tween::{Tween, fade_alpha};
use crate::assets::font::FontRole;
use crate::assets::store::scaled_height;
use crate::effects::blur::BlurSpec;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::ReelResult;
use crate::render::layer::{Layer, LayerContent, LayerStack};
use crate::scenes::{BRAND_PINK, SceneContext, label, push_label};

const ZOOM: Tween = Tween::linear(1.2, 1.0);
const PRODUCT_WIDTH_RATIO: f64 = 0.85;
const SHADOW_SIGMA: f32 = 25.0;

/// Placement of the product packshot for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Size and position of the product at zoom `scale`.
pub fn product_placement(canvas: Canvas, src_w: u32, src_h: u32, scale: f64) -> ProductPlacement {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let width = ((w * PRODUCT_WIDTH_RATIO * scale) as u32).max(1);
    let height = scaled_height(src_w, src_h, width);
    let x = (canvas.width as i32 - width as i32).div_euclid(2);
    let y = (h * 0.35) as i32 - (f64::from(height as i32 - (h * 0.5) as i32) / 2.0) as i32;
    ProductPlacement {
        x,
        y,
        width,
        height,
    }
}

/// Zoom factor at `local`: 1.2 at the start, exactly 1.0 at the end.
pub fn zoom(local: f64, cx: &SceneContext<'_>) -> f64 {
    ZOOM.with_ease(cx.ease).sample(local)
}

pub(crate) fn evaluate(local: f64, cx: &SceneContext<'_>) -> ReelResult<LayerStack> {
    let Canvas { width, height } = cx.canvas;
    let copy = &cx.copy.showcase;
    let product = cx.assets.product()?;
    let mut layers = LayerStack::new();

    layers.push(Layer::new(
        LayerContent::VerticalGradient {
            width,
            height,
            top: Rgba8::rgb(255, 255, 255),
            bottom: Rgba8::rgb(245, 245, 245),
        },
        (0, 0),
    ));

    let p = product_placement(cx.canvas, product.width(), product.height(), zoom(local, cx));
    layers.push(
        Layer::new(
            LayerContent::Ellipse {
                width: p.width + 20,
                height: 30,
                color: Rgba8::BLACK.with_alpha(40),
            },
            (p.x - 10, p.y + p.height as i32 - 10),
        )
        .with_blur(BlurSpec::from_sigma(SHADOW_SIGMA)),
    );
    layers.push(Layer::image(
        Arc::new(product.resized(p.width, p.height)?),
        (p.x, p.y),
    ));

    let alpha = fade_alpha(local, 2.0);
    push_label(
        &mut layers,
        label(cx, &copy.reveal_title, FontRole::Bold, 90.0, BRAND_PINK, 180.0).with_alpha(alpha),
    );
    push_label(
        &mut layers,
        label(
            cx,
            &copy.reveal_subtitle,
            FontRole::Regular,
            55.0,
            Rgba8::rgb(80, 80, 80),
            280.0,
        )
        .with_alpha(alpha),
    );
    Ok(layers)
}
