use super::*;
use crate::foundation::core::Canvas;

fn canvas(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA::new_filled(
        Canvas {
            width: w,
            height: h,
        },
        Rgba8::WHITE,
    )
    .unwrap()
}

fn solid(w: u32, h: u32, color: Rgba8) -> LayerContent {
    LayerContent::Solid {
        width: w,
        height: h,
        color,
    }
}

#[test]
fn later_layers_win_on_overlap() {
    let mut worker = FrameWorker::new(&FontBook::empty());
    let red = Rgba8::rgb(255, 0, 0);
    let blue = Rgba8::rgb(0, 0, 255);

    let mut a = canvas(4, 4);
    worker
        .composite(&mut a, &[
            Layer::new(solid(3, 3, red), (0, 0)),
            Layer::new(solid(3, 3, blue), (1, 1)),
        ])
        .unwrap();
    assert_eq!(a.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(a.pixel(0, 0), Some([255, 0, 0, 255]));

    let mut b = canvas(4, 4);
    worker
        .composite(&mut b, &[
            Layer::new(solid(3, 3, blue), (1, 1)),
            Layer::new(solid(3, 3, red), (0, 0)),
        ])
        .unwrap();
    assert_eq!(b.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_ne!(a, b);
}

#[test]
fn invisible_layers_leave_canvas_unchanged() {
    let mut worker = FrameWorker::new(&FontBook::empty());
    let mut f = canvas(8, 8);
    let before = f.clone();
    worker
        .composite(&mut f, &[
            Layer::new(solid(8, 8, Rgba8::BLACK), (0, 0)).with_opacity(0.0),
            Layer::new(solid(8, 8, Rgba8::BLACK.with_alpha(0)), (0, 0)),
            Layer::new(
                LayerContent::Ellipse {
                    width: 8,
                    height: 8,
                    color: Rgba8::TRANSPARENT,
                },
                (0, 0),
            ),
        ])
        .unwrap();
    assert_eq!(f, before);
}

#[test]
fn off_canvas_placement_is_clipped() {
    let mut worker = FrameWorker::new(&FontBook::empty());
    let mut f = canvas(4, 4);
    worker
        .composite(&mut f, &[
            Layer::new(solid(10, 10, Rgba8::BLACK), (-8, -8)),
            Layer::new(solid(2, 2, Rgba8::BLACK), (100, 100)),
        ])
        .unwrap();
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(2, 2), Some([255, 255, 255, 255]));
}

#[test]
fn blurred_layer_spreads_past_its_box() {
    let mut worker = FrameWorker::new(&FontBook::empty());
    let mut f = canvas(30, 30);
    worker
        .composite(&mut f, &[Layer::new(solid(10, 10, Rgba8::BLACK), (10, 10))
            .with_blur(BlurSpec::from_sigma(2.0))])
        .unwrap();
    let outside = f.pixel(8, 15).unwrap();
    assert!(outside[0] < 255, "{outside:?}");
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn half_alpha_overlay_blends_per_channel() {
    let mut worker = FrameWorker::new(&FontBook::empty());
    let mut f = canvas(2, 2);
    worker
        .composite(&mut f, &[Layer::new(solid(2, 2, Rgba8::BLACK.with_alpha(150)), (0, 0))])
        .unwrap();
    // 255 * (1 - 150/255) = 105
    let px = f.pixel(0, 0).unwrap();
    assert!(px[0].abs_diff(105) <= 1, "{px:?}");
    assert_eq!(px[3], 255);
}
