use super::*;

#[test]
fn gradient_first_row_is_top_color_and_rows_truncate() {
    let g = vertical_gradient(2, 10, Rgba8::rgb(255, 255, 255), Rgba8::rgb(245, 245, 245)).unwrap();
    assert_eq!(g.pixel(0, 0), Some([255, 255, 255, 255]));
    // t = 0.5 -> 255 - 5 = 250
    assert_eq!(g.pixel(1, 5), Some([250, 250, 250, 255]));
    // t = 0.9 -> 255 - 9 = 246
    assert_eq!(g.pixel(0, 9), Some([246, 246, 246, 255]));
}

#[test]
fn gradient_alpha_ramp_is_monotonic() {
    let g = vertical_gradient(1, 50, Rgba8::WHITE.with_alpha(0), Rgba8::WHITE).unwrap();
    let alphas: Vec<u8> = (0..50).map(|y| g.pixel(0, y).unwrap()[3]).collect();
    assert_eq!(alphas[0], 0);
    assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn rounded_rect_fills_center_and_clears_corners() {
    let r = ShapeRasterizer::new();
    let img = r.rounded_rect(40, 20, 8.0, Rgba8::rgb(50, 50, 50)).unwrap();
    assert_eq!(img.pixel(20, 10), Some([50, 50, 50, 255]));
    assert_eq!(img.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn ellipse_is_transparent_outside() {
    let r = ShapeRasterizer::new();
    let img = r.ellipse(30, 10, Rgba8::BLACK.with_alpha(40)).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap()[3], 0);
    let center = img.pixel(15, 5).unwrap();
    assert!(center[3].abs_diff(40) <= 1, "{center:?}");
}

#[test]
fn disc_has_outline_ring_and_fill_center() {
    let r = ShapeRasterizer::new();
    let pink = Rgba8::rgb(217, 22, 86);
    let img = r
        .disc(
            50,
            Rgba8::WHITE,
            Some(Outline {
                color: pink,
                width: 8.0,
            }),
        )
        .unwrap();
    assert_eq!((img.width, img.height), (100, 100));
    assert_eq!(img.pixel(50, 50), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(50, 3), Some([217, 22, 86, 255]));
    assert_eq!(img.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn zero_sized_shape_is_empty() {
    let r = ShapeRasterizer::new();
    let img = r.ellipse(0, 10, Rgba8::BLACK).unwrap();
    assert!(img.data.is_empty());
}
