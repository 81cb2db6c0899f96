use super::*;

#[test]
fn new_filled_uses_base_color() {
    let f = FrameRGBA::new_filled(
        Canvas {
            width: 3,
            height: 2,
        },
        Rgba8::rgb(217, 22, 86),
    )
    .unwrap();
    assert_eq!(f.data.len(), 24);
    assert!(f.premultiplied);
    assert_eq!(f.pixel(2, 1), Some([217, 22, 86, 255]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn rgb8_drops_alpha_of_opaque_frames() {
    let f = FrameRGBA::new_filled(
        Canvas {
            width: 2,
            height: 1,
        },
        Rgba8::rgb(1, 2, 3),
    )
    .unwrap();
    assert_eq!(f.to_rgb8(), vec![1, 2, 3, 1, 2, 3]);
}

#[test]
fn png_round_trips_through_decoder() {
    let f = FrameRGBA::new_filled(
        Canvas {
            width: 4,
            height: 4,
        },
        Rgba8::rgb(10, 200, 30),
    )
    .unwrap();
    let png = f.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (4, 4));
    assert_eq!(decoded.get_pixel(3, 3).0, [10, 200, 30]);
}

#[test]
fn rgb8_flattens_translucent_pixels_over_black() {
    let premul = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![100, 50, 0, 128],
        premultiplied: true,
    };
    assert_eq!(premul.to_rgb8(), vec![100, 50, 0]);

    let straight = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![255, 0, 0, 0],
        premultiplied: false,
    };
    assert_eq!(straight.to_rgb8(), vec![0, 0, 0]);
}
