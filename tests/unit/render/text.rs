use super::*;
use crate::assets::font::FontPaths;
use crate::foundation::core::Canvas;

fn spec(text: &str) -> TextSpec {
    TextSpec::centered(
        text,
        FontRole::Bold,
        48.0,
        Rgba8::BLACK,
        Point::new(100.0, 50.0),
    )
}

fn frame() -> FrameRGBA {
    FrameRGBA::new_filled(
        Canvas {
            width: 200,
            height: 100,
        },
        Rgba8::WHITE,
    )
    .unwrap()
}

#[test]
fn missing_faces_measure_zero_and_draw_nothing() {
    let mut engine = TextLayoutEngine::new(&FontBook::empty());
    assert_eq!(engine.measure(&spec("Hello")).unwrap(), TextExtent::default());

    let mut f = frame();
    let before = f.clone();
    engine.draw(&mut f, &spec("Hello"), 1.0).unwrap();
    assert_eq!(f, before);
}

#[test]
fn invalid_size_is_rejected() {
    let mut engine = TextLayoutEngine::new(&FontBook::empty());
    let mut s = spec("x");
    s.size_px = 0.0;
    assert!(engine.measure(&s).is_err());
}

#[test]
fn with_alpha_scales_shadow_alpha_too() {
    let s = spec("x")
        .with_shadow(TextShadow {
            offset: Vec2::new(3.0, 3.0),
            color: Rgba8::BLACK.with_alpha(180),
            blur: None,
        })
        .with_alpha(0);
    assert_eq!(s.color.a, 0);
    assert_eq!(s.shadow.unwrap().color.a, 0);
}

#[test]
fn builtin_face_measures_and_draws_centered_text() {
    let mut engine = TextLayoutEngine::new(&FontBook::builtin());
    let ext = engine.measure(&spec("Hello")).unwrap();
    assert!(ext.width > 0.0 && ext.height > 0.0);
    let wider = engine.measure(&spec("Hello Hello")).unwrap();
    assert!(wider.width > ext.width);

    let mut f = frame();
    engine.draw(&mut f, &spec("Hello"), 1.0).unwrap();
    let dark = f.data.chunks_exact(4).filter(|px| px[0] < 128).count();
    assert!(dark > 0);
    // Corners stay untouched for centered text.
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(199, 99), Some([255, 255, 255, 255]));
}

#[test]
fn missing_font_files_still_draw_text() {
    let book = FontBook::load(&FontPaths {
        bold: "/no/such/bold.ttf".into(),
        regular: "/no/such/regular.ttf".into(),
    });
    let mut engine = TextLayoutEngine::new(&book);
    for role in [FontRole::Bold, FontRole::Regular] {
        let mut f = frame();
        let s = TextSpec {
            font: role,
            ..spec("Preço")
        };
        engine.draw(&mut f, &s, 1.0).unwrap();
        let dark = f.data.chunks_exact(4).filter(|px| px[0] < 128).count();
        assert!(dark > 0, "{role:?}");
    }
}

#[test]
fn transparent_text_leaves_frame_unchanged() {
    let book = FontBook::builtin();
    let mut engine = TextLayoutEngine::new(&book);
    let mut f = frame();
    let before = f.clone();
    engine.draw(&mut f, &spec("Hello").with_alpha(0), 1.0).unwrap();
    engine.draw(&mut f, &spec("Hello"), 0.0).unwrap();
    assert_eq!(f, before);
}
