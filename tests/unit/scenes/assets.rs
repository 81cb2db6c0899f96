use super::*;

fn store(bg_w: u32, bg_h: u32, with_product: bool) -> AssetStore {
    let bg = image::RgbaImage::from_pixel(bg_w, bg_h, image::Rgba([200, 100, 50, 255]));
    let product = with_product
        .then(|| SourceImage::new(image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255]))));
    AssetStore::from_images(
        SourceImage::new(bg).unwrap(),
        product.transpose().unwrap(),
    )
}

#[test]
fn fit_inside_keeps_aspect() {
    let canvas = Canvas::STORY;
    assert_eq!(fit_inside(1080, 1080, canvas), (1080, 1080));
    assert_eq!(fit_inside(500, 2000, canvas), (480, 1920));
    assert_eq!(fit_inside(2000, 1000, canvas), (1080, 540));
}

#[test]
fn showcase_backdrops_are_darkened_and_sized() {
    let canvas = Canvas {
        width: 40,
        height: 80,
    };
    let assets = SceneAssets::prepare(&store(20, 10, true), canvas, Storyboard::Showcase).unwrap();

    let details = assets.details_backdrop().unwrap();
    assert_eq!((details.width, details.height), (40, 40));
    let px = details.pixel(20, 20).unwrap();
    assert!(px[0].abs_diff(80) <= 1, "{px:?}");

    let closing = assets.closing_backdrop().unwrap();
    assert_eq!((closing.width, closing.height), (40, 80));
    // Resized source is 40x20; the rest is black padding.
    assert_eq!(closing.pixel(5, 70), Some([0, 0, 0, 255]));
    assert!(closing.pixel(5, 5).unwrap()[0].abs_diff(60) <= 1);

    assert!(assets.poster().is_err());
}

#[test]
fn showcase_requires_a_product() {
    let err = SceneAssets::prepare(&store(20, 10, false), Canvas::STORY, Storyboard::Showcase)
        .unwrap_err();
    assert!(err.to_string().contains("product"));
}

#[test]
fn tasting_poster_is_centered() {
    let canvas = Canvas {
        width: 100,
        height: 200,
    };
    let assets = SceneAssets::prepare(&store(50, 50, false), canvas, Storyboard::Tasting).unwrap();
    let (poster, origin) = assets.poster().unwrap();
    assert_eq!((poster.width, poster.height), (100, 100));
    assert_eq!(origin, (0, 50));
    assert!(assets.product().is_err());
}
