use super::*;
use crate::assets::store::{AssetPaths, SourceImage};
use crate::encode::sink::InMemorySink;
use crate::scenes::Storyboard;

fn config(storyboard: Storyboard) -> StoryConfig {
    StoryConfig {
        canvas: Canvas {
            width: 108,
            height: 192,
        },
        fps: 2,
        duration_secs: 4,
        storyboard,
        assets: AssetPaths {
            background: "in-memory-background.png".into(),
            product: Some("in-memory-product.png".into()),
        },
        ..StoryConfig::default()
    }
}

fn store() -> AssetStore {
    let bg = image::RgbaImage::from_fn(32, 24, |x, y| image::Rgba([(x * 8) as u8, (y * 10) as u8, 90, 255]));
    let product = image::RgbaImage::from_pixel(20, 30, image::Rgba([240, 200, 10, 255]));
    AssetStore::from_images(
        SourceImage::new(bg).unwrap(),
        Some(SourceImage::new(product).unwrap()),
    )
}

fn renderer(storyboard: Storyboard) -> StoryRenderer {
    StoryRenderer::new(&config(storyboard), &store(), FontBook::empty()).unwrap()
}

#[test]
fn frames_are_deterministic_across_workers() {
    let r = renderer(Storyboard::Showcase);
    let mut a = r.worker();
    let mut b = r.worker();
    for f in [0, 3, 5, 7] {
        let fa = r.render_frame(&mut a, FrameIndex(f)).unwrap();
        let fb = r.render_frame(&mut b, FrameIndex(f)).unwrap();
        assert_eq!(fa, fb, "frame {f}");
    }
}

#[test]
fn parallel_and_sequential_renders_match() {
    let r = renderer(Storyboard::Showcase);
    let range = FrameRange::new(FrameIndex(0), FrameIndex(8)).unwrap();

    let mut seq = InMemorySink::new();
    let stats = r
        .render_range(range, RenderThreading::default(), &mut seq)
        .unwrap();
    assert_eq!(stats.frames_total, 8);

    let mut par = InMemorySink::new();
    r.render_range(
        range,
        RenderThreading {
            parallel: true,
            chunk_size: 3,
            threads: Some(2),
        },
        &mut par,
    )
    .unwrap();

    assert_eq!(seq.frames().len(), 8);
    assert_eq!(seq.frames(), par.frames());
    let order: Vec<u64> = par.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(order, (0..8).collect::<Vec<_>>());
}

#[test]
fn scenes_change_across_the_story() {
    let r = renderer(Storyboard::Showcase);
    let mut w = r.worker();
    let reveal = r.render_frame(&mut w, FrameIndex(0)).unwrap();
    let details = r.render_frame(&mut w, FrameIndex(3)).unwrap();
    assert_ne!(reveal, details);
    // Reveal starts from the light gradient at the very top row.
    assert_eq!(reveal.pixel(0, 0), Some([255, 255, 255, 255]));
    // Details starts from the darkened backdrop.
    let px = details.pixel(0, 0).unwrap();
    assert!(px[0] < 20 && px[2] < 60, "{px:?}");
}

#[test]
fn tasting_frames_start_from_brand_pink() {
    let r = renderer(Storyboard::Tasting);
    let mut w = r.worker();
    let f = r.render_frame(&mut w, FrameIndex(0)).unwrap();
    // The 32x24 poster fits as 108x81, centered vertically; the top band stays pink.
    assert_eq!(f.pixel(50, 5), Some([217, 22, 86, 255]));
}

#[test]
fn range_past_the_timeline_is_rejected() {
    let r = renderer(Storyboard::Showcase);
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(9)).unwrap();
    assert!(
        r.render_range(range, RenderThreading::default(), &mut sink)
            .is_err()
    );
    assert!(r.render_frame(&mut r.worker(), FrameIndex(8)).is_err());
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(normalized_chunk_size(0), 1);
}

#[test]
fn invalid_config_is_rejected_before_preparing_assets() {
    let mut cfg = config(Storyboard::Showcase);
    cfg.canvas.height = 191;
    assert!(StoryRenderer::new(&cfg, &store(), FontBook::empty()).is_err());
}

fn story_on_disk(name: &str) -> (std::path::PathBuf, StoryConfig) {
    let dir = std::env::temp_dir().join(format!("storyreel_run_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    image::RgbaImage::from_pixel(32, 24, image::Rgba([20, 60, 90, 255]))
        .save(dir.join("background.png"))
        .unwrap();
    image::RgbaImage::from_pixel(20, 30, image::Rgba([240, 200, 10, 255]))
        .save(dir.join("product.png"))
        .unwrap();
    std::fs::write(dir.join("notes.txt"), b"keep me").unwrap();
    std::fs::write(dir.join("story.json"), b"{}").unwrap();

    let cfg = StoryConfig {
        assets: AssetPaths {
            background: dir.join("background.png"),
            product: Some(dir.join("product.png")),
        },
        frames_dir: dir.clone(),
        output: dir.join("out").join("story.mp4"),
        ..config(Storyboard::Showcase)
    };
    (dir, cfg)
}

#[test]
fn cleanup_after_encode_removes_only_the_frame_series() {
    let (dir, cfg) = story_on_disk("shared_dir");
    let report = run_with_encoder(&cfg, RenderThreading::default(), "true").unwrap();

    assert_eq!(report.stats.frames_rendered, 8);
    assert!(!report.frames_kept);
    for f in 0..8 {
        assert!(!dir.join(format!("frame_{f:04}.png")).exists(), "frame {f}");
    }
    assert!(dir.join("notes.txt").exists());
    assert!(dir.join("story.json").exists());
    assert!(dir.join("background.png").exists());
    assert!(dir.join("product.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cleanup_removes_a_dedicated_frames_directory() {
    let (dir, mut cfg) = story_on_disk("dedicated");
    cfg.frames_dir = dir.join("frames");
    let report = run_with_encoder(&cfg, RenderThreading::default(), "true").unwrap();
    assert!(!report.frames_kept);
    assert!(!cfg.frames_dir.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn keep_frames_and_encoder_failure_leave_frames_on_disk() {
    let (dir, mut cfg) = story_on_disk("kept");
    cfg.frames_dir = dir.join("frames");
    cfg.keep_frames = true;
    let report = run_with_encoder(&cfg, RenderThreading::default(), "true").unwrap();
    assert!(report.frames_kept);
    assert!(cfg.frames_dir.join("frame_0007.png").exists());

    cfg.keep_frames = false;
    let err = run_with_encoder(&cfg, RenderThreading::default(), "false").unwrap_err();
    assert!(err.is_encode());
    assert!(cfg.frames_dir.join("frame_0000.png").exists());
    assert!(cfg.frames_dir.join("frame_0007.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn text_renders_without_configured_font_files() {
    let mut cfg = config(Storyboard::Showcase);
    cfg.fonts = crate::assets::font::FontPaths {
        bold: "/no/such/bold.ttf".into(),
        regular: "/no/such/regular.ttf".into(),
    };
    let with_text =
        StoryRenderer::new(&cfg, &store(), FontBook::load(&cfg.fonts)).unwrap();
    let without_text = renderer(Storyboard::Showcase);
    // Frame 5 is the price highlight: white disc plus price and caption labels.
    let a = with_text
        .render_frame(&mut with_text.worker(), FrameIndex(5))
        .unwrap();
    let b = without_text
        .render_frame(&mut without_text.worker(), FrameIndex(5))
        .unwrap();
    assert_ne!(a, b);
}
