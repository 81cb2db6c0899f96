use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn frame_range_chunks_cover_range_without_gaps() {
    let r = FrameRange::new(FrameIndex(3), FrameIndex(13)).unwrap();
    let chunks: Vec<_> = r.chunks(4).collect();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].start, FrameIndex(3));
    assert_eq!(chunks[2].end, FrameIndex(13));
    for pair in chunks.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(chunks.iter().map(|c| c.len_frames()).sum::<u64>(), 10);
}

#[test]
fn fps_total_frames_and_ffmpeg_rate() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_for_secs(15), 450);
    assert_eq!(fps.to_ffmpeg_rate(), "30");

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.to_ffmpeg_rate(), "30000/1001");
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn premul_scales_color_by_alpha() {
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::new(255, 0, 0, 128).to_premul(), [128, 0, 0, 128]);
    assert_eq!(Rgba8::WHITE.with_alpha(0).to_premul(), [0, 0, 0, 0]);
}
