use super::*;

fn showcase(total: u64) -> Timeline {
    Timeline::from_boundaries(total, &[0.27, 0.53, 0.8], vec![
        Scene::Reveal,
        Scene::Details,
        Scene::PriceHighlight,
        Scene::CallToAction,
    ])
    .unwrap()
}

#[test]
fn every_frame_has_progress_below_one() {
    let tl = showcase(450);
    for f in 0..450 {
        let pos = tl.resolve(FrameIndex(f)).unwrap();
        assert!((0.0..1.0).contains(&pos.progress));
        assert!((0.0..=1.0).contains(&pos.local));
    }
}

#[test]
fn segment_boundaries_at_450_frames() {
    let tl = showcase(450);

    let p0 = tl.resolve(FrameIndex(0)).unwrap();
    assert_eq!((p0.segment, p0.local), (0, 0.0));

    let p121 = tl.resolve(FrameIndex(121)).unwrap();
    assert_eq!(p121.segment, 0);
    assert!(p121.local > 0.99 && p121.local < 1.0);

    let p122 = tl.resolve(FrameIndex(122)).unwrap();
    assert_eq!(p122.segment, 1);
    assert!((p122.local - 0.004).abs() < 0.001, "{}", p122.local);
    assert_eq!(*tl.scene(&p122), Scene::Details);

    let last = tl.resolve(FrameIndex(449)).unwrap();
    assert_eq!(last.segment, 3);
}

#[test]
fn exactly_one_segment_per_progress() {
    let tl = showcase(450);
    for i in 0..=1000 {
        let p = f64::from(i) / 1000.0;
        let idx = tl.locate(p).unwrap();
        let matching = tl
            .segments()
            .iter()
            .filter(|s| s.range.start <= p && (p < s.range.end || (p == 1.0 && s.range.end == 1.0)))
            .count();
        assert_eq!(matching, 1);
        assert!(tl.segments()[idx].range.start <= p);
    }
    assert_eq!(tl.locate(1.0), Some(3));
    assert_eq!(tl.locate(f64::NAN), None);
    assert_eq!(tl.locate(-0.1), None);
}

#[test]
fn local_progress_starts_at_zero_on_each_boundary() {
    let tl = showcase(450);
    for s in tl.segments() {
        assert_eq!(s.range.local(s.range.start), 0.0);
        assert!(s.range.local(s.range.end - 1e-9) < 1.0);
    }
    for pair in tl.segments().windows(2) {
        assert_eq!(pair[0].range.end, pair[1].range.start);
    }
}

#[test]
fn out_of_range_frame_is_a_timeline_error() {
    let tl = showcase(450);
    let err = tl.resolve(FrameIndex(450)).unwrap_err();
    assert!(matches!(err, ReelError::Timeline { frame: 450, .. }));
}

#[test]
fn construction_rejects_bad_partitions() {
    let scenes = || vec![Scene::Reveal, Scene::Details];
    assert!(Timeline::from_boundaries(10, &[], scenes()).is_err());
    assert!(Timeline::from_boundaries(10, &[0.0], scenes()).is_err());
    assert!(Timeline::from_boundaries(10, &[1.0], scenes()).is_err());
    assert!(Timeline::from_boundaries(10, &[f64::NAN], scenes()).is_err());
    assert!(Timeline::from_boundaries(0, &[0.5], scenes()).is_err());
    assert!(validate_boundaries(&[0.5, 0.5]).is_err());
    assert!(validate_boundaries(&[0.6, 0.5]).is_err());

    let gap = vec![
        Segment {
            id: 0,
            range: ProgressRange::new(0.0, 0.4),
            scene: Scene::Reveal,
        },
        Segment {
            id: 1,
            range: ProgressRange::new(0.5, 1.0),
            scene: Scene::Details,
        },
    ];
    assert!(Timeline::new(10, gap).is_err());
    assert!(Timeline::new(10, Vec::new()).is_err());
}
