use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(200, 0), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
}

#[test]
fn rgba8_len_detects_overflow() {
    assert_eq!(rgba8_len(2, 3), Some(24));
    assert_eq!(rgba8_len(0, 3), Some(0));
    assert_eq!(rgba8_len(u32::MAX, u32::MAX), None);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0
        ]
    );
}
