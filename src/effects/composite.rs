use crate::assets::raster::RasterImage;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel, with the source scaled by `opacity`.
///
/// Zero opacity or a fully transparent source leaves `dst` unchanged.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [
            mul_div255(u16::from(src[0]), op),
            mul_div255(u16::from(src[1]), op),
            mul_div255(u16::from(src[2]), op),
            255,
        ];
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ReelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ReelError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` onto a `dst_w x dst_h` buffer with its top-left corner at `(x, y)`.
///
/// Parts of the source outside the destination are clipped; offsets may be negative.
pub fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &RasterImage,
    x: i32,
    y: i32,
    opacity: f32,
) -> ReelResult<()> {
    let expected = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ReelError::render("blit destination size overflow"))?;
    if dst.len() != expected {
        return Err(ReelError::render(
            "blit_over expects dst matching width*height*4",
        ));
    }
    if opacity <= 0.0 || src.width == 0 || src.height == 0 {
        return Ok(());
    }

    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(src.width)).min(i64::from(dst_w));
    let y1 = (i64::from(y) + i64::from(src.height)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let span = ((x1 - x0) as usize) * 4;
    let copy_rows = opacity >= 1.0 && src.is_opaque();
    for dy in y0..y1 {
        let sy = (dy - i64::from(y)) as usize;
        let sx = (x0 - i64::from(x)) as usize;
        let s_off = (sy * src.width as usize + sx) * 4;
        let d_off = (dy as usize * dst_w as usize + x0 as usize) * 4;
        let s_row = &src.data[s_off..s_off + span];
        let d_row = &mut dst[d_off..d_off + span];
        if copy_rows {
            d_row.copy_from_slice(s_row);
        } else {
            over_in_place(d_row, s_row, opacity)?;
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
