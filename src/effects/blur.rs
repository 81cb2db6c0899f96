use crate::assets::raster::RasterImage;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::rgba8_len;

/// Gaussian blur parameters in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurSpec {
    /// Kernel half-width; the blurred content spreads at most this far.
    pub radius: u32,
    pub sigma: f32,
}

impl BlurSpec {
    /// Kernel covering three standard deviations.
    pub fn from_sigma(sigma: f32) -> Self {
        Self {
            radius: (sigma * 3.0).ceil().max(0.0) as u32,
            sigma,
        }
    }
}

/// Pad `img` by the blur radius on every side and blur it.
///
/// The result is `2 * radius` wider and taller; its content sits `radius` pixels right of and
/// below where `img` was.
pub fn blur_padded(img: &RasterImage, spec: BlurSpec) -> ReelResult<RasterImage> {
    let r = spec.radius;
    let width = img
        .width
        .checked_add(2 * r)
        .ok_or_else(|| ReelError::render("blurred image too wide"))?;
    let height = img
        .height
        .checked_add(2 * r)
        .ok_or_else(|| ReelError::render("blurred image too tall"))?;
    let mut padded = RasterImage::transparent(width, height)?;
    let src_stride = img.width as usize * 4;
    let dst_stride = width as usize * 4;
    for y in 0..img.height as usize {
        let s = y * src_stride;
        let d = (y + r as usize) * dst_stride + r as usize * 4;
        padded.data[d..d + src_stride].copy_from_slice(&img.data[s..s + src_stride]);
    }
    let data = blur_rgba8_premul(&padded.data, width, height, r, spec.sigma)?;
    RasterImage::from_premul(width, height, data)
}

pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ReelResult<Vec<u8>> {
    let expected_len =
        rgba8_len(width, height).ok_or_else(|| ReelError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ReelError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ReelResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ReelError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(ReelError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
