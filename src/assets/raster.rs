use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{premultiply_rgba8_in_place, rgba8_len};

/// Premultiplied RGBA8 pixels produced by a transform or rasterization step.
///
/// Every transform returns a new image; inputs are never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Wrap premultiplied bytes, checking their length against the dimensions.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        let expected = rgba8_len(width, height)
            .ok_or_else(|| ReelError::validation("raster buffer size overflow"))?;
        if data.len() != expected {
            return Err(ReelError::validation(format!(
                "raster buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Premultiply straight-alpha bytes.
    pub fn from_straight(width: u32, height: u32, mut data: Vec<u8>) -> ReelResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul(width, height, data)
    }

    /// Image filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> ReelResult<Self> {
        let len = rgba8_len(width, height)
            .ok_or_else(|| ReelError::validation("raster buffer size overflow"))?;
        let px = color.to_premul();
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / 4) {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent image.
    pub fn transparent(width: u32, height: u32) -> ReelResult<Self> {
        let len = rgba8_len(width, height)
            .ok_or_else(|| ReelError::validation("raster buffer size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Return `true` when every pixel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// Pixel at `(x, y)` as premultiplied RGBA8.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Scale color channels by `factor` (0 = black, 1 = unchanged), like a brightness enhancer.
    pub fn with_brightness(&self, factor: f32) -> RasterImage {
        let factor = if factor.is_finite() {
            factor.max(0.0)
        } else {
            1.0
        };
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            for c in &mut px[..3] {
                let v = (f32::from(*c) * factor) as u32;
                *c = v.min(u32::from(a)) as u8;
            }
        }
        RasterImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Crop the top-left `width x height` window, padding missing area with `fill`.
    pub fn crop_or_pad(&self, width: u32, height: u32, fill: Rgba8) -> ReelResult<RasterImage> {
        let mut out = RasterImage::solid(width, height, fill)?;
        let copy_w = width.min(self.width) as usize;
        let copy_h = height.min(self.height) as usize;
        let src_stride = self.width as usize * 4;
        let dst_stride = width as usize * 4;
        for y in 0..copy_h {
            let s = y * src_stride;
            let d = y * dst_stride;
            out.data[d..d + copy_w * 4].copy_from_slice(&self.data[s..s + copy_w * 4]);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
