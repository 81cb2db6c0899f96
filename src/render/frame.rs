use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{mul_div255_u8, rgba8_len};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag keeps that explicit at API
/// boundaries such as sinks that need straight color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fresh canvas filled with a base color.
    pub fn new_filled(canvas: Canvas, color: Rgba8) -> ReelResult<Self> {
        let len = rgba8_len(canvas.width, canvas.height)
            .ok_or_else(|| ReelError::validation("frame buffer size overflow"))?;
        let px = color.to_premul();
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / 4) {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Opaque RGB8 bytes: flattened over black, alpha dropped.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            if self.premultiplied || px[3] == 255 {
                out.extend_from_slice(&px[..3]);
            } else {
                let a = u16::from(px[3]);
                out.extend(px[..3].iter().map(|&c| mul_div255_u8(u16::from(c), a)));
            }
        }
        out
    }

    /// Encode as a lossless RGB8 PNG.
    pub fn encode_png(&self) -> ReelResult<Vec<u8>> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8())
            .ok_or_else(|| ReelError::render("frame buffer does not match its dimensions"))?;
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| ReelError::render(format!("png encode failed: {e}")))?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
