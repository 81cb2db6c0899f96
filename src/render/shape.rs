use crate::animation::tween::lerp_rgba;
use crate::assets::raster::RasterImage;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::rgba8_len;

/// Outline ring drawn around a disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    pub color: Rgba8,
    pub width: f64,
}

/// Vertical gradient, `top` on the first row and `bottom` approached on the last.
///
/// Row `y` uses `t = y / height` with per-channel truncating interpolation.
pub fn vertical_gradient(
    width: u32,
    height: u32,
    top: Rgba8,
    bottom: Rgba8,
) -> ReelResult<RasterImage> {
    let len = rgba8_len(width, height)
        .ok_or_else(|| ReelError::render("gradient buffer size overflow"))?;
    let mut data = Vec::with_capacity(len);
    let row_px = width as usize;
    for y in 0..height {
        let t = f64::from(y) / f64::from(height);
        let px = lerp_rgba(top, bottom, t).to_premul();
        for _ in 0..row_px {
            data.extend_from_slice(&px);
        }
    }
    RasterImage::from_premul(width, height, data)
}

/// Anti-aliased vector shapes rasterized with `vello_cpu` into standalone images.
#[derive(Clone, Copy, Debug)]
pub struct ShapeRasterizer {
    /// Flattening tolerance for curved outlines.
    tolerance: f64,
}

impl Default for ShapeRasterizer {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl ShapeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounded_rect(
        &self,
        width: u32,
        height: u32,
        radius: f64,
        color: Rgba8,
    ) -> ReelResult<RasterImage> {
        let rr = vello_cpu::kurbo::RoundedRect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
            radius,
        );
        self.fill(width, height, |ctx| {
            set_color(ctx, color);
            ctx.fill_path(&to_path(rr, self.tolerance));
        })
    }

    /// Ellipse inscribed in a `width x height` box.
    pub fn ellipse(&self, width: u32, height: u32, color: Rgba8) -> ReelResult<RasterImage> {
        let (rx, ry) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let e = vello_cpu::kurbo::Ellipse::new((rx, ry), (rx, ry), 0.0);
        self.fill(width, height, |ctx| {
            set_color(ctx, color);
            ctx.fill_path(&to_path(e, self.tolerance));
        })
    }

    /// Filled circle of `radius`, optionally ringed by an outline of the given width.
    ///
    /// The image is `2 * radius` square; the outline occupies the outer ring.
    pub fn disc(
        &self,
        radius: u32,
        fill: Rgba8,
        outline: Option<Outline>,
    ) -> ReelResult<RasterImage> {
        let size = radius
            .checked_mul(2)
            .ok_or_else(|| ReelError::render("disc radius too large"))?;
        let r = f64::from(radius);
        self.fill(size, size, |ctx| {
            let center = (r, r);
            let inner = match outline {
                Some(o) => {
                    set_color(ctx, o.color);
                    let ring = vello_cpu::kurbo::Circle::new(center, r);
                    ctx.fill_path(&to_path(ring, self.tolerance));
                    (r - o.width).max(0.0)
                }
                None => r,
            };
            set_color(ctx, fill);
            ctx.fill_path(&to_path(
                vello_cpu::kurbo::Circle::new(center, inner),
                self.tolerance,
            ));
        })
    }

    fn fill(
        &self,
        width: u32,
        height: u32,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> ReelResult<RasterImage> {
        if width == 0 || height == 0 {
            return RasterImage::transparent(width, height);
        }
        let (w16, h16) = to_u16_size(width, height)?;
        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        draw(&mut ctx);
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        RasterImage::from_premul(width, height, pixmap.data_as_u8_slice().to_vec())
    }
}

pub(crate) fn to_u16_size(width: u32, height: u32) -> ReelResult<(u16, u16)> {
    let w = u16::try_from(width)
        .map_err(|_| ReelError::render(format!("raster width {width} exceeds u16")))?;
    let h = u16::try_from(height)
        .map_err(|_| ReelError::render(format!("raster height {height} exceeds u16")))?;
    Ok((w, h))
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn to_path(shape: impl vello_cpu::kurbo::Shape, tolerance: f64) -> vello_cpu::kurbo::BezPath {
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(tolerance) {
        p.push(el);
    }
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
