use std::borrow::Cow;

use crate::assets::font::{FontBook, FontRole};
use crate::assets::raster::RasterImage;
use crate::effects::blur::{BlurSpec, blur_padded};
use crate::effects::composite::blit_over;
use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::render::shape::to_u16_size;

/// Transparent margin around rasterized text so anti-aliased edges are not clipped.
const GLYPH_PAD: u32 = 2;

/// How a [`TextSpec`] anchor point maps onto the measured text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor is the top-left corner of the box.
    #[default]
    TopLeft,
    /// Anchor is the center of the box.
    Center,
}

/// Drop shadow drawn under a text's foreground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    pub offset: Vec2,
    pub color: Rgba8,
    pub blur: Option<BlurSpec>,
}

/// One piece of text to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub font: FontRole,
    pub size_px: f32,
    /// Fill color; its alpha fades the text.
    pub color: Rgba8,
    pub anchor: Point,
    pub anchor_mode: TextAnchor,
    pub shadow: Option<TextShadow>,
}

impl TextSpec {
    /// Text centered on `anchor`.
    pub fn centered(
        text: impl Into<String>,
        font: FontRole,
        size_px: f32,
        color: Rgba8,
        anchor: Point,
    ) -> Self {
        Self {
            text: text.into(),
            font,
            size_px,
            color,
            anchor,
            anchor_mode: TextAnchor::Center,
            shadow: None,
        }
    }

    pub fn with_shadow(mut self, shadow: TextShadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.color = self.color.with_alpha(alpha);
        if let Some(shadow) = &mut self.shadow {
            shadow.color = shadow
                .color
                .with_alpha(((u16::from(shadow.color.a) * u16::from(alpha) + 127) / 255) as u8);
        }
        self
    }
}

/// Measured text box in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

struct RoleFont {
    font_ctx: parley::FontContext,
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Per-worker text shaping state.
///
/// Parley contexts are not shareable across threads; each frame worker owns one engine built from
/// the shared [`FontBook`].
pub struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    bold: Option<RoleFont>,
    regular: Option<RoleFont>,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("bold", &self.bold.as_ref().map(|r| &r.family))
            .field("regular", &self.regular.as_ref().map(|r| &r.family))
            .finish()
    }
}

impl TextLayoutEngine {
    pub fn new(book: &FontBook) -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            bold: role_font(book, FontRole::Bold),
            regular: role_font(book, FontRole::Regular),
        }
    }

    /// Size of the text box; zero when the role has no usable face.
    pub fn measure(&mut self, spec: &TextSpec) -> ReelResult<TextExtent> {
        Ok(self
            .layout(spec)?
            .map(|(layout, _)| extent(&layout))
            .unwrap_or_default())
    }

    /// Draw shadow then foreground onto `frame`, scaled by `opacity`.
    pub fn draw(&mut self, frame: &mut FrameRGBA, spec: &TextSpec, opacity: f32) -> ReelResult<()> {
        if opacity <= 0.0 || spec.text.is_empty() {
            return Ok(());
        }
        let Some((layout, font)) = self.layout(spec)? else {
            return Ok(());
        };
        let ext = extent(&layout);
        if ext.width <= 0.0 || ext.height <= 0.0 {
            return Ok(());
        }
        let top_left = match spec.anchor_mode {
            TextAnchor::TopLeft => spec.anchor,
            TextAnchor::Center => Point::new(
                spec.anchor.x - f64::from(ext.width) / 2.0,
                spec.anchor.y - f64::from(ext.height) / 2.0,
            ),
        };
        let x = top_left.x.floor() as i32 - GLYPH_PAD as i32;
        let y = top_left.y.floor() as i32 - GLYPH_PAD as i32;

        if let Some(shadow) = spec.shadow
            && shadow.color.a > 0
        {
            let img = rasterize(&layout, &font, ext, shadow.color)?;
            let (sx, sy) = (
                x + shadow.offset.x.round() as i32,
                y + shadow.offset.y.round() as i32,
            );
            match shadow.blur {
                Some(b) if b.radius > 0 => {
                    let blurred = blur_padded(&img, b)?;
                    let r = b.radius as i32;
                    blit(frame, &blurred, sx - r, sy - r, opacity)?;
                }
                _ => blit(frame, &img, sx, sy, opacity)?,
            }
        }
        if spec.color.a > 0 {
            let img = rasterize(&layout, &font, ext, spec.color)?;
            blit(frame, &img, x, y, opacity)?;
        }
        Ok(())
    }

    fn layout(
        &mut self,
        spec: &TextSpec,
    ) -> ReelResult<Option<(parley::Layout<TextBrushRgba8>, vello_cpu::peniko::FontData)>> {
        if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let role = match spec.font {
            FontRole::Bold => self.bold.as_mut(),
            FontRole::Regular => self.regular.as_mut(),
        };
        let Some(role) = role else {
            return Ok(None);
        };
        let weight = match spec.font {
            FontRole::Bold => parley::style::FontWeight::BOLD,
            FontRole::Regular => parley::style::FontWeight::NORMAL,
        };

        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut role.font_ctx, &spec.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(role.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::default()));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&spec.text);
        layout.break_all_lines(None);
        Ok(Some((layout, role.font.clone())))
    }
}

fn role_font(book: &FontBook, role: FontRole) -> Option<RoleFont> {
    let face = book.face(role)?;
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx.collection.register_fonts(
        parley::fontique::Blob::from(face.bytes.as_ref().clone()),
        None,
    );
    let family = families
        .first()
        .and_then(|(id, _)| font_ctx.collection.family_name(*id))
        .map(str::to_string);
    let Some(family) = family else {
        tracing::warn!(?role, origin = ?face.origin, "font data has no usable family; text skipped");
        return None;
    };
    tracing::debug!(?role, family = %family, "registered font");
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
        face.index,
    );
    Some(RoleFont {
        font_ctx,
        family,
        font,
    })
}

fn extent(layout: &parley::Layout<TextBrushRgba8>) -> TextExtent {
    let mut out = TextExtent::default();
    for line in layout.lines() {
        let m = line.metrics();
        out.width = out.width.max(m.advance);
        out.height += m.ascent + m.descent + m.leading;
    }
    out
}

fn rasterize(
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    ext: TextExtent,
    color: Rgba8,
) -> ReelResult<RasterImage> {
    let width = ext.width.ceil() as u32 + 2 * GLYPH_PAD;
    let height = ext.height.ceil() as u32 + 2 * GLYPH_PAD;
    let (w16, h16) = to_u16_size(width, height)?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(GLYPH_PAD),
        f64::from(GLYPH_PAD),
    )));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let mut pen_x = run.offset();
            let baseline = run.baseline();
            let glyphs: Vec<vello_cpu::Glyph> = run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: pen_x + g.x,
                        y: baseline - g.y,
                    };
                    pen_x += g.advance;
                    glyph
                })
                .collect();
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs.into_iter());
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    RasterImage::from_premul(width, height, pixmap.data_as_u8_slice().to_vec())
}

fn blit(frame: &mut FrameRGBA, img: &RasterImage, x: i32, y: i32, opacity: f32) -> ReelResult<()> {
    blit_over(&mut frame.data, frame.width, frame.height, img, x, y, opacity)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
