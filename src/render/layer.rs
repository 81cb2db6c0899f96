use std::sync::Arc;

use smallvec::SmallVec;

use crate::assets::font::FontBook;
use crate::assets::raster::RasterImage;
use crate::effects::blur::{BlurSpec, blur_padded};
use crate::effects::composite::blit_over;
use crate::foundation::core::Rgba8;
use crate::foundation::error::ReelResult;
use crate::render::frame::FrameRGBA;
use crate::render::shape::{Outline, ShapeRasterizer, vertical_gradient};
use crate::render::text::{TextLayoutEngine, TextSpec};

/// Ordered layers for one frame; index 0 is painted first.
pub type LayerStack = SmallVec<[Layer; 16]>;

/// What a layer paints, in its own `width x height` box unless noted.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerContent {
    Image(Arc<RasterImage>),
    Solid {
        width: u32,
        height: u32,
        color: Rgba8,
    },
    VerticalGradient {
        width: u32,
        height: u32,
        top: Rgba8,
        bottom: Rgba8,
    },
    RoundedRect {
        width: u32,
        height: u32,
        radius: f64,
        color: Rgba8,
    },
    Ellipse {
        width: u32,
        height: u32,
        color: Rgba8,
    },
    /// Circle with its bounding box at the layer origin.
    Disc {
        radius: u32,
        fill: Rgba8,
        outline: Option<Outline>,
    },
    /// Positioned by the text's own anchor; the layer origin is ignored.
    Text(TextSpec),
}

/// One entry of a [`LayerStack`].
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub content: LayerContent,
    /// Top-left placement on the canvas; may be negative or off-canvas.
    pub origin: (i32, i32),
    pub opacity: f32,
    pub blur: Option<BlurSpec>,
}

impl Layer {
    pub fn new(content: LayerContent, origin: (i32, i32)) -> Self {
        Self {
            content,
            origin,
            opacity: 1.0,
            blur: None,
        }
    }

    pub fn image(image: Arc<RasterImage>, origin: (i32, i32)) -> Self {
        Self::new(LayerContent::Image(image), origin)
    }

    pub fn text(spec: TextSpec) -> Self {
        Self::new(LayerContent::Text(spec), (0, 0))
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_blur(mut self, blur: BlurSpec) -> Self {
        self.blur = Some(blur);
        self
    }
}

/// Per-worker compositing state: text shaping contexts and a shape rasterizer.
///
/// One worker renders one frame at a time; parallel rendering creates one per rayon task.
#[derive(Debug)]
pub struct FrameWorker {
    text: TextLayoutEngine,
    shapes: ShapeRasterizer,
}

impl FrameWorker {
    pub fn new(fonts: &FontBook) -> Self {
        Self {
            text: TextLayoutEngine::new(fonts),
            shapes: ShapeRasterizer::new(),
        }
    }

    /// Paint `layers` onto `frame` in order with premultiplied source-over.
    pub fn composite(&mut self, frame: &mut FrameRGBA, layers: &[Layer]) -> ReelResult<()> {
        for layer in layers {
            self.paint(frame, layer)?;
        }
        Ok(())
    }

    fn paint(&mut self, frame: &mut FrameRGBA, layer: &Layer) -> ReelResult<()> {
        if layer.opacity <= 0.0 {
            return Ok(());
        }
        if let LayerContent::Text(spec) = &layer.content {
            return self.text.draw(frame, spec, layer.opacity);
        }

        let (x, y) = layer.origin;
        let owned;
        let img: &RasterImage = match &layer.content {
            LayerContent::Image(img) => img.as_ref(),
            other => {
                owned = self.rasterize(other)?;
                &owned
            }
        };
        match layer.blur {
            Some(b) if b.radius > 0 => {
                let blurred = blur_padded(img, b)?;
                let r = i32::try_from(b.radius).unwrap_or(i32::MAX);
                blit_over(
                    &mut frame.data,
                    frame.width,
                    frame.height,
                    &blurred,
                    x.saturating_sub(r),
                    y.saturating_sub(r),
                    layer.opacity,
                )
            }
            _ => blit_over(
                &mut frame.data,
                frame.width,
                frame.height,
                img,
                x,
                y,
                layer.opacity,
            ),
        }
    }

    fn rasterize(&mut self, content: &LayerContent) -> ReelResult<RasterImage> {
        match *content {
            LayerContent::Solid {
                width,
                height,
                color,
            } => RasterImage::solid(width, height, color),
            LayerContent::VerticalGradient {
                width,
                height,
                top,
                bottom,
            } => vertical_gradient(width, height, top, bottom),
            LayerContent::RoundedRect {
                width,
                height,
                radius,
                color,
            } => self.shapes.rounded_rect(width, height, radius, color),
            LayerContent::Ellipse {
                width,
                height,
                color,
            } => self.shapes.ellipse(width, height, color),
            LayerContent::Disc {
                radius,
                fill,
                outline,
            } => self.shapes.disc(radius, fill, outline),
            LayerContent::Image(_) | LayerContent::Text(_) => RasterImage::transparent(0, 0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
