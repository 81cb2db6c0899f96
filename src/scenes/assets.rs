use std::sync::Arc;

use crate::assets::raster::RasterImage;
use crate::assets::store::{AssetKind, AssetStore, SourceImage, scaled_height};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scenes::Storyboard;

/// Frame-independent images derived once per run from the [`AssetStore`].
///
/// Only the product is resized per frame (its size animates); everything else is fixed.
#[derive(Clone, Debug, Default)]
pub struct SceneAssets {
    product: Option<Arc<SourceImage>>,
    details_backdrop: Option<Arc<RasterImage>>,
    closing_backdrop: Option<Arc<RasterImage>>,
    poster: Option<(Arc<RasterImage>, (i32, i32))>,
}

impl SceneAssets {
    #[tracing::instrument(skip(store))]
    pub fn prepare(store: &AssetStore, canvas: Canvas, storyboard: Storyboard) -> ReelResult<Self> {
        let background = store.get(AssetKind::Background)?;
        let Canvas { width, height } = canvas;
        match storyboard {
            Storyboard::Showcase => {
                let product = Arc::clone(store.get(AssetKind::Product)?);

                let details_backdrop = background
                    .resized(width, (f64::from(height) * 0.5) as u32)?
                    .with_brightness(0.4);

                let closing_h = scaled_height(background.width(), background.height(), width);
                let closing_backdrop = background
                    .resized(width, closing_h)?
                    .crop_or_pad(width, height, Rgba8::BLACK)?
                    .with_brightness(0.3);

                tracing::debug!(closing_h, "prepared showcase backdrops");
                Ok(Self {
                    product: Some(product),
                    details_backdrop: Some(Arc::new(details_backdrop)),
                    closing_backdrop: Some(Arc::new(closing_backdrop)),
                    poster: None,
                })
            }
            Storyboard::Tasting => {
                let (pw, ph) = fit_inside(background.width(), background.height(), canvas);
                let poster = background.resized(pw, ph)?;
                let origin = (
                    (width as i32 - pw as i32).div_euclid(2),
                    (height as i32 - ph as i32).div_euclid(2),
                );
                tracing::debug!(pw, ph, ?origin, "prepared tasting poster");
                Ok(Self {
                    poster: Some((Arc::new(poster), origin)),
                    ..Self::default()
                })
            }
        }
    }

    pub fn product(&self) -> ReelResult<&Arc<SourceImage>> {
        self.product.as_ref().ok_or_else(|| missing("product"))
    }

    pub fn details_backdrop(&self) -> ReelResult<&Arc<RasterImage>> {
        self.details_backdrop
            .as_ref()
            .ok_or_else(|| missing("details backdrop"))
    }

    pub fn closing_backdrop(&self) -> ReelResult<&Arc<RasterImage>> {
        self.closing_backdrop
            .as_ref()
            .ok_or_else(|| missing("closing backdrop"))
    }

    /// Fitted poster and its top-left placement.
    pub fn poster(&self) -> ReelResult<(&Arc<RasterImage>, (i32, i32))> {
        self.poster
            .as_ref()
            .map(|(img, origin)| (img, *origin))
            .ok_or_else(|| missing("poster"))
    }
}

/// Largest size with the source aspect ratio that fits inside `canvas`.
pub fn fit_inside(src_w: u32, src_h: u32, canvas: Canvas) -> (u32, u32) {
    let aspect = f64::from(src_w) / f64::from(src_h.max(1));
    let canvas_aspect = f64::from(canvas.width) / f64::from(canvas.height.max(1));
    if aspect > canvas_aspect {
        let h = (f64::from(canvas.width) / aspect) as u32;
        (canvas.width, h.max(1))
    } else {
        let w = (f64::from(canvas.height) * aspect) as u32;
        (w.max(1), canvas.height)
    }
}

fn missing(what: &str) -> ReelError {
    ReelError::render(format!("{what} was not prepared for this storyboard"))
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/assets.rs"]
mod tests;
