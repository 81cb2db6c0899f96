use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::raster::RasterImage;
use crate::foundation::error::{ReelError, ReelResult};

/// Logical names of the source images a story is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Storefront / poster photo.
    Background,
    /// Product packshot.
    Product,
}

impl AssetKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Product => "product",
        }
    }
}

/// Decoded source image in straight-alpha RGBA8. Immutable once loaded.
#[derive(Debug)]
pub struct SourceImage {
    rgba: image::RgbaImage,
}

impl SourceImage {
    pub fn new(rgba: image::RgbaImage) -> ReelResult<Self> {
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(ReelError::asset("source image has zero width or height"));
        }
        Ok(Self { rgba })
    }

    /// Decode an encoded image (PNG, JPEG, WebP, ...) from memory.
    pub fn decode(bytes: &[u8]) -> ReelResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| ReelError::asset(format!("decode image from memory: {e}")))?;
        Self::new(dyn_img.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Resample to exactly `width x height` (Lanczos3) into a new premultiplied image.
    pub fn resized(&self, width: u32, height: u32) -> ReelResult<RasterImage> {
        if width == 0 || height == 0 {
            return Err(ReelError::render(format!(
                "cannot resize source image to {width}x{height}"
            )));
        }
        let out = if width == self.width() && height == self.height() {
            self.rgba.clone()
        } else {
            image::imageops::resize(
                &self.rgba,
                width,
                height,
                image::imageops::FilterType::Lanczos3,
            )
        };
        RasterImage::from_straight(width, height, out.into_raw())
    }
}

/// Height matching `target_w` for a `src_w x src_h` image, truncated and at least 1.
pub fn scaled_height(src_w: u32, src_h: u32, target_w: u32) -> u32 {
    let h = f64::from(src_h) * (f64::from(target_w) / f64::from(src_w.max(1)));
    (h as u32).max(1)
}

/// Source image locations.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetPaths {
    /// Background / poster photo.
    pub background: PathBuf,
    /// Product packshot; required by storyboards that show the product.
    #[serde(default)]
    pub product: Option<PathBuf>,
}

/// Read-only store of the decoded source images, loaded once per run.
#[derive(Clone, Debug)]
pub struct AssetStore {
    background: Arc<SourceImage>,
    product: Option<Arc<SourceImage>>,
}

impl AssetStore {
    /// Load every configured image. Any missing or undecodable file is fatal.
    #[tracing::instrument(skip_all)]
    pub fn load(paths: &AssetPaths) -> ReelResult<Self> {
        let background = Arc::new(load_image_file(AssetKind::Background, &paths.background)?);
        let product = match paths.product.as_deref() {
            Some(p) => Some(Arc::new(load_image_file(AssetKind::Product, p)?)),
            None => None,
        };
        Ok(Self {
            background,
            product,
        })
    }

    /// Build a store from already decoded images.
    pub fn from_images(background: SourceImage, product: Option<SourceImage>) -> Self {
        Self {
            background: Arc::new(background),
            product: product.map(Arc::new),
        }
    }

    /// Look up an image by logical name.
    pub fn get(&self, kind: AssetKind) -> ReelResult<&Arc<SourceImage>> {
        match kind {
            AssetKind::Background => Ok(&self.background),
            AssetKind::Product => self.product.as_ref().ok_or_else(|| {
                ReelError::asset("product image is required but was not configured")
            }),
        }
    }

    pub fn has(&self, kind: AssetKind) -> bool {
        self.get(kind).is_ok()
    }
}

fn load_image_file(kind: AssetKind, path: &Path) -> ReelResult<SourceImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        ReelError::asset(format!(
            "failed to read {} image '{}': {e}",
            kind.name(),
            path.display()
        ))
    })?;
    let img = SourceImage::decode(&bytes).map_err(|e| {
        ReelError::asset(format!(
            "failed to load {} image '{}': {e}",
            kind.name(),
            path.display()
        ))
    })?;
    tracing::debug!(
        asset = kind.name(),
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "loaded source image"
    );
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
