//! Font resolution for the two text roles a story uses.
//!
//! A configured font file that cannot be read or parsed is not an error: the role falls back to
//! the DejaVu Sans faces compiled into the crate, so text always renders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

static BUILTIN_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
static BUILTIN_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Typeface role requested by a text element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Bold,
    Regular,
}

/// Configured font files per role.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontPaths {
    pub bold: PathBuf,
    pub regular: PathBuf,
}

impl Default for FontPaths {
    fn default() -> Self {
        Self {
            bold: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            regular: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
        }
    }
}

/// Where a resolved face came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// The configured file.
    File(PathBuf),
    /// Face compiled into the crate.
    Builtin,
}

/// Raw font bytes plus the face index inside a collection.
#[derive(Clone, Debug)]
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
    pub origin: FontOrigin,
}

/// Resolved faces for every [`FontRole`]; shared read-only by all frame workers.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    bold: Option<FontFace>,
    regular: Option<FontFace>,
}

impl FontBook {
    /// Resolve both roles, falling back to the built-in faces where a file is unusable.
    #[tracing::instrument(skip_all)]
    pub fn load(paths: &FontPaths) -> Self {
        let resolve = |role: FontRole, path: &Path| -> Option<FontFace> {
            match read_face(path) {
                Ok(face) => return Some(face),
                Err(reason) => tracing::warn!(
                    ?role,
                    path = %path.display(),
                    %reason,
                    "font unavailable, using the built-in face"
                ),
            }
            builtin_face(role)
        };
        Self {
            bold: resolve(FontRole::Bold, &paths.bold),
            regular: resolve(FontRole::Regular, &paths.regular),
        }
    }

    /// Book holding only the built-in faces.
    pub fn builtin() -> Self {
        Self {
            bold: builtin_face(FontRole::Bold),
            regular: builtin_face(FontRole::Regular),
        }
    }

    /// Book without any face; all text measures and renders as empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn face(&self, role: FontRole) -> Option<&FontFace> {
        match role {
            FontRole::Bold => self.bold.as_ref(),
            FontRole::Regular => self.regular.as_ref(),
        }
    }
}

/// Index of the first face `fontdb` can parse out of `bytes`.
fn first_face_index(bytes: &[u8]) -> Option<u32> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.to_vec());
    db.faces().next().map(|f| f.index)
}

fn read_face(path: &Path) -> Result<FontFace, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let index = first_face_index(&bytes).ok_or_else(|| "not a parseable font".to_owned())?;
    Ok(FontFace {
        bytes: Arc::new(bytes),
        index,
        origin: FontOrigin::File(path.to_path_buf()),
    })
}

fn builtin_face(role: FontRole) -> Option<FontFace> {
    let bytes = match role {
        FontRole::Bold => BUILTIN_BOLD,
        FontRole::Regular => BUILTIN_REGULAR,
    };
    let Some(index) = first_face_index(bytes) else {
        tracing::error!(?role, "built-in font failed to parse; text for this role is skipped");
        return None;
    };
    Some(FontFace {
        bytes: Arc::new(bytes.to_vec()),
        index,
        origin: FontOrigin::Builtin,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
