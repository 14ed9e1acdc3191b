//! PNG codec boundary. The engine itself only ever sees `RgbaImage` buffers;
//! everything that touches a file goes through here.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::compare::mask::Mask;
use crate::error::{Error, Result};

/// Read and decode an image file, normalized to RGBA8.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Write `img` as PNG, whatever extension `path` carries. Missing parent
/// directories are created.
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "wrote image");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Location of a persisted mask. The file is shared between runs and is not
/// locked; callers comparing against the same mask must not run concurrently.
#[derive(Debug, Clone)]
pub struct MaskFile {
    path: PathBuf,
}

impl MaskFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no mask has been stored yet.
    pub fn load(&self) -> Result<Option<RgbaImage>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load(&self.path).map(Some)
    }

    pub fn store(&self, mask: &Mask) -> Result<()> {
        save_png(mask.image(), &self.path)
    }
}
