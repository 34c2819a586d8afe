pub mod geojson;
pub mod output;

use std::{fs, path::Path};

use image::GrayImage;
use crate::error::{FenceError, Result};

pub use output::*;

/// Decode an image file into a single-channel grayscale raster.
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let image = image::open(path).map_err(|source| FenceError::ImageLoad {
        path: path.display().to_string(),
        source,
    })?;
    Ok(image.to_luma8())
}

/// Write through a sibling temporary file so readers never see a partial file.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp, bytes)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}
