//! Target image decoding and mosaic export

use crate::io::configuration::OUTPUT_SUFFIX;
use crate::io::error::{MosaicError, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Decode the target photograph as 8-bit RGB
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_target(path: &Path) -> Result<RgbImage> {
    let decoded = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(decoded.to_rgb8())
}

/// Save a finished mosaic, creating parent directories as needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The mosaic is empty (the target was smaller than one tile)
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_mosaic(mosaic: &RgbImage, output_path: &Path) -> Result<()> {
    if mosaic.width() == 0 || mosaic.height() == 0 {
        return Err(MosaicError::InvalidSourceData {
            reason: "Mosaic is empty; the target is smaller than one tile".to_string(),
        });
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    mosaic
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Default output location: `<stem>_mosaic.<ext>` beside the target
pub fn default_output_path(target: &Path) -> PathBuf {
    let stem = target.file_stem().unwrap_or_default();
    let extension = target
        .extension()
        .map_or_else(|| "jpg".into(), |ext| ext.to_string_lossy());
    let output_name = format!("{}{}.{}", stem.to_string_lossy(), OUTPUT_SUFFIX, extension);

    if let Some(parent) = target.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
