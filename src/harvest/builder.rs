//! Builds a tile database directory from raw photographs
//!
//! Each photograph is passed through a [`FaceDetector`]; every detected
//! region is clamped to the frame, pan-scanned to the tile aspect ratio and
//! written as a new JPEG with a random name. Source photographs are only read.

use crate::database::TileDatabase;
use crate::harvest::detector::FaceDetector;
use crate::harvest::pan_scan::pan_scan;
use crate::io::configuration::HARVEST_EXTENSION;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::{RgbImage, imageops};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Counts gathered while harvesting a directory
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Photographs found in the source directory
    pub files_scanned: usize,
    /// Photographs that could not be decoded
    pub files_skipped: usize,
    /// Tiles written to the destination directory
    pub crops_written: usize,
}

/// Detector-driven database builder
pub struct DatabaseBuilder<D> {
    detector: D,
    tile_width: u32,
    tile_height: u32,
}

impl<D: FaceDetector> DatabaseBuilder<D> {
    /// Create a builder cropping to `tile_width` x `tile_height` proportions
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either tile dimension is zero
    pub fn new(detector: D, tile_width: u32, tile_height: u32) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &format!("{tile_width}x{tile_height}"),
                &"must be non-empty",
            ));
        }
        Ok(Self {
            detector,
            tile_width,
            tile_height,
        })
    }

    /// Harvest every photograph in `source` into `destination`
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read or created, the
    /// detector fails, or a crop cannot be written
    pub fn build(&mut self, source: &Path, destination: &Path) -> Result<HarvestSummary> {
        self.build_with_progress(source, destination, |_| {})
    }

    /// Harvest every photograph, reporting each file before it is decoded
    ///
    /// Photographs that fail to decode are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read or created, the
    /// detector fails, or a crop cannot be written
    #[tracing::instrument(skip(self, on_file))]
    pub fn build_with_progress<F>(
        &mut self,
        source: &Path,
        destination: &Path,
        mut on_file: F,
    ) -> Result<HarvestSummary>
    where
        F: FnMut(&Path),
    {
        std::fs::create_dir_all(destination).map_err(|e| MosaicError::FileSystem {
            path: destination.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;

        let files = TileDatabase::scan_directory(source)?;
        info!(files = files.len(), "Scanning photographs");

        let mut summary = HarvestSummary {
            files_scanned: files.len(),
            ..HarvestSummary::default()
        };
        for path in files {
            on_file(&path);
            match image::open(&path) {
                Ok(decoded) => {
                    summary.crops_written += self.harvest_image(&decoded.to_rgb8(), destination)?;
                }
                Err(error) => {
                    summary.files_skipped += 1;
                    warn!(path = %path.display(), %error, "Skipping unreadable photograph");
                }
            }
        }

        info!(
            crops = summary.crops_written,
            skipped = summary.files_skipped,
            "Harvest done"
        );
        Ok(summary)
    }

    /// Detect regions in one photograph and write a tile for each
    ///
    /// Returns the number of tiles written.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector fails or a tile cannot be saved
    pub fn harvest_image(&mut self, image: &RgbImage, destination: &Path) -> Result<usize> {
        let (width, height) = image.dimensions();
        let regions = self.detector.detect(image)?;

        let mut written = 0;
        for region in &regions {
            let Some(region) = region.clamp_to(width, height) else {
                continue;
            };
            let face =
                imageops::crop_imm(image, region.x, region.y, region.width, region.height)
                    .to_image();
            let tile = pan_scan(&face, self.tile_width, self.tile_height);

            let path = Self::tile_path(destination);
            tile.save(&path)
                .map_err(|e| MosaicError::ImageExport { path, source: e })?;
            written += 1;
        }

        debug!(regions = regions.len(), written, "Photograph harvested");
        Ok(written)
    }

    /// Detector in use
    pub const fn detector(&self) -> &D {
        &self.detector
    }

    fn tile_path(destination: &Path) -> PathBuf {
        let id: u128 = rand::random();
        destination.join(format!("{id:032x}.{HARVEST_EXTENSION}"))
    }
}
