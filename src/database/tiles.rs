//! Tile database loading and normalisation
//!
//! Candidate images are decoded, resampled to one canonical size with a
//! Lanczos filter and stored alongside their mean colour. Insertion order is
//! the sorted directory scan order and never changes after loading.

use crate::io::configuration::has_database_extension;
use crate::io::error::{MosaicError, Result, dimension_mismatch, invalid_parameter};
use crate::math::color::MeanColor;
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A normalised candidate image and its matching key
#[derive(Clone, Debug)]
pub struct Tile {
    pixels: RgbImage,
    mean: MeanColor,
    source: Option<PathBuf>,
}

impl Tile {
    /// Pixel buffer at canonical size
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Mean colour of the normalised pixels
    pub const fn mean(&self) -> MeanColor {
        self.mean
    }

    /// File the tile was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Ordered collection of equally sized tiles
#[derive(Clone, Debug)]
pub struct TileDatabase {
    tiles: Vec<Tile>,
    tile_width: u32,
    tile_height: u32,
}

impl TileDatabase {
    /// Load every database image in a directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero in either dimension
    /// - The directory cannot be read
    /// - No file in the directory decodes successfully
    pub fn load(directory: &Path, tile_width: u32, tile_height: u32) -> Result<Self> {
        Self::load_with_progress(directory, tile_width, tile_height, |_| {})
    }

    /// Load every database image in a directory, reporting each file before it is decoded
    ///
    /// Files that fail to decode are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero in either dimension
    /// - The directory cannot be read
    /// - No file in the directory decodes successfully
    #[tracing::instrument(skip(on_file))]
    pub fn load_with_progress<F>(
        directory: &Path,
        tile_width: u32,
        tile_height: u32,
        mut on_file: F,
    ) -> Result<Self>
    where
        F: FnMut(&Path),
    {
        let mut database = Self::empty(tile_width, tile_height)?;
        let files = Self::scan_directory(directory)?;
        info!(files = files.len(), "Scanning tile database");

        let mut skipped = 0;
        for path in files {
            on_file(&path);
            match image::open(&path) {
                Ok(decoded) => database.insert(decoded.to_rgb8(), Some(path))?,
                Err(error) => {
                    skipped += 1;
                    warn!(path = %path.display(), %error, "Skipping unreadable tile");
                }
            }
        }

        if database.is_empty() {
            return Err(MosaicError::DatabaseEmpty {
                directory: directory.to_path_buf(),
                skipped,
            });
        }

        info!(tiles = database.len(), skipped, "Scanning done");
        Ok(database)
    }

    /// List the database candidates in a directory, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its entries cannot be read
    pub fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>> {
        let read_error = |source| MosaicError::FileSystem {
            path: directory.to_path_buf(),
            operation: "read directory",
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(directory).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && has_database_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Build a database from in-memory images, normalising each one
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is zero in either dimension or an
    /// image has no pixels
    pub fn from_images<I>(images: I, tile_width: u32, tile_height: u32) -> Result<Self>
    where
        I: IntoIterator<Item = RgbImage>,
    {
        let mut database = Self::empty(tile_width, tile_height)?;
        for image in images {
            database.insert(image, None)?;
        }
        Ok(database)
    }

    fn empty(tile_width: u32, tile_height: u32) -> Result<Self> {
        if tile_width == 0 {
            return Err(invalid_parameter("tile_width", &tile_width, &"must be > 0"));
        }
        if tile_height == 0 {
            return Err(invalid_parameter(
                "tile_height",
                &tile_height,
                &"must be > 0",
            ));
        }

        Ok(Self {
            tiles: Vec::new(),
            tile_width,
            tile_height,
        })
    }

    fn insert(&mut self, image: RgbImage, source: Option<PathBuf>) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(MosaicError::InvalidSourceData {
                reason: "Tile image has no pixels".to_string(),
            });
        }

        let pixels = normalize(image, self.tile_width, self.tile_height);
        if pixels.dimensions() != self.tile_dimensions() {
            return Err(dimension_mismatch(
                "tile normalisation",
                self.tile_dimensions(),
                pixels.dimensions(),
            ));
        }

        let mean = MeanColor::of_image(&pixels);
        self.tiles.push(Tile {
            pixels,
            mean,
            source,
        });
        Ok(())
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the database holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in insertion order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `index`, if present
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Canonical (width, height) shared by every tile
    pub const fn tile_dimensions(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }
}

/// Resample an image to exactly `width` x `height` with a Lanczos filter
///
/// Images already at the requested size are returned untouched.
pub fn normalize(image: RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        image
    } else {
        imageops::resize(&image, width, height, FilterType::Lanczos3)
    }
}
