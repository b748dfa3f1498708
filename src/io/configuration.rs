//! Composition constants and runtime configuration defaults

// Canonical tile geometry; every database image is resampled to this size
/// Default tile width in pixels
pub const TILE_WIDTH: u32 = 60;
/// Default tile height in pixels
pub const TILE_HEIGHT: u32 = 60;

// Blur strengths are odd Gaussian kernel sizes
/// Kernel size of the global background blur applied to the target
pub const BACKGROUND_BLUR_KERNEL: usize = 51;
/// Kernel size used to feather the soft mask ellipse
pub const MASK_BLUR_KERNEL: usize = 15;

/// Ellipse axes as a fraction of the tile dimensions
pub const MASK_ELLIPSE_SCALE: f32 = 0.95;
/// Maximum opacity a tile may reach at the centre of a cell
pub const MASK_OPACITY_CAP: f32 = 0.90;

// Input discovery
/// File extensions scanned when loading a tile database or harvesting photos
pub const DATABASE_EXTENSIONS: &[&str] = &["jpg"];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of crops written by the database builder
pub const HARVEST_EXTENSION: &str = "jpg";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Check whether a path carries one of the database extensions (case-insensitive)
pub fn has_database_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DATABASE_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}
