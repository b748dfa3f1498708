//! Tile database construction from raw photographs

/// Directory-level harvesting into a tile database
pub mod builder;
/// Region detector interface and the whole-frame fallback
pub mod detector;
/// Aspect-ratio crop and downscale of detected regions
pub mod pan_scan;

pub use builder::{DatabaseBuilder, HarvestSummary};
pub use detector::{FaceDetector, FaceRegion, WholeFrameDetector};
