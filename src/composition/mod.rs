//! Mosaic composition over a tile database
//!
//! This module contains:
//! - Grid layout of the target canvas
//! - Soft mask construction and per-pixel blending
//! - The row-major composition driver

/// Soft mask and tile blending
pub mod blend;
/// Grid scan and tile placement
pub mod composer;
/// Cell layout of a target canvas
pub mod grid;

pub use blend::{MaskParams, SoftMask};
pub use composer::{Mosaic, MosaicComposer, MosaicConfig, Placement};
pub use grid::GridLayout;
