//! Photomosaic composition from a database of colour-matched tiles
//!
//! A target photograph is blurred, split into a grid of tile-sized cells and
//! each cell is filled with the unused database tile whose mean colour is
//! nearest. Tiles are feathered into the blurred backdrop with a soft
//! elliptical mask so the grid dissolves into the original image.

#![forbid(unsafe_code)]

/// Grid layout, soft-mask blending and the composition driver
pub mod composition;
/// Tile loading, normalisation and nearest-colour selection
pub mod database;
/// Building tile databases from raw photographs
pub mod harvest;
/// Input/output operations, configuration and error handling
pub mod io;
/// Colour statistics and Gaussian smoothing
pub mod math;

pub use io::error::{MosaicError, Result};
