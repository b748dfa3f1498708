//! Tile database and nearest-colour selection
//!
//! This module contains:
//! - Loading and normalising candidate images into tiles
//! - Per-cycle selection state and the nearest-colour query

/// Nearest-colour selection with cycle tracking
pub mod selection;
/// Tile loading and normalisation
pub mod tiles;

pub use selection::{SelectionState, TileMatch};
pub use tiles::{Tile, TileDatabase};
