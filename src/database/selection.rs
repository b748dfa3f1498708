//! Nearest-colour tile selection with per-cycle anti-repetition
//!
//! A [`SelectionState`] tracks which tiles have been handed out in the
//! current cycle. Once every tile has been used, the next selection starts a
//! fresh cycle. The state is owned by the caller so independent runs over the
//! same database never share it.

use crate::database::tiles::{Tile, TileDatabase};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::math::color::MeanColor;
use bitvec::vec::BitVec;
use tracing::debug;

/// Outcome of a nearest-colour query
#[derive(Clone, Copy, Debug)]
pub struct TileMatch<'db> {
    /// Position of the tile in database order
    pub index: usize,
    /// The chosen tile
    pub tile: &'db Tile,
    /// Colour distance between the tile mean and the query
    pub distance: f64,
}

/// Used-this-cycle flags for every tile in a database
#[derive(Clone, Debug)]
pub struct SelectionState {
    used: BitVec,
    used_count: usize,
}

impl SelectionState {
    /// Fresh state with `tile_count` unused tiles
    pub fn new(tile_count: usize) -> Self {
        Self {
            used: BitVec::repeat(false, tile_count),
            used_count: 0,
        }
    }

    /// Fresh state sized for `database`
    pub fn for_database(database: &TileDatabase) -> Self {
        Self::new(database.len())
    }

    /// Number of tiles tracked
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Whether no tiles are tracked
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Number of tiles used in the current cycle
    pub const fn used_count(&self) -> usize {
        self.used_count
    }

    /// Whether the tile at `index` was used in the current cycle
    pub fn is_used(&self, index: usize) -> bool {
        self.used.get(index).is_some_and(|bit| *bit)
    }

    /// Whether every tracked tile has been used in the current cycle
    pub fn is_exhausted(&self) -> bool {
        !self.is_empty() && self.used_count == self.len()
    }

    /// Indices of tiles still available this cycle, in database order
    pub fn unused_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.used.iter_zeros()
    }

    /// Start a new cycle if every tile has been used
    ///
    /// Returns whether a reset happened.
    pub fn reset_if_exhausted(&mut self) -> bool {
        if !self.is_exhausted() {
            return false;
        }
        self.used.fill(false);
        self.used_count = 0;
        true
    }

    /// Mark the tile at `index` as used for the rest of this cycle
    ///
    /// Marking an already used tile has no effect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `index` is outside the tracked range
    pub fn mark_used(&mut self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(invalid_parameter(
                "tile_index",
                &index,
                &format!("must be below {}", self.len()),
            ));
        }
        if !self.is_used(index) {
            self.used.set(index, true);
            self.used_count += 1;
        }
        Ok(())
    }

    /// Select the nearest unused tile and mark it used
    ///
    /// The cycle is reset first when every tile was already used, so the
    /// reset always happens at the start of a selection.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidate` if the database is empty, or `InvalidParameter`
    /// if this state was sized for a different database
    pub fn claim_nearest<'db>(
        &mut self,
        database: &'db TileDatabase,
        target: &MeanColor,
    ) -> Result<TileMatch<'db>> {
        if self.reset_if_exhausted() {
            debug!(tiles = self.len(), "Selection cycle reset");
        }
        let found = database.select_nearest(target, self)?;
        self.mark_used(found.index)?;
        Ok(found)
    }
}

impl TileDatabase {
    /// Find the unused tile whose mean colour is closest to `target`
    ///
    /// Ties go to the earliest tile in database order. The state is only
    /// read; callers mark the result used themselves or go through
    /// [`SelectionState::claim_nearest`].
    ///
    /// # Errors
    ///
    /// Returns `NoCandidate` if no tile is unused (including an empty
    /// database), or `InvalidParameter` if `state` tracks a different
    /// number of tiles than the database holds
    pub fn select_nearest(
        &self,
        target: &MeanColor,
        state: &SelectionState,
    ) -> Result<TileMatch<'_>> {
        if state.len() != self.len() {
            return Err(invalid_parameter(
                "selection_state",
                &state.len(),
                &format!("database holds {} tiles", self.len()),
            ));
        }

        let mut best: Option<TileMatch<'_>> = None;
        for index in state.unused_indices() {
            let Some(tile) = self.tile(index) else {
                continue;
            };
            let distance = tile.mean().distance(target);
            if best.is_none_or(|current| distance < current.distance) {
                best = Some(TileMatch {
                    index,
                    tile,
                    distance,
                });
            }
        }

        best.ok_or(MosaicError::NoCandidate {
            tile_count: self.len(),
            cell: None,
        })
    }
}
