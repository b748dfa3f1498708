//! Partition of a target canvas into tile-sized cells

/// Axis-aligned pixel rectangle of one grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Whole cells that fit inside a canvas
///
/// Trailing pixels that do not fill a complete cell on the right or bottom
/// edge belong to no cell and are cropped from the finished mosaic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of cell rows
    pub rows: u32,
    /// Number of cell columns
    pub cols: u32,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
}

impl GridLayout {
    /// Fit as many `cell_width` x `cell_height` cells as possible into a canvas
    ///
    /// Zero cell dimensions yield an empty grid.
    pub const fn for_canvas(
        canvas_width: u32,
        canvas_height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> Self {
        let (rows, cols) = if cell_width == 0 || cell_height == 0 {
            (0, 0)
        } else {
            (canvas_height / cell_height, canvas_width / cell_width)
        };
        Self {
            rows,
            cols,
            cell_width,
            cell_height,
        }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Whether no complete cell fits
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// (width, height) of the finished mosaic
    pub const fn output_dimensions(&self) -> (u32, u32) {
        (self.cols * self.cell_width, self.rows * self.cell_height)
    }

    /// Pixel rectangle of the cell at `(row, col)`
    pub const fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        CellRect {
            x: col * self.cell_width,
            y: row * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Cell coordinates in row-major scan order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
    }
}
