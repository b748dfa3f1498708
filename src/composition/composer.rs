use crate::{
    composition::blend::{MaskParams, SoftMask, blend},
    composition::grid::GridLayout,
    database::{SelectionState, TileDatabase},
    io::configuration::{BACKGROUND_BLUR_KERNEL, TILE_HEIGHT, TILE_WIDTH},
    io::error::{Result, WithContext, dimension_mismatch, invalid_parameter},
    math::color::MeanColor,
    math::gaussian::{GaussianKernel, blur_rgb},
};
use image::{RgbImage, imageops};
use tracing::{debug, info};

/// Parameters controlling tile geometry, background blur and edge feathering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    /// Canonical tile width in pixels
    pub tile_width: u32,
    /// Canonical tile height in pixels
    pub tile_height: u32,
    /// Odd Gaussian kernel size of the global background blur
    pub background_blur_kernel: usize,
    /// Soft mask shape
    pub mask: MaskParams,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            background_blur_kernel: BACKGROUND_BLUR_KERNEL,
            mask: MaskParams::default(),
        }
    }
}

impl MosaicConfig {
    /// Check that every parameter is in range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero tile dimension, an invalid
    /// background kernel size or invalid mask parameters
    pub fn validate(&self) -> Result<()> {
        if self.tile_width == 0 {
            return Err(invalid_parameter(
                "tile_width",
                &self.tile_width,
                &"must be > 0",
            ));
        }
        if self.tile_height == 0 {
            return Err(invalid_parameter(
                "tile_height",
                &self.tile_height,
                &"must be > 0",
            ));
        }
        GaussianKernel::new(self.background_blur_kernel)?;
        self.mask.validate()
    }
}

/// Tile chosen for one grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Cell row
    pub row: u32,
    /// Cell column
    pub col: u32,
    /// Database index of the chosen tile
    pub tile_index: usize,
    /// Mean colour of the blurred cell the tile was matched against
    pub cell_color: MeanColor,
    /// Colour distance between the cell and the tile
    pub distance: f64,
}

/// Finished mosaic with the choices that produced it
#[derive(Clone, Debug)]
pub struct Mosaic {
    /// Composited image cropped to whole cells
    pub image: RgbImage,
    /// Grid the image was partitioned into
    pub layout: GridLayout,
    /// One placement per cell in row-major order
    pub placements: Vec<Placement>,
}

/// Row-by-row mosaic composition over a blurred copy of the target
///
/// The target is blurred once up front. Cells are read from that blurred
/// canvas and blended back into it, so the blurred image is both the colour
/// source for matching and the background layer of every blend.
pub struct MosaicComposer<'db> {
    canvas: RgbImage,
    database: &'db TileDatabase,
    selection: SelectionState,
    mask: SoftMask,
    layout: GridLayout,
    next_row: u32,
    placements: Vec<Placement>,
}

impl<'db> MosaicComposer<'db> {
    /// Blur the target, build the shared mask and lay out the grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The database tiles do not match the configured tile size
    pub fn new(canvas: RgbImage, database: &'db TileDatabase, config: &MosaicConfig) -> Result<Self> {
        config.validate()?;

        let tile_size = (config.tile_width, config.tile_height);
        if database.tile_dimensions() != tile_size {
            return Err(dimension_mismatch(
                "database tiles",
                tile_size,
                database.tile_dimensions(),
            ));
        }

        let layout =
            GridLayout::for_canvas(canvas.width(), canvas.height(), tile_size.0, tile_size.1);
        info!(
            rows = layout.rows,
            cols = layout.cols,
            cell_width = layout.cell_width,
            cell_height = layout.cell_height,
            "Grid laid out"
        );

        let background = GaussianKernel::new(config.background_blur_kernel)?;
        let canvas = blur_rgb(&canvas, &background);
        let mask = SoftMask::build(tile_size.0, tile_size.1, &config.mask)?;

        Ok(Self {
            canvas,
            database,
            selection: SelectionState::for_database(database),
            mask,
            layout,
            next_row: 0,
            placements: Vec::with_capacity(layout.cell_count()),
        })
    }

    /// Grid being filled
    pub const fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Number of rows already composed
    pub const fn rows_completed(&self) -> u32 {
        self.next_row
    }

    /// Working canvas: the blurred target with every composed cell written in
    pub const fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Mask shared by every blend
    pub const fn mask(&self) -> &SoftMask {
        &self.mask
    }

    /// Current selection cycle
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Placements made so far in scan order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Compose every cell of the next row
    ///
    /// Returns `false` once all rows are done, without doing any work.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidate` tagged with the failing cell if the database
    /// has no tiles
    pub fn compose_next_row(&mut self) -> Result<bool> {
        if self.next_row >= self.layout.rows {
            return Ok(false);
        }

        let row = self.next_row;
        for col in 0..self.layout.cols {
            self.compose_cell(row, col)?;
        }
        self.next_row += 1;

        debug!(row, rows = self.layout.rows, "Row composed");
        Ok(true)
    }

    fn compose_cell(&mut self, row: u32, col: u32) -> Result<()> {
        let rect = self.layout.cell_rect(row, col);
        let cell = imageops::crop_imm(&self.canvas, rect.x, rect.y, rect.width, rect.height)
            .to_image();
        let cell_color = MeanColor::of_image(&cell);

        let found = self
            .selection
            .claim_nearest(self.database, &cell_color)
            .with_cell(row as usize, col as usize)?;
        let blended = blend(&cell, found.tile.pixels(), &self.mask)?;
        imageops::replace(
            &mut self.canvas,
            &blended,
            i64::from(rect.x),
            i64::from(rect.y),
        );

        self.placements.push(Placement {
            row,
            col,
            tile_index: found.index,
            cell_color,
            distance: found.distance,
        });
        Ok(())
    }

    /// Crop the canvas to whole cells and hand back the result
    ///
    /// Rows not yet composed keep their blurred pixels.
    pub fn finish(self) -> Mosaic {
        let (width, height) = self.layout.output_dimensions();
        let image = imageops::crop_imm(&self.canvas, 0, 0, width, height).to_image();
        info!(width, height, cells = self.placements.len(), "Mosaic complete");

        Mosaic {
            image,
            layout: self.layout,
            placements: self.placements,
        }
    }

    /// Compose every remaining row and finish
    ///
    /// # Errors
    ///
    /// Returns the first error raised while composing a row
    pub fn run(mut self) -> Result<Mosaic> {
        while self.compose_next_row()? {}
        Ok(self.finish())
    }
}

/// Build a mosaic of `canvas` from `database` in one call
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database tile size
/// does not match it, or a cell finds no candidate tile
pub fn compose_mosaic(
    canvas: RgbImage,
    database: &TileDatabase,
    config: &MosaicConfig,
) -> Result<Mosaic> {
    MosaicComposer::new(canvas, database, config)?.run()
}
