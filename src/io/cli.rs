//! Command-line interface for composing mosaics and harvesting tile databases

use crate::composition::{MaskParams, MosaicComposer, MosaicConfig};
use crate::database::TileDatabase;
use crate::harvest::{DatabaseBuilder, WholeFrameDetector};
use crate::io::configuration::{
    BACKGROUND_BLUR_KERNEL, MASK_BLUR_KERNEL, MASK_ELLIPSE_SCALE, MASK_OPACITY_CAP, TILE_HEIGHT,
    TILE_WIDTH,
};
use crate::io::error::Result;
use crate::io::image::{default_output_path, load_target, save_mosaic};
use crate::io::progress::ProgressManager;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "mosaictile")]
#[command(
    author,
    version,
    about = "Build photomosaics from a database of colour-matched tiles"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Rebuild a target photograph from database tiles
    Compose(ComposeArgs),
    /// Crop detected regions of raw photographs into a tile database
    Harvest(HarvestArgs),
}

/// Tile geometry shared by both operations
#[derive(Args, Clone, Copy, Debug)]
pub struct TileArgs {
    /// Canonical tile width in pixels
    #[arg(long, default_value_t = TILE_WIDTH)]
    pub tile_width: u32,

    /// Canonical tile height in pixels
    #[arg(long, default_value_t = TILE_HEIGHT)]
    pub tile_height: u32,
}

/// Arguments of the `compose` operation
#[derive(Args)]
pub struct ComposeArgs {
    /// Target photograph to rebuild
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of database images (*.jpg)
    #[arg(short, long, value_name = "DIR")]
    pub database: PathBuf,

    /// Output path (defaults to <TARGET stem>_mosaic.<ext> beside the target)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tile geometry
    #[command(flatten)]
    pub tile: TileArgs,

    /// Odd Gaussian kernel size of the background blur
    #[arg(long, default_value_t = BACKGROUND_BLUR_KERNEL)]
    pub background_blur: usize,

    /// Mask ellipse axes as a fraction of the tile size
    #[arg(long, default_value_t = MASK_ELLIPSE_SCALE)]
    pub mask_scale: f32,

    /// Odd Gaussian kernel size feathering the mask
    #[arg(long, default_value_t = MASK_BLUR_KERNEL)]
    pub mask_blur: usize,

    /// Tile opacity at the centre of each cell
    #[arg(long, default_value_t = MASK_OPACITY_CAP)]
    pub mask_opacity: f32,
}

impl ComposeArgs {
    /// Composition parameters described by these arguments
    pub const fn config(&self) -> MosaicConfig {
        MosaicConfig {
            tile_width: self.tile.tile_width,
            tile_height: self.tile.tile_height,
            background_blur_kernel: self.background_blur,
            mask: MaskParams {
                ellipse_scale: self.mask_scale,
                blur_kernel: self.mask_blur,
                opacity_cap: self.mask_opacity,
            },
        }
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.target))
    }
}

/// Arguments of the `harvest` operation
#[derive(Args)]
pub struct HarvestArgs {
    /// Directory of raw photographs (*.jpg)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory receiving the cropped tiles
    #[arg(short, long, value_name = "DIR")]
    pub database: PathBuf,

    /// Tile geometry
    #[command(flatten)]
    pub tile: TileArgs,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs the selected operation with optional progress display
pub struct Runner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Execute the selected operation
    ///
    /// # Errors
    ///
    /// Returns an error if loading, composition, harvesting or saving fails
    pub fn run(&mut self) -> Result<()> {
        let result = match &self.cli.command {
            Command::Compose(args) => Self::compose(args, self.progress_manager.as_mut()),
            Command::Harvest(args) => Self::harvest(args, self.progress_manager.as_mut()),
        };

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        result
    }

    fn compose(args: &ComposeArgs, mut progress: Option<&mut ProgressManager>) -> Result<()> {
        let start_time = Instant::now();
        let config = args.config();
        config.validate()?;

        let target = load_target(&args.target)?;

        if let Some(pm) = progress.as_deref_mut() {
            let files = TileDatabase::scan_directory(&args.database)?;
            pm.start_loading("tiles", files.len());
        }
        let database = TileDatabase::load_with_progress(
            &args.database,
            config.tile_width,
            config.tile_height,
            |path| {
                if let Some(pm) = progress.as_deref() {
                    pm.advance_loading(path);
                }
            },
        )?;

        let mut composer = MosaicComposer::new(target, &database, &config)?;
        if let Some(pm) = progress.as_deref_mut() {
            pm.start_scan(composer.layout().rows);
        }
        while composer.compose_next_row()? {
            if let Some(pm) = progress.as_deref() {
                pm.update_rows(composer.rows_completed());
            }
        }
        let mosaic = composer.finish();

        let output_path = args.output_path();
        save_mosaic(&mosaic.image, &output_path)?;
        info!(
            output = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Mosaic saved"
        );
        Ok(())
    }

    fn harvest(args: &HarvestArgs, mut progress: Option<&mut ProgressManager>) -> Result<()> {
        if let Some(pm) = progress.as_deref_mut() {
            let files = TileDatabase::scan_directory(&args.source)?;
            pm.start_loading("photos", files.len());
        }

        let mut builder = DatabaseBuilder::new(
            WholeFrameDetector,
            args.tile.tile_width,
            args.tile.tile_height,
        )?;
        let summary = builder.build_with_progress(&args.source, &args.database, |path| {
            if let Some(pm) = progress.as_deref() {
                pm.advance_loading(path);
            }
        })?;

        info!(
            scanned = summary.files_scanned,
            skipped = summary.files_skipped,
            written = summary.crops_written,
            "Harvest complete"
        );
        Ok(())
    }
}
