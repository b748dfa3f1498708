//! Error types and context management for mosaic operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// File that could not be decoded
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Database directory yielded no usable tiles
    DatabaseEmpty {
        /// Directory that was scanned
        directory: PathBuf,
        /// Number of candidate files that failed to decode
        skipped: usize,
    },

    /// Nearest-colour selection was attempted with nothing to choose from
    ///
    /// Occurs when the database holds zero tiles, or when every tile is
    /// marked used and the cycle has not been reset.
    NoCandidate {
        /// Number of tiles in the database
        tile_count: usize,
        /// Grid cell (row, col) being filled, when known
        cell: Option<[usize; 2]>,
    },

    /// A pixel buffer does not have the dimensions required by its stage
    DimensionMismatch {
        /// Processing stage where the mismatch was detected
        stage: &'static str,
        /// Required (width, height)
        expected: (u32, u32),
        /// Observed (width, height)
        actual: (u32, u32),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Parameter name as exposed in configuration
        parameter: &'static str,
        /// Rejected value, formatted
        value: String,
        /// Constraint the value breaks
        reason: String,
    },

    /// Input that decoded but cannot be composed or written
    InvalidSourceData {
        /// What is unusable about the input
        reason: String,
    },

    /// An image could not be encoded or written
    ImageExport {
        /// Destination path
        path: PathBuf,
        /// Encoder or writer error
        source: image::ImageError,
    },

    /// Directory listing or creation failed
    FileSystem {
        /// Directory being accessed
        path: PathBuf,
        /// Operation, phrased as a verb ("read directory")
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Could not decode image '{}': {source}", path.display())
            }
            Self::DatabaseEmpty { directory, skipped } => {
                write!(
                    f,
                    "No usable tiles found in '{}' ({skipped} files skipped)",
                    directory.display()
                )
            }
            Self::NoCandidate { tile_count, cell } => match cell {
                Some([row, col]) => write!(
                    f,
                    "No candidate tile for cell ({row}, {col}) among {tile_count} tiles"
                ),
                None => write!(f, "No candidate tile among {tile_count} tiles"),
            },
            Self::DimensionMismatch {
                stage,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Dimension mismatch during {stage}: expected {}x{}, found {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Parameter {parameter} rejected value '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => write!(f, "Unusable input: {reason}"),
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Could not write image '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Could not {operation} '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::DatabaseEmpty { .. }
            | Self::NoCandidate { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidSourceData { .. } => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Location details attached to an error after the fact
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorContext {
    /// Grid cell (row, col) being processed
    pub cell: Option<[usize; 2]>,
    /// Stage being performed
    pub stage: Option<&'static str>,
}

/// Enriches error messages with composition state information
pub trait WithContext<T> {
    /// Fill in the cell or stage of a failed result
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and annotated
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Record the grid cell that was being filled
    ///
    /// # Errors
    ///
    /// Returns the original error tagged with `(row, col)`
    fn with_cell(self, row: usize, col: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|source| {
            let mut error = source.into();
            match &mut error {
                MosaicError::NoCandidate { cell, .. } => {
                    if context.cell.is_some() {
                        *cell = context.cell;
                    }
                }
                MosaicError::DimensionMismatch { stage, .. } => {
                    if let Some(context_stage) = context.stage {
                        *stage = context_stage;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_cell(self, row: usize, col: usize) -> Result<T> {
        let context = ErrorContext {
            cell: Some([row, col]),
            stage: None,
        };
        self.with_context(context)
    }
}

/// Shorthand for [`MosaicError::InvalidParameter`]
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error from two `(width, height)` pairs
pub const fn dimension_mismatch(
    stage: &'static str,
    expected: (u32, u32),
    actual: (u32, u32),
) -> MosaicError {
    MosaicError::DimensionMismatch {
        stage,
        expected,
        actual,
    }
}
