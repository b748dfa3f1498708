/// Command-line interface and operation runner
pub mod cli;
/// Default constants for tile geometry, blurring and output naming
pub mod configuration;
/// Error types and context management
pub mod error;
/// Target decoding and mosaic export
pub mod image;
/// Terminal progress bars
pub mod progress;
