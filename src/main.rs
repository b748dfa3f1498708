//! CLI entry point for the photomosaic tool

use clap::Parser;
use mosaictile::io::cli::{Cli, Runner};
use tracing::Level;

fn main() -> mosaictile::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut runner = Runner::new(cli);
    runner.run()
}
