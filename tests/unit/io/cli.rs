//! Tests for command-line parsing and argument mapping

#[cfg(test)]
mod tests {
    use clap::Parser;
    use mosaictile::composition::MosaicConfig;
    use mosaictile::io::cli::{Cli, Command, Runner};
    use mosaictile::io::configuration::{TILE_HEIGHT, TILE_WIDTH};
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    // Tests compose parsing with only the required arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_compose_minimal_args() {
        let cli = Cli::parse_from(["program", "compose", "target.jpg", "--database", "faces"]);

        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
        let Command::Compose(args) = cli.command else {
            unreachable!("Expected compose subcommand");
        };
        assert_eq!(args.target, PathBuf::from("target.jpg"));
        assert_eq!(args.database, PathBuf::from("faces"));
        assert_eq!(args.config(), MosaicConfig::default());
        assert_eq!(args.output_path(), PathBuf::from("target_mosaic.jpg"));
    }

    // Tests every composition option reaches the configuration
    // Verified by ignoring the mask blur option
    #[test]
    fn test_compose_all_args() {
        let cli = Cli::parse_from([
            "program",
            "compose",
            "in.png",
            "-d",
            "db",
            "-o",
            "out/result.png",
            "--tile-width",
            "32",
            "--tile-height",
            "24",
            "--background-blur",
            "31",
            "--mask-scale",
            "0.8",
            "--mask-blur",
            "9",
            "--mask-opacity",
            "0.75",
            "--quiet",
        ]);

        assert!(cli.quiet);
        let Command::Compose(args) = cli.command else {
            unreachable!("Expected compose subcommand");
        };
        let config = args.config();
        assert_eq!((config.tile_width, config.tile_height), (32, 24));
        assert_eq!(config.background_blur_kernel, 31);
        assert_eq!(config.mask.blur_kernel, 9);
        assert!((config.mask.ellipse_scale - 0.8).abs() < f32::EPSILON);
        assert!((config.mask.opacity_cap - 0.75).abs() < f32::EPSILON);
        assert_eq!(args.output_path(), PathBuf::from("out/result.png"));
    }

    // Tests harvest parsing and tile defaults
    // Verified by dropping the flattened tile arguments
    #[test]
    fn test_harvest_args() {
        let cli = Cli::parse_from(["program", "-q", "harvest", "raw", "--database", "faces"]);

        assert!(cli.quiet);
        let Command::Harvest(args) = cli.command else {
            unreachable!("Expected harvest subcommand");
        };
        assert_eq!(args.source, PathBuf::from("raw"));
        assert_eq!(args.database, PathBuf::from("faces"));
        assert_eq!(args.tile.tile_width, TILE_WIDTH);
        assert_eq!(args.tile.tile_height, TILE_HEIGHT);
    }

    // Tests a missing subcommand is rejected
    // Verified by making the subcommand optional
    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["program"]).is_err());
        assert!(Cli::try_parse_from(["program", "compose", "target.jpg"]).is_err());
    }

    // Tests a quiet compose run writes the mosaic end to end
    // Verified by skipping the save step
    #[test]
    fn test_runner_compose_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("db");
        std::fs::create_dir(&database).unwrap();
        for (name, color) in [("r.jpg", [250, 0, 0]), ("g.jpg", [0, 250, 0])] {
            RgbImage::from_pixel(16, 16, Rgb(color))
                .save(database.join(name))
                .unwrap();
        }
        let target = dir.path().join("target.png");
        RgbImage::from_pixel(40, 20, Rgb([200, 20, 20]))
            .save(&target)
            .unwrap();
        let output = dir.path().join("mosaic.png");

        let cli = Cli::parse_from([
            "program".into(),
            "--quiet".into(),
            "compose".into(),
            target.into_os_string(),
            "--database".into(),
            database.into_os_string(),
            "--output".into(),
            output.clone().into_os_string(),
            "--tile-width".into(),
            "8".into(),
            "--tile-height".into(),
            "8".into(),
            "--background-blur".into(),
            "5".into(),
            "--mask-blur".into(),
            "3".into(),
        ]);
        Runner::new(cli).run().unwrap();

        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (40, 16));
    }
}
