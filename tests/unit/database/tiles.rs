//! Tests for tile database loading, normalisation and directory scanning

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use mosaictile::MosaicError;
    use mosaictile::database::TileDatabase;
    use mosaictile::math::color::MeanColor;
    use std::fs;
    use std::path::Path;

    fn write_solid_jpg(dir: &Path, name: &str, size: (u32, u32), color: [u8; 3]) {
        RgbImage::from_pixel(size.0, size.1, Rgb(color))
            .save(dir.join(name))
            .unwrap();
    }

    // Tests heterogeneous inputs are forced to the canonical size
    // Verified by skipping the resize for non-square inputs
    #[test]
    fn test_from_images_normalizes_every_tile() {
        let images = vec![
            RgbImage::from_pixel(10, 20, Rgb([1, 2, 3])),
            RgbImage::from_pixel(80, 80, Rgb([4, 5, 6])),
            RgbImage::from_pixel(60, 60, Rgb([7, 8, 9])),
        ];

        let database = TileDatabase::from_images(images, 60, 60).unwrap();

        assert_eq!(database.len(), 3);
        assert_eq!(database.tile_dimensions(), (60, 60));
        for tile in database.tiles() {
            assert_eq!(tile.pixels().dimensions(), (60, 60));
            assert!(tile.source().is_none());
        }
    }

    // Tests mean colour is computed from the normalised pixels
    // Verified by leaving the mean at its default
    #[test]
    fn test_tile_mean_matches_solid_colour() {
        let images = vec![RgbImage::from_pixel(60, 60, Rgb([255, 128, 0]))];

        let database = TileDatabase::from_images(images, 60, 60).unwrap();

        let tile = database.tile(0).unwrap();
        assert_eq!(tile.mean(), MeanColor::new(255.0, 128.0, 0.0));
        assert!(database.tile(1).is_none());
    }

    // Tests zero tile dimensions are rejected
    // Verified by removing the width check
    #[test]
    fn test_zero_tile_size_rejected() {
        let width = TileDatabase::from_images(Vec::new(), 0, 60);
        let height = TileDatabase::from_images(Vec::new(), 60, 0);

        assert!(matches!(width, Err(MosaicError::InvalidParameter { .. })));
        assert!(matches!(height, Err(MosaicError::InvalidParameter { .. })));
    }

    // Tests an image without pixels is refused before resampling
    // Verified by removing the empty image guard
    #[test]
    fn test_empty_image_rejected() {
        let result = TileDatabase::from_images(vec![RgbImage::new(0, 10)], 60, 60);

        assert!(matches!(result, Err(MosaicError::InvalidSourceData { .. })));
    }

    // Tests loading skips undecodable files and ignores other extensions
    // Verified by propagating the decode error instead of skipping
    #[test]
    fn test_load_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_jpg(dir.path(), "b.jpg", (30, 45), [0, 0, 255]);
        write_solid_jpg(dir.path(), "a.jpg", (90, 60), [255, 0, 0]);
        fs::write(dir.path().join("broken.jpg"), b"not an image").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let database = TileDatabase::load(dir.path(), 60, 60).unwrap();

        assert_eq!(database.len(), 2);
        let names: Vec<_> = database
            .tiles()
            .iter()
            .filter_map(|tile| tile.source())
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);

        for tile in database.tiles() {
            assert_eq!(tile.pixels().dimensions(), (60, 60));
        }
        let red = database.tile(0).unwrap().mean().channels();
        assert!(red[0] > 200.0 && red[2] < 50.0, "Unexpected mean {red:?}");
    }

    // Tests the progress callback sees every candidate file in order
    // Verified by only reporting successfully decoded files
    #[test]
    fn test_load_with_progress_reports_each_file() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_jpg(dir.path(), "one.jpg", (8, 8), [10, 10, 10]);
        fs::write(dir.path().join("two.jpg"), b"garbage").unwrap();

        let mut seen = Vec::new();
        let database = TileDatabase::load_with_progress(dir.path(), 8, 8, |path| {
            seen.push(path.to_path_buf());
        })
        .unwrap();

        assert_eq!(database.len(), 1);
        assert_eq!(
            seen,
            vec![dir.path().join("one.jpg"), dir.path().join("two.jpg")]
        );
    }

    // Tests an empty directory reports DatabaseEmpty
    // Verified by returning an empty database instead
    #[test]
    fn test_load_empty_directory() {
        let dir = tempfile::tempdir().unwrap();

        let result = TileDatabase::load(dir.path(), 60, 60);

        match result {
            Err(MosaicError::DatabaseEmpty { directory, skipped }) => {
                assert_eq!(directory, dir.path());
                assert_eq!(skipped, 0);
            }
            other => unreachable!("Expected DatabaseEmpty, got {other:?}"),
        }
    }

    // Tests a directory of only corrupt files reports how many were skipped
    // Verified by not counting skipped files
    #[test]
    fn test_load_only_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.jpg"), b"junk").unwrap();

        let result = TileDatabase::load(dir.path(), 60, 60);

        assert!(matches!(
            result,
            Err(MosaicError::DatabaseEmpty { skipped: 1, .. })
        ));
    }

    // Tests a missing directory surfaces a file system error with its path
    // Verified by mapping read_dir failures to DatabaseEmpty
    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let result = TileDatabase::load(&missing, 60, 60);

        match result {
            Err(MosaicError::FileSystem { path, .. }) => assert_eq!(path, missing),
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests scanning is sorted, case-insensitive and skips directories
    // Verified by removing the sort
    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("c.jpg"), b"").unwrap();
        fs::write(dir.path().join("A.JPG"), b"").unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let files = TileDatabase::scan_directory(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("A.JPG"), dir.path().join("c.jpg")]
        );
    }
}
