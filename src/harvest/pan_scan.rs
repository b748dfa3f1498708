//! Centre crop of a region to the tile aspect ratio

use crate::harvest::detector::FaceRegion;
use image::RgbImage;
use image::imageops::{self, FilterType};

/// Largest centred rectangle of a `width` x `height` image with the tile aspect ratio
///
/// Degenerate inputs yield the whole image.
pub fn center_crop(width: u32, height: u32, tile_width: u32, tile_height: u32) -> FaceRegion {
    if width == 0 || height == 0 || tile_width == 0 || tile_height == 0 {
        return FaceRegion::new(0, 0, width, height);
    }

    let source_width = f64::from(width);
    let source_height = f64::from(height);
    let aspect = f64::from(tile_width) / f64::from(tile_height);

    let mut crop_width = source_width;
    let mut crop_height = source_width / aspect;
    if crop_height > source_height {
        crop_width *= source_height / crop_height;
        crop_height = source_height;
    }

    let crop_width = (crop_width as u32).clamp(1, width);
    let crop_height = (crop_height as u32).clamp(1, height);
    let x = ((source_width - f64::from(crop_width)) / 2.0) as u32;
    let y = ((source_height - f64::from(crop_height)) / 2.0) as u32;

    FaceRegion::new(x, y, crop_width, crop_height)
}

/// Crop to the tile aspect ratio, shrinking to the tile width if larger
///
/// Smaller crops are kept at native resolution; the tile database
/// normalises them when it loads them.
pub fn pan_scan(image: &RgbImage, tile_width: u32, tile_height: u32) -> RgbImage {
    let crop = center_crop(image.width(), image.height(), tile_width, tile_height);
    let segment = imageops::crop_imm(image, crop.x, crop.y, crop.width, crop.height).to_image();

    if tile_width == 0 || segment.width() <= tile_width {
        return segment;
    }

    let scale = f64::from(tile_width) / f64::from(segment.width());
    let scaled_height = ((f64::from(segment.height()) * scale).round() as u32).max(1);
    imageops::resize(&segment, tile_width, scaled_height, FilterType::Lanczos3)
}
