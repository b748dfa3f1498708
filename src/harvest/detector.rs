//! Region detection interface for harvesting tiles from photographs

use crate::io::error::Result;
use image::RgbImage;

/// Axis-aligned rectangle reported by a detector, in image pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRegion {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl FaceRegion {
    /// Create a region from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with a `width` x `height` image
    ///
    /// Returns `None` when nothing of the region lies inside the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        let left = self.x.min(width);
        let top = self.y.min(height);
        let right = self.x.saturating_add(self.width).min(width);
        let bottom = self.y.saturating_add(self.height).min(height);

        (right > left && bottom > top).then(|| Self::new(left, top, right - left, bottom - top))
    }
}

/// Locates faces (or any other regions of interest) in a photograph
pub trait FaceDetector {
    /// Detect regions in `image`
    ///
    /// # Errors
    ///
    /// Implementations return an error when detection itself fails; an
    /// image without faces is an empty result, not an error
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<FaceRegion>>;
}

/// Detector reporting the whole frame as a single region
///
/// Lets plain photographs be pan-scanned into a database without an
/// external classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct WholeFrameDetector;

impl FaceDetector for WholeFrameDetector {
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<FaceRegion>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }
        Ok(vec![FaceRegion::new(0, 0, width, height)])
    }
}
