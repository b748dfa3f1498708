//! Mean colour extraction and colour-space distance

use image::RgbImage;

/// Per-channel average pixel value of an image or region
///
/// Channels keep the pixel order of the buffer they were computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeanColor(pub [f64; 3]);

impl MeanColor {
    /// Create a mean colour from explicit channel values
    pub const fn new(c0: f64, c1: f64, c2: f64) -> Self {
        Self([c0, c1, c2])
    }

    /// Average every pixel of the buffer per channel
    ///
    /// An empty buffer averages to black.
    pub fn of_image(image: &RgbImage) -> Self {
        let count = u64::from(image.width()) * u64::from(image.height());
        if count == 0 {
            return Self::default();
        }

        let mut sums = [0.0_f64; 3];
        for pixel in image.pixels() {
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += f64::from(channel);
            }
        }

        let count = count as f64;
        Self(sums.map(|sum| sum / count))
    }

    /// Channel values
    pub const fn channels(&self) -> [f64; 3] {
        self.0
    }

    /// Euclidean distance in three-channel colour space
    pub fn distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<[u8; 3]> for MeanColor {
    fn from(value: [u8; 3]) -> Self {
        Self(value.map(f64::from))
    }
}
