//! Soft-edged compositing of tiles over the blurred backdrop
//!
//! The mask value at a pixel is the weight given to the background. It is
//! low in the middle of a cell, where the tile shows through, and rises to
//! [`MAX_MASK_VALUE`] towards the cell border so tiles fade into the image.

use crate::io::configuration::{MASK_BLUR_KERNEL, MASK_ELLIPSE_SCALE, MASK_OPACITY_CAP};
use crate::io::error::{Result, dimension_mismatch, invalid_parameter};
use crate::math::gaussian::{GaussianKernel, blur_plane};
use image::{Rgb, RgbImage};
use ndarray::Array2;

/// Largest value a mask sample can take
pub const MAX_MASK_VALUE: f32 = 1.0;

/// Shape of the feathered mask
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskParams {
    /// Ellipse axes as a fraction of the tile dimensions
    pub ellipse_scale: f32,
    /// Odd Gaussian kernel size used to feather the ellipse
    pub blur_kernel: usize,
    /// Tile opacity at the cell centre
    pub opacity_cap: f32,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            ellipse_scale: MASK_ELLIPSE_SCALE,
            blur_kernel: MASK_BLUR_KERNEL,
            opacity_cap: MASK_OPACITY_CAP,
        }
    }
}

impl MaskParams {
    /// Check that every parameter is in range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an ellipse scale outside (0, 1], an
    /// opacity cap outside [0, 1], or an even or zero kernel size
    pub fn validate(&self) -> Result<()> {
        if !(self.ellipse_scale > 0.0 && self.ellipse_scale <= 1.0) {
            return Err(invalid_parameter(
                "ellipse_scale",
                &self.ellipse_scale,
                &"must be in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity_cap) {
            return Err(invalid_parameter(
                "opacity_cap",
                &self.opacity_cap,
                &"must be in [0, 1]",
            ));
        }
        GaussianKernel::new(self.blur_kernel).map(|_| ())
    }
}

/// Per-pixel background weight shared by every cell
#[derive(Clone, Debug, PartialEq)]
pub struct SoftMask {
    values: Array2<f32>,
}

impl SoftMask {
    /// Build the feathered elliptical mask for a `width` x `height` cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or `params`
    /// fails validation
    pub fn build(width: u32, height: u32, params: &MaskParams) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "mask_size",
                &format!("{width}x{height}"),
                &"must be non-empty",
            ));
        }
        params.validate()?;

        let center_x = f64::from(width / 2);
        let center_y = f64::from(height / 2);
        let semi_x = f64::from(width) * f64::from(params.ellipse_scale) / 2.0;
        let semi_y = f64::from(height) * f64::from(params.ellipse_scale) / 2.0;

        let ellipse = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            let dx = (x as f64 - center_x) / semi_x;
            let dy = (y as f64 - center_y) / semi_y;
            if dx.mul_add(dx, dy * dy) <= 1.0 {
                MAX_MASK_VALUE
            } else {
                0.0
            }
        });

        let kernel = GaussianKernel::new(params.blur_kernel)?;
        let feathered = blur_plane(&ellipse, &kernel);

        Ok(Self {
            values: feathered.mapv(|v| {
                v.mul_add(-params.opacity_cap, MAX_MASK_VALUE)
                    .clamp(0.0, MAX_MASK_VALUE)
            }),
        })
    }

    /// Wrap precomputed background weights indexed `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the plane is empty or any value lies
    /// outside `[0, MAX_MASK_VALUE]`
    pub fn from_values(values: Array2<f32>) -> Result<Self> {
        if values.is_empty() {
            return Err(invalid_parameter("mask", &"empty", &"must be non-empty"));
        }
        if let Some(bad) = values
            .iter()
            .find(|v| !(0.0..=MAX_MASK_VALUE).contains(*v))
        {
            return Err(invalid_parameter(
                "mask",
                bad,
                &format!("values must be in [0, {MAX_MASK_VALUE}]"),
            ));
        }
        Ok(Self { values })
    }

    /// Mask width in pixels
    pub fn width(&self) -> u32 {
        self.values.ncols() as u32
    }

    /// Mask height in pixels
    pub fn height(&self) -> u32 {
        self.values.nrows() as u32
    }

    /// (width, height) of the mask
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Background weight at pixel `(x, y)`
    pub fn value(&self, x: u32, y: u32) -> Option<f32> {
        self.values.get((y as usize, x as usize)).copied()
    }

    /// Raw weights indexed `(row, col)`
    pub const fn values(&self) -> &Array2<f32> {
        &self.values
    }
}

/// Composite `tile` over `background` using the mask as background weight
///
/// Where the mask is zero the tile pixel is returned unchanged; where it is
/// [`MAX_MASK_VALUE`] the background pixel is.
///
/// # Errors
///
/// Returns `DimensionMismatch` unless background, tile and mask share the
/// same dimensions
pub fn blend(background: &RgbImage, tile: &RgbImage, mask: &SoftMask) -> Result<RgbImage> {
    let expected = mask.dimensions();
    if background.dimensions() != expected {
        return Err(dimension_mismatch(
            "blend background",
            expected,
            background.dimensions(),
        ));
    }
    if tile.dimensions() != expected {
        return Err(dimension_mismatch("blend tile", expected, tile.dimensions()));
    }

    let mut output = RgbImage::new(expected.0, expected.1);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let factor = f64::from(mask.value(x, y).unwrap_or(MAX_MASK_VALUE) / MAX_MASK_VALUE);
        let back = background.get_pixel(x, y).0;
        let front = tile.get_pixel(x, y).0;

        let mut mixed = [0_u8; 3];
        for ((out, &b), &t) in mixed.iter_mut().zip(back.iter()).zip(front.iter()) {
            let value = f64::from(b).mul_add(factor, f64::from(t) * (1.0 - factor));
            *out = value.round().clamp(0.0, 255.0) as u8;
        }
        *pixel = Rgb(mixed);
    }

    Ok(output)
}
