//! Separable Gaussian smoothing for colour images and scalar planes
//!
//! Kernel strength is given as an odd aperture size. Sigma is derived from
//! the size with the usual `0.3 * ((n - 1) / 2 - 1) + 0.8` rule, and borders
//! mirror about the edge pixel without repeating it, so a constant image
//! stays constant after blurring.

use crate::io::error::{Result, invalid_parameter};
use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3, ArrayView1, ArrayView3, ArrayViewMut1, Axis, Zip};

/// Normalised one-dimensional Gaussian weights
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Build a kernel of `size` taps with sigma derived from the size
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `size` is zero or even
    pub fn new(size: usize) -> Result<Self> {
        Self::with_sigma(size, sigma_for_size(size))
    }

    /// Build a kernel of `size` taps with an explicit sigma
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `size` is zero or even, or if `sigma`
    /// is not a positive finite number
    pub fn with_sigma(size: usize, sigma: f64) -> Result<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(invalid_parameter(
                "kernel_size",
                &size,
                &"must be odd and at least 1",
            ));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(invalid_parameter("sigma", &sigma, &"must be > 0"));
        }

        let radius = (size / 2) as f64;
        let denom = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (0..size)
            .map(|i| {
                let x = i as f64 - radius;
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();

        Ok(Self {
            weights: raw.iter().map(|w| (w / sum) as f32).collect(),
        })
    }

    /// Number of taps either side of the centre
    pub const fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Normalised weights, centre tap in the middle
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Whether blurring with this kernel leaves its input unchanged
    pub const fn is_identity(&self) -> bool {
        self.weights.len() == 1
    }
}

/// Sigma implied by an odd aperture size
pub fn sigma_for_size(size: usize) -> f64 {
    0.3_f64.mul_add((size as f64 - 1.0).mul_add(0.5, -1.0), 0.8)
}

/// Map an index into `0..len`, mirroring about the first and last elements
pub const fn reflect_101(index: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = (len - 1) as isize;
    let period = 2 * last;
    let folded = index.rem_euclid(period);
    if folded > last {
        (period - folded) as usize
    } else {
        folded as usize
    }
}

/// Blur every channel of an RGB image
pub fn blur_rgb(image: &RgbImage, kernel: &GaussianKernel) -> RgbImage {
    if kernel.is_identity() || image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let planes = rgb_to_array(image);
    let horizontal = blur_axis(planes.view(), Axis(1), kernel);
    let blurred = blur_axis(horizontal.view(), Axis(0), kernel);
    array_to_rgb(&blurred)
}

/// Blur a scalar plane indexed `(row, col)`
pub fn blur_plane(plane: &Array2<f32>, kernel: &GaussianKernel) -> Array2<f32> {
    if kernel.is_identity() || plane.is_empty() {
        return plane.clone();
    }

    let stacked = plane.view().insert_axis(Axis(2));
    let horizontal = blur_axis(stacked, Axis(1), kernel);
    blur_axis(horizontal.view(), Axis(0), kernel).remove_axis(Axis(2))
}

fn blur_axis(input: ArrayView3<'_, f32>, axis: Axis, kernel: &GaussianKernel) -> Array3<f32> {
    let mut output = Array3::<f32>::zeros(input.raw_dim());
    Zip::from(output.lanes_mut(axis))
        .and(input.lanes(axis))
        .for_each(|dst, src| convolve_lane(src, dst, kernel));
    output
}

fn convolve_lane(src: ArrayView1<'_, f32>, mut dst: ArrayViewMut1<'_, f32>, kernel: &GaussianKernel) {
    let len = src.len();
    let radius = kernel.radius() as isize;

    for (i, value) in dst.iter_mut().enumerate() {
        let mut acc = 0.0_f32;
        for (k, &weight) in kernel.weights.iter().enumerate() {
            let j = reflect_101(i as isize + k as isize - radius, len);
            let sample = src.get(j).copied().unwrap_or(0.0);
            acc = weight.mul_add(sample, acc);
        }
        *value = acc;
    }
}

fn rgb_to_array(image: &RgbImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        image
            .get_pixel_checked(x as u32, y as u32)
            .and_then(|pixel| pixel.0.get(c))
            .map_or(0.0, |&v| f32::from(v))
    })
}

fn array_to_rgb(array: &Array3<f32>) -> RgbImage {
    let (height, width, _) = array.dim();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        Rgb([0, 1, 2].map(|c| {
            to_channel(
                array
                    .get((y as usize, x as usize, c))
                    .copied()
                    .unwrap_or(0.0),
            )
        }))
    })
}

/// Round a floating point sample into the 8-bit channel range
pub fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
