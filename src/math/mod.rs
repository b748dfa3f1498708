//! Numerical building blocks for colour matching and smoothing

/// Mean colour extraction and Euclidean colour distance
pub mod color;
/// Separable Gaussian blur with mirrored borders
pub mod gaussian;
