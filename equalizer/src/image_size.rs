//! Image dimensions and size utilities

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when pixel data does not agree with an [`ImageSize`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("Image {size} needs {expected} pixels, got {actual}")]
    PixelCountMismatch {
        size: ImageSize,
        expected: usize,
        actual: usize,
    },
    #[error("Image size {0} has a zero side")]
    ZeroSide(ImageSize),
}

/// Image dimensions structure
///
/// Represents the width and height of a test image. Images are always stored
/// row-major, so arrays built from a size have shape `(height, width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
}

impl ImageSize {
    /// Create a new ImageSize
    pub fn from_width_height(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Square size with both sides equal to `side`
    pub fn square(side: usize) -> Self {
        Self::from_width_height(side, side)
    }

    /// Create a zeroed u8 image with this size
    pub fn empty_array(&self) -> Array2<u8> {
        Array2::zeros((self.height, self.width))
    }

    /// Wrap row-major pixel data into an image of this size.
    pub fn array_from_pixels(&self, pixels: Vec<u8>) -> Result<Array2<u8>, SizeError> {
        let expected = self.pixel_count();
        let actual = pixels.len();
        let mismatch = SizeError::PixelCountMismatch {
            size: *self,
            expected,
            actual,
        };
        if actual != expected {
            return Err(mismatch);
        }
        Array2::from_shape_vec((self.height, self.width), pixels).map_err(|_| mismatch)
    }

    /// Size of an existing image array
    pub fn of_array(image: &Array2<u8>) -> Self {
        let (height, width) = image.dim();
        Self { width, height }
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when `other` fits inside this size on both axes
    pub fn contains(&self, other: &ImageSize) -> bool {
        other.width <= self.width && other.height <= self.height
    }

    /// Convert to tuple (width, height)
    pub fn to_tuple(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Create from tuple (width, height)
    pub fn from_tuple(dimensions: (usize, usize)) -> Self {
        Self {
            width: dimensions.0,
            height: dimensions.1,
        }
    }
}

impl From<(usize, usize)> for ImageSize {
    fn from(dimensions: (usize, usize)) -> Self {
        Self::from_tuple(dimensions)
    }
}

impl From<ImageSize> for (usize, usize) {
    fn from(size: ImageSize) -> Self {
        size.to_tuple()
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
