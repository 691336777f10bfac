//! Reference model for the image equalizer hardware design.
//!
//! The equalizer remaps the intensities of an 8-bit grayscale image by
//! subtracting the image minimum and left-shifting by a power of two derived
//! from the observed intensity range. This crate holds that reference
//! computation together with the primitives used to build random test images:
//!
//! - [`image_size`]: image dimensions and array construction
//! - [`random`]: seeded random sizes and pixel data
//! - [`stretch`]: the min/max shift equalizer itself

pub mod image_size;
pub mod random;
pub mod stretch;

pub use image_size::{ImageSize, SizeError};
pub use stretch::{equalize, equalize_with_report, shift_level, EqualizationReport, PixelRange};

/// Largest value an 8-bit pixel can hold.
pub const MAX_PIXEL_VALUE: u8 = u8::MAX;
