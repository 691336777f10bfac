//! Random test image generation.
//!
//! Every function takes the random source as an argument so callers decide
//! between a wall-clock seeded generator for fresh vectors and a fixed seed
//! for reproducible fixtures. Nothing here touches a global RNG.
//!
//! ```
//! use equalizer::random::{random_image, seeded_rng};
//! use equalizer::ImageSize;
//!
//! let mut rng = seeded_rng(42);
//! let img = random_image(ImageSize::from_width_height(4, 3), &mut rng);
//! assert_eq!(img.dim(), (3, 4));
//! ```

use crate::image_size::{ImageSize, SizeError};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic generator used for every test vector run.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Seed derived from the current wall-clock time.
///
/// Falls back to 0 if the clock reads earlier than the Unix epoch.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
        .unwrap_or_default()
}

/// Draw a size uniformly with `width ∈ [1, max.width]`, `height ∈ [1, max.height]`.
pub fn random_size<R: Rng>(max: ImageSize, rng: &mut R) -> Result<ImageSize, SizeError> {
    if max.is_empty() {
        return Err(SizeError::ZeroSide(max));
    }
    let width = rng.random_range(1..=max.width);
    let height = rng.random_range(1..=max.height);
    Ok(ImageSize::from_width_height(width, height))
}

/// Fill an image of `size` with independent uniform samples in `[0, 255]`.
///
/// Samples are drawn in row-major order, so the same seed always yields the
/// same pixel sequence regardless of how the caller later walks the array.
pub fn random_image<R: Rng>(size: ImageSize, rng: &mut R) -> Array2<u8> {
    Array2::from_shape_simple_fn((size.height, size.width), || rng.random::<u8>())
}
