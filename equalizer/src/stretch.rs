//! Min/max histogram stretch with a power-of-two shift.
//!
//! The hardware stretches the observed intensity range towards the full
//! 8-bit range using a left shift instead of a true linear rescale:
//!
//! ```text
//! delta = max - min
//! shift = 8 - floor(log2(delta + 1))
//! out   = min((p - min) << shift, 255)
//! ```
//!
//! Ranges that are not one less than a power of two are therefore not
//! stretched to fill the output range, and pixels near the top saturate.
//! The device under test implements exactly this approximation, so the
//! reference must too.

use crate::MAX_PIXEL_VALUE;
use ndarray::{Array2, ArrayView2};

/// Darkest and brightest pixel of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRange {
    pub min: u8,
    pub max: u8,
}

impl PixelRange {
    /// Scan an image for its intensity range. `None` for an empty image.
    pub fn of(image: &ArrayView2<u8>) -> Option<Self> {
        let mut pixels = image.iter().copied();
        let first = pixels.next()?;
        let (min, max) = pixels.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// `max - min`, never negative by construction.
    pub fn delta(&self) -> u8 {
        self.max - self.min
    }

    /// Shift applied to every pixel of an image with this range.
    pub fn shift(&self) -> u32 {
        shift_level(self.delta())
    }
}

/// Left shift used for an intensity range of `delta`.
///
/// Equals `8 - floor(log2(delta + 1))`. The `+ 1` keeps the logarithm
/// defined for uniform images, which get the maximum shift of 8. The result
/// is always in `[0, 8]` and never grows as `delta` grows.
pub fn shift_level(delta: u8) -> u32 {
    8 - (u32::from(delta) + 1).ilog2()
}

/// Stretch a single pixel, saturating at 255.
pub fn stretch_pixel(pixel: u8, min: u8, shift: u32) -> u8 {
    let stretched = u32::from(pixel - min) << shift;
    stretched.min(u32::from(MAX_PIXEL_VALUE)) as u8
}

/// Summary of one equalization, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualizationReport {
    /// Input range, `None` for an empty image
    pub range: Option<PixelRange>,
    /// Shift applied to every pixel
    pub shift: u32,
    /// Number of output pixels clamped to 255
    pub saturated: usize,
}

/// Compute the expected device output for `image`.
///
/// The output has the same shape and row-major order as the input.
pub fn equalize(image: &ArrayView2<u8>) -> Array2<u8> {
    equalize_with_report(image).0
}

/// [`equalize`], also returning the range, shift and saturation count.
pub fn equalize_with_report(image: &ArrayView2<u8>) -> (Array2<u8>, EqualizationReport) {
    let range = PixelRange::of(image);
    let (min, shift) = match range {
        Some(r) => (r.min, r.shift()),
        None => (0, shift_level(0)),
    };

    let mut saturated = 0;
    let output = image.mapv(|p| {
        if u32::from(p - min) << shift > u32::from(MAX_PIXEL_VALUE) {
            saturated += 1;
        }
        stretch_pixel(p, min, shift)
    });

    log::trace!("equalized range {range:?} with shift {shift}, {saturated} saturated");

    (
        output,
        EqualizationReport {
            range,
            shift,
            saturated,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_worked_example() {
        // min 10, max 40, delta 30, shift 8 - floor(log2(31)) = 4
        let img = arr2(&[[10u8, 20], [30, 40]]);
        let (out, report) = equalize_with_report(&img.view());
        assert_eq!(report.range, Some(PixelRange { min: 10, max: 40 }));
        assert_eq!(report.shift, 4);
        assert_eq!(report.saturated, 2);
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![0, 160, 255, 255]);
    }

    #[test]
    fn test_uniform_image_is_all_zero() {
        for level in [0u8, 5, 128, 255] {
            let img = Array2::from_elem((2, 2), level);
            let (out, report) = equalize_with_report(&img.view());
            assert_eq!(report.shift, 8);
            assert!(out.iter().all(|&p| p == 0), "level {level}");
        }
    }

    #[test]
    fn test_shift_matches_float_formula() {
        for delta in 0..=255u8 {
            let expected = 8 - ((delta as f32 + 1.0).log2().floor() as u32);
            assert_eq!(shift_level(delta), expected, "delta {delta}");
        }
    }

    #[test]
    fn test_shift_bounds_and_monotonic() {
        let mut previous = shift_level(0);
        assert_eq!(previous, 8);
        for delta in 1..=255u8 {
            let shift = shift_level(delta);
            assert!(shift <= 8);
            assert!(shift <= previous, "shift grew at delta {delta}");
            previous = shift;
        }
        assert_eq!(shift_level(255), 0);
    }

    #[test]
    fn test_shift_power_of_two_boundaries() {
        assert_eq!(shift_level(1), 7);
        assert_eq!(shift_level(2), 7);
        assert_eq!(shift_level(3), 6);
        assert_eq!(shift_level(127), 1);
        assert_eq!(shift_level(254), 1);
    }

    #[test]
    fn test_full_range_is_identity() {
        let img = arr2(&[[0u8, 17, 200, 255]]);
        let out = equalize(&img.view());
        assert_eq!(out, img);
    }

    #[test]
    fn test_output_minimum_is_zero() {
        let img = arr2(&[[90u8, 91, 120], [200, 95, 101]]);
        let out = equalize(&img.view());
        assert_eq!(out.iter().min(), Some(&0));
    }

    #[test]
    fn test_output_keeps_shape_and_order() {
        let img = arr2(&[[3u8, 2, 1], [4, 5, 6]]);
        let out = equalize(&img.view());
        assert_eq!(out.dim(), (2, 3));
        // delta 5, shift 6
        assert_eq!(out, arr2(&[[128u8, 64, 0], [192, 255, 255]]));
    }

    #[test]
    fn test_single_pixel() {
        let img = arr2(&[[7u8]]);
        assert_eq!(equalize(&img.view()), arr2(&[[0u8]]));
    }

    #[test]
    fn test_empty_image() {
        let img = Array2::<u8>::zeros((0, 3));
        let (out, report) = equalize_with_report(&img.view());
        assert_eq!(out.len(), 0);
        assert_eq!(report.range, None);
        assert_eq!(report.saturated, 0);
    }

    #[test]
    fn test_stretch_pixel_saturates() {
        assert_eq!(stretch_pixel(40, 10, 4), 255);
        assert_eq!(stretch_pixel(25, 10, 4), 240);
        assert_eq!(stretch_pixel(255, 0, 8), 255);
    }
}
