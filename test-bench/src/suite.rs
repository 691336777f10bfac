//! Test cases and the test suite they form.
//!
//! Each [`TestCase`] pairs a random input image with the output the
//! equalizer must produce for it. The expected output is computed once at
//! construction and cannot be replaced, so it always matches the input.

use crate::params::{DimensionMode, GeneratorParams};
use equalizer::{random, EqualizationReport, ImageSize, SizeError};
use ndarray::Array2;
use rand::Rng;
use thiserror::Error;

/// Words addressable by the device under test (16-bit address bus).
pub const ADDRESS_SPACE_WORDS: usize = 1 << 16;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SuiteError {
    #[error("Invalid image: {0}")]
    Size(#[from] SizeError),
    #[error("Test case {index} is {size}, larger than the {capacity} memory region")]
    CaseExceedsCapacity {
        index: usize,
        size: ImageSize,
        capacity: ImageSize,
    },
    #[error("Memory region for {capacity} images needs {words} words, address space holds 65536")]
    AddressSpaceExceeded { capacity: ImageSize, words: usize },
}

/// Words in one test's memory region: width, height, input image and room
/// for the output image.
pub fn region_words(capacity: ImageSize) -> usize {
    2 + 2 * capacity.pixel_count()
}

/// One test image and the output expected from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    input: Array2<u8>,
    expected: Array2<u8>,
    report: EqualizationReport,
}

impl TestCase {
    /// Build a case from an input image, computing its reference output.
    pub fn new(input: Array2<u8>) -> Self {
        let (expected, report) = equalizer::equalize_with_report(&input.view());
        Self {
            input,
            expected,
            report,
        }
    }

    /// Build a case from row-major pixel data.
    pub fn from_pixels(size: ImageSize, pixels: Vec<u8>) -> Result<Self, SuiteError> {
        Ok(Self::new(size.array_from_pixels(pixels)?))
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::of_array(&self.input)
    }

    pub fn pixel_count(&self) -> usize {
        self.input.len()
    }

    pub fn input(&self) -> &Array2<u8> {
        &self.input
    }

    pub fn expected(&self) -> &Array2<u8> {
        &self.expected
    }

    pub fn report(&self) -> &EqualizationReport {
        &self.report
    }
}

/// Ordered, immutable collection of test cases sharing one memory layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuite {
    capacity: ImageSize,
    cases: Vec<TestCase>,
}

impl TestSuite {
    /// Generate `params.num_tests` random cases.
    ///
    /// Sizes are drawn for every case first, then pixel data for every
    /// case, so one seed fixes the whole suite.
    pub fn generate<R: Rng>(params: &GeneratorParams, rng: &mut R) -> Result<Self, SuiteError> {
        let sizes = (0..params.num_tests)
            .map(|_| match params.mode {
                DimensionMode::Fixed(size) => Ok(size),
                DimensionMode::Random { max } => random::random_size(max, rng),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cases = sizes
            .into_iter()
            .map(|size| TestCase::new(random::random_image(size, rng)))
            .collect();

        Self::from_cases(params.capacity(), cases)
    }

    /// Assemble a suite from prepared cases, checking each fits `capacity`.
    pub fn from_cases(capacity: ImageSize, cases: Vec<TestCase>) -> Result<Self, SuiteError> {
        let words = region_words(capacity);
        if words > ADDRESS_SPACE_WORDS {
            return Err(SuiteError::AddressSpaceExceeded { capacity, words });
        }

        for (index, case) in cases.iter().enumerate() {
            let size = case.size();
            if !capacity.contains(&size) {
                return Err(SuiteError::CaseExceedsCapacity {
                    index,
                    size,
                    capacity,
                });
            }
            log::debug!(
                "Test {index}: {size}, range {:?}, shift {}, {} saturated",
                case.report.range,
                case.report.shift,
                case.report.saturated
            );
        }

        Ok(Self { capacity, cases })
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn capacity(&self) -> ImageSize {
        self.capacity
    }

    /// Pixels reserved per image in each memory region (`IMG_DIM`).
    pub fn img_dim(&self) -> usize {
        self.capacity.pixel_count()
    }

    /// Words per memory region (`MEM_DIM`).
    pub fn mem_dim(&self) -> usize {
        region_words(self.capacity)
    }
}
