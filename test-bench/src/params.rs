//! Generator parameter intake.
//!
//! Parameters come either from the interactive console prompts or straight
//! from values (command line flags). Both paths go through
//! [`GeneratorParams::from_values`] so they accept and reject exactly the
//! same inputs.

use equalizer::ImageSize;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const PROMPT_NUM_TESTS: &str = "Number of images: ";
pub const PROMPT_DIMENSIONS: &str =
    "Image dimensions (e.g. dimX dimY) or 0 0 for random dimensions: ";
pub const PROMPT_LIMITS: &str =
    "Image dimension limits (e.g.  maxDimX maxDimY), 0 0 for unlimited dimensions: ";

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Invalid numeric input: {0:?}")]
    InvalidNumber(String),
    #[error("Input ended while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("One of the entered dimensions is 0")]
    OneDimensionZero,
    #[error("Dimensions {size} exceed the side limit of {limit}")]
    ExceedsSideLimit { size: ImageSize, limit: usize },
    #[error("Console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// How test image sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionMode {
    /// Every test image has this size
    Fixed(ImageSize),
    /// Each test image draws its own size, up to `max` on each axis
    Random { max: ImageSize },
}

/// Validated parameters for one generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    pub num_tests: usize,
    pub mode: DimensionMode,
    /// Default side used when no explicit bound applies
    pub side_limit: usize,
}

/// Result of parameter intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intake {
    Generate(GeneratorParams),
    /// Zero tests were requested
    NothingToDo,
}

impl GeneratorParams {
    /// Validate raw values.
    ///
    /// `dims == (0, 0)` selects random dimensions bounded by `max_dims`,
    /// where a zero bound (or no bounds at all) falls back to `side_limit`.
    /// `max_dims` is ignored in fixed mode.
    pub fn from_values(
        num_tests: usize,
        dims: (usize, usize),
        max_dims: Option<(usize, usize)>,
        side_limit: usize,
    ) -> Result<Intake, ParamError> {
        if num_tests == 0 {
            return Ok(Intake::NothingToDo);
        }

        let mode = match dims {
            (0, 0) => {
                let (max_x, max_y) = max_dims.unwrap_or((0, 0));
                let max = ImageSize::from_width_height(
                    if max_x == 0 { side_limit } else { max_x },
                    if max_y == 0 { side_limit } else { max_y },
                );
                check_side_limit(max, side_limit)?;
                DimensionMode::Random { max }
            }
            (0, _) | (_, 0) => return Err(ParamError::OneDimensionZero),
            (x, y) => {
                if max_dims.is_some() {
                    log::warn!("Ignoring dimension limits for fixed {x}x{y} images");
                }
                let size = ImageSize::from_width_height(x, y);
                check_side_limit(size, side_limit)?;
                DimensionMode::Fixed(size)
            }
        };

        Ok(Intake::Generate(Self {
            num_tests,
            mode,
            side_limit,
        }))
    }

    /// Largest image a single memory region must hold.
    ///
    /// Random mode sizes regions by the drawn bounds, fixed mode by the
    /// default side limit on both axes.
    pub fn capacity(&self) -> ImageSize {
        match self.mode {
            DimensionMode::Fixed(_) => ImageSize::square(self.side_limit),
            DimensionMode::Random { max } => max,
        }
    }

    /// Human readable description of what will be generated.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeneratorParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            DimensionMode::Random { max } => write!(
                f,
                "Generating test bench with {} images with random dimensions (max {} x {}) to be equalized sequentially...",
                self.num_tests, max.width, max.height
            ),
            DimensionMode::Fixed(size) => write!(
                f,
                "Generating test bench with {} images {} x {} to be equalized sequentially...",
                self.num_tests, size.width, size.height
            ),
        }
    }
}

fn check_side_limit(size: ImageSize, limit: usize) -> Result<(), ParamError> {
    if ImageSize::square(limit).contains(&size) {
        Ok(())
    } else {
        Err(ParamError::ExceedsSideLimit { size, limit })
    }
}

/// Whitespace separated tokens read lazily across lines.
///
/// Answers may be split over lines or given ahead of their prompt, the way
/// a console user types `3` and `4 4` or `3 4 4` on one line.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// Next token parsed as a non-negative integer.
    pub fn next_number(&mut self, what: &'static str) -> Result<usize, ParamError> {
        let token = self
            .next_token()?
            .ok_or(ParamError::UnexpectedEof(what))?;
        token
            .parse::<usize>()
            .map_err(|_| ParamError::InvalidNumber(token))
    }

    /// Drop any unread tokens and block until the next line arrives.
    pub fn wait_for_line(&mut self) -> io::Result<()> {
        self.pending.clear();
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(())
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn prompt<W: Write>(console: &mut W, text: &str) -> io::Result<()> {
    write!(console, "{text}")?;
    console.flush()
}

/// Run the interactive prompts.
///
/// Asks for the number of tests, then the dimensions, then the dimension
/// limits only when random dimensions were chosen.
pub fn read_params<R: BufRead, W: Write>(
    tokens: &mut TokenReader<R>,
    console: &mut W,
    side_limit: usize,
) -> Result<Intake, ParamError> {
    prompt(console, PROMPT_NUM_TESTS)?;
    let num_tests = tokens.next_number("the number of images")?;
    if num_tests == 0 {
        return Ok(Intake::NothingToDo);
    }

    prompt(console, PROMPT_DIMENSIONS)?;
    let dim_x = tokens.next_number("the image width")?;
    let dim_y = tokens.next_number("the image height")?;

    let max_dims = if dim_x == 0 && dim_y == 0 {
        prompt(console, PROMPT_LIMITS)?;
        let max_x = tokens.next_number("the width limit")?;
        let max_y = tokens.next_number("the height limit")?;
        Some((max_x, max_y))
    } else {
        None
    };

    GeneratorParams::from_values(num_tests, (dim_x, dim_y), max_dims, side_limit)
}
