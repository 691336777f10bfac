//! One generator run: intake, generation, emission.
//!
//! The run is linear and single threaded. Console text goes to the supplied
//! writer so the whole session can be driven from tests.

use crate::config::GeneratorConfig;
use crate::params::{read_params, GeneratorParams, Intake, ParamError, TokenReader};
use crate::suite::{SuiteError, TestSuite};
use crate::vhdl::{self, EmitError};
use equalizer::random;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MSG_NOTHING_TO_DO: &str = "0 Test benches generated";
pub const MSG_ONE_DIMENSION_ZERO: &str = "One of the entered dimensions is 0";
pub const MSG_FILE_GENERATED: &str = "File generated";
pub const MSG_PRESS_ENTER: &str = "Press ENTER to continue...";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Params(ParamError),
    #[error(transparent)]
    Suite(#[from] SuiteError),
    #[error("Output file {path} could not be created: {source}")]
    CreateOutput { path: PathBuf, source: io::Error },
    #[error("Output file {path} could not be written: {source}")]
    WriteOutput { path: PathBuf, source: EmitError },
    #[error("Console I/O error: {0}")]
    Console(#[from] io::Error),
}

/// Where the generator parameters come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// Ask on the console
    Interactive,
    /// Values given up front, validated like console answers
    Values {
        num_tests: usize,
        dims: (usize, usize),
        max_dims: Option<(usize, usize)>,
    },
}

/// How a session ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Zero tests requested, no file written
    NothingToDo,
    /// Exactly one fixed dimension was zero, no file written
    InvalidDimensions,
    Generated {
        path: PathBuf,
        tests: usize,
        seed: u64,
    },
}

/// Run a complete generator session.
pub fn run_session<R: BufRead, W: Write>(
    config: &GeneratorConfig,
    source: ParamSource,
    tokens: &mut TokenReader<R>,
    console: &mut W,
) -> Result<SessionOutcome, SessionError> {
    let intake = match source {
        ParamSource::Interactive => read_params(tokens, console, config.side_limit),
        ParamSource::Values {
            num_tests,
            dims,
            max_dims,
        } => GeneratorParams::from_values(num_tests, dims, max_dims, config.side_limit),
    };

    let params = match intake {
        Ok(Intake::Generate(params)) => params,
        Ok(Intake::NothingToDo) => {
            writeln!(console, "{MSG_NOTHING_TO_DO}")?;
            return Ok(SessionOutcome::NothingToDo);
        }
        Err(ParamError::OneDimensionZero) => {
            writeln!(console, "{MSG_ONE_DIMENSION_ZERO}")?;
            return Ok(SessionOutcome::InvalidDimensions);
        }
        Err(e) => return Err(SessionError::Params(e)),
    };

    writeln!(console, "{params}")?;
    console.flush()?;

    let seed = config.seed.unwrap_or_else(random::time_seed);
    log::info!("Generating {} tests with seed {seed}", params.num_tests);
    let mut rng = random::seeded_rng(seed);
    let suite = TestSuite::generate(&params, &mut rng)?;

    write_suite(&suite, &config.output)?;
    log::info!(
        "Wrote {} tests ({} words per region) to {}",
        suite.len(),
        suite.mem_dim(),
        config.output.display()
    );
    writeln!(console, "{MSG_FILE_GENERATED}")?;

    Ok(SessionOutcome::Generated {
        path: config.output.clone(),
        tests: suite.len(),
        seed,
    })
}

/// Write the test bench for `suite` to a new file at `path`.
///
/// The file is flushed and closed before this returns.
pub fn write_suite(suite: &TestSuite, path: &Path) -> Result<(), SessionError> {
    let file = File::create(path).map_err(|source| SessionError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    vhdl::write_testbench(suite, BufWriter::new(file)).map_err(|source| {
        SessionError::WriteOutput {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(())
}

/// Print the exit prompt and wait for a line of input.
pub fn pause<R: BufRead, W: Write>(tokens: &mut TokenReader<R>, console: &mut W) -> io::Result<()> {
    writeln!(console, "{MSG_PRESS_ENTER}")?;
    console.flush()?;
    tokens.wait_for_line()
}
