//! Generate a VHDL test bench for the image equalizer.
//!
//! Without `--tests` the generator asks for its parameters on the console:
//! the number of images, their dimensions (`0 0` for random dimensions) and,
//! for random dimensions, the per-axis limits (`0 0` for the default limit).
//! With `--tests` everything comes from flags and nothing is prompted.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use test_bench::params::TokenReader;
use test_bench::session::{self, ParamSource, SessionOutcome};
use test_bench::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate a VHDL test bench for the image equalizer",
    long_about = None
)]
struct Args {
    /// Number of test images (prompts for all parameters when omitted)
    #[arg(short = 'n', long)]
    tests: Option<usize>,

    /// Fixed image dimensions, or `0 0` for random dimensions (default)
    #[arg(long, num_args = 2, value_names = ["DIM_X", "DIM_Y"])]
    dims: Option<Vec<usize>>,

    /// Limits for random dimensions, `0` on an axis for the side limit
    #[arg(long, num_args = 2, value_names = ["MAX_X", "MAX_Y"])]
    max_dims: Option<Vec<usize>>,

    /// Default largest image side
    #[arg(long)]
    side_limit: Option<usize>,

    /// Output test bench file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// RNG seed for reproducible test vectors (default: wall-clock time)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file, overridden by the flags above
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Exit without waiting for ENTER
    #[arg(long)]
    no_pause: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn pair(values: &[usize], flag: &str) -> Result<(usize, usize)> {
    match values {
        [x, y] => Ok((*x, *y)),
        _ => bail!("--{flag} takes exactly two values"),
    }
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(side_limit) = self.side_limit {
            config.side_limit = side_limit;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_pause {
            config.pause_on_exit = false;
        }

        config.validate()?;
        Ok(config)
    }

    fn source(&self) -> Result<ParamSource> {
        let Some(num_tests) = self.tests else {
            return Ok(ParamSource::Interactive);
        };
        let dims = match &self.dims {
            Some(values) => pair(values, "dims")?,
            None => (0, 0),
        };
        let max_dims = self
            .max_dims
            .as_deref()
            .map(|values| pair(values, "max-dims"))
            .transpose()?;
        Ok(ParamSource::Values {
            num_tests,
            dims,
            max_dims,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = args.generator_config()?;
    let source = args.source()?;
    log::debug!("Config: {config:?}, parameters: {source:?}");

    let stdin = io::stdin();
    let mut tokens = TokenReader::new(stdin.lock());
    let mut console = io::stdout();

    let outcome = session::run_session(&config, source, &mut tokens, &mut console)
        .context("Test bench generation failed")?;

    if let SessionOutcome::Generated { path, tests, seed } = &outcome {
        log::info!("{tests} tests written to {} (seed {seed})", path.display());
    }

    if config.pause_on_exit {
        session::pause(&mut tokens, &mut console)?;
    }
    console.flush()?;

    Ok(())
}
