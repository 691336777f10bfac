//! Test bench generation for the image equalizer.
//!
//! A run reads the generator parameters, builds a suite of random test
//! images with their reference outputs, and serializes everything into a
//! single VHDL test bench that drives the device under test and asserts
//! every output pixel.

pub mod config;
pub mod params;
pub mod session;
pub mod suite;
pub mod vhdl;

pub use config::GeneratorConfig;
pub use params::{DimensionMode, GeneratorParams, Intake, ParamError};
pub use session::{run_session, ParamSource, SessionError, SessionOutcome};
pub use suite::{SuiteError, TestCase, TestSuite};
