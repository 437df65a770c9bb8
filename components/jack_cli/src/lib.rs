//! Jack Compiler CLI Library
//!
//! Provides the compilation driver and supporting modules for the `jackc`
//! binary: argument definitions, input discovery, per-file compilation, and
//! the optional XML syntax dump.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod driver;
pub mod error;
pub mod xml;

pub use cli::Cli;
pub use driver::Driver;
pub use error::{CliError, CliResult};
