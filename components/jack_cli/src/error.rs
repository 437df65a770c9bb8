//! Error types for the CLI

use core_types::CompileError;
use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Compilation error from the lexer, parser, or code generator
    CompileError(CompileError),

    /// File I/O error
    IoError(std::io::Error),

    /// Bad invocation (no inputs, nothing to compile)
    UsageError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::CompileError(e) => write!(f, "{}", e),
            CliError::IoError(e) => write!(f, "File error: {}", e),
            CliError::UsageError(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::IoError(e) => Some(e),
            CliError::CompileError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CompileError> for CliError {
    fn from(err: CompileError) -> Self {
        CliError::CompileError(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError(err)
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
