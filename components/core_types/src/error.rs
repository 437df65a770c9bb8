//! Compilation error types and classification.
//!
//! All three kinds of error are fatal: detection aborts compilation of the
//! current input file immediately, with no resync or partial recovery.

use std::fmt;
use thiserror::Error;

/// The stage-level classification of a compilation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unterminated string or block comment, or an unrecognizable lexeme
    LexicalError,
    /// An expected keyword, mark, identifier, or type was not found
    SyntaxError,
    /// Duplicate definition, unresolved name, or a malformed call target
    SemanticError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::LexicalError => "Lexical error",
            ErrorKind::SyntaxError => "Syntax error",
            ErrorKind::SemanticError => "Semantic error",
        };
        write!(f, "{name}")
    }
}

/// A fatal compilation error.
///
/// The message carries expected-versus-actual text and, where known, the
/// offending source line; `line` keeps the line available structurally for
/// tooling and tests.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    /// The stage that detected the failure
    pub kind: ErrorKind,
    /// Human-readable description including expected vs. actual text
    pub message: String,
    /// Source line the failure was detected on, when known
    pub line: Option<u32>,
}

impl CompileError {
    /// Create a new error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::LexicalError.to_string(), "Lexical error");
        assert_eq!(ErrorKind::SyntaxError.to_string(), "Syntax error");
        assert_eq!(ErrorKind::SemanticError.to_string(), "Semantic error");
    }

    #[test]
    fn test_compile_error_display() {
        let error = CompileError::new(ErrorKind::SyntaxError, "A mark ; is expected", Some(3));
        assert_eq!(error.to_string(), "Syntax error: A mark ; is expected");
        assert_eq!(error.line, Some(3));
    }

    #[test]
    fn test_compile_error_is_std_error() {
        let error = CompileError::new(ErrorKind::LexicalError, "Unrecognized token", None);
        let _boxed: Box<dyn std::error::Error> = Box::new(error);
    }
}
