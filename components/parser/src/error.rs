//! Error constructors shared by the parsing and code-generation passes.

use core_types::{CompileError, ErrorKind};

/// Create a lexical error at a given line.
pub fn lexical_error(message: impl Into<String>, line: Option<u32>) -> CompileError {
    CompileError::new(ErrorKind::LexicalError, message, line)
}

/// Create a syntax error at a given line.
pub fn syntax_error(message: impl Into<String>, line: Option<u32>) -> CompileError {
    CompileError::new(ErrorKind::SyntaxError, message, line)
}

/// Create a semantic error (duplicate symbol, unresolved name, bad call).
pub fn semantic_error(message: impl Into<String>) -> CompileError {
    CompileError::new(ErrorKind::SemanticError, message, None)
}

/// Create an error for input that ended while `what` was still expected.
pub fn unexpected_eof(what: &str) -> CompileError {
    syntax_error(format!("{what} not found, program is malformed!"), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_kind() {
        let err = syntax_error("test", None);
        assert!(matches!(err.kind, ErrorKind::SyntaxError));
    }

    #[test]
    fn test_unexpected_eof_message() {
        let err = unexpected_eof("}");
        assert!(err.message.contains("malformed"));
    }
}
