//! Jack Language Frontend
//!
//! Provides lexing, token classification, symbol tables, a recursive descent
//! parser, and VM code generation for the Jack class language.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes Jack source code with one-token lookahead
//! - [`Token`] - Classified lexeme carrying its source line
//! - [`SymbolTable`] - Per-scope name to variable-entry mapping
//! - [`Parser`] - Recursive descent parser producing a [`ClassDec`]
//! - [`CodeGenerator`] - Walks a parsed class and emits VM commands
//!
//! # Example
//!
//! ```
//! use parser::{CodeGenerator, Parser};
//!
//! let source = "class Main { function void main() { return; } }";
//! let class = Parser::new(source).parse().unwrap();
//!
//! let commands = CodeGenerator::new(&class).generate().unwrap();
//! assert_eq!(commands[0].to_string(), "function Main.main 0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbol_table;
pub mod token;

pub use ast::{
    ClassDec, ClassVarDec, Expression, KeywordConstant, Operator, Parameter, Statement,
    SubroutineCall, SubroutineDec, SubroutineKind, Term, VarDec,
};
pub use codegen::CodeGenerator;
pub use lexer::Lexer;
pub use parser::Parser;
pub use symbol_table::{ScopeChain, SymbolEntry, SymbolKind, SymbolTable, TableKind};
pub use token::{Token, TokenCategory};
