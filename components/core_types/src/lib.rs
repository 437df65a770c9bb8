//! Core error types shared by every stage of the Jack compiler.
//!
//! This crate provides the foundational types used across the pipeline:
//! the error taxonomy and the fatal error value every stage reports.
//!
//! # Overview
//!
//! - [`CompileError`] - A fatal compilation failure with message and line
//! - [`ErrorKind`] - The stage-level classification of a failure
//!
//! # Examples
//!
//! ```
//! use core_types::{CompileError, ErrorKind};
//!
//! let error = CompileError::new(
//!     ErrorKind::SyntaxError,
//!     "A mark ; is expected but } is given in 4",
//!     Some(4),
//! );
//!
//! assert_eq!(error.line, Some(4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;

pub use error::{CompileError, ErrorKind};
