//! VM command model for the stack machine targeted by the compiler.
//!
//! Provides the typed instruction set and the ordered writer used by code
//! generation to produce textual VM output, one instruction per line.
//!
//! # Overview
//!
//! - [`Segment`] - Named storage regions of the virtual machine
//! - [`Command`] - A single VM instruction and its textual form
//! - [`VmWriter`] - Ordered command buffer with emission helpers
//!
//! # Example
//!
//! ```
//! use vm_writer::{Segment, VmWriter};
//!
//! let mut writer = VmWriter::new();
//! writer.push(Segment::Constant, 2);
//! writer.call("Memory.alloc", 1);
//! writer.pop(Segment::Pointer, 0);
//!
//! assert_eq!(
//!     writer.to_text(),
//!     "push constant 2\ncall Memory.alloc 1\npop pointer 0\n"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod writer;

pub use command::{Command, Segment};
pub use writer::VmWriter;
