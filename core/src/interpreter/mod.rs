//! # Tape interpreter
//!
//! Executes programs for the eight-instruction byte machine:
//!
//! | byte | effect                                        |
//! |------|-----------------------------------------------|
//! | `+`  | increment the current cell (wrapping)         |
//! | `-`  | decrement the current cell (wrapping)         |
//! | `>`  | move the cursor right                         |
//! | `<`  | move the cursor left                          |
//! | `,`  | read one unit of input into the current cell  |
//! | `.`  | write the current cell                        |
//! | `[`  | start a loop anchored at the current cell     |
//! | `]`  | end the innermost open loop                   |
//!
//! Two execution paths share one [`Machine`]:
//!
//! 1. **Streaming** ([`Machine::run`]): pulls bytes lazily from a
//!    [`TokenSource`] and replays captured loop bodies recursively. Works on
//!    unbounded interactive input.
//! 2. **Tree** ([`parse`] + [`Machine::execute`]): validates the whole program
//!    first, then walks the parsed loop tree.
//!
//! # Example
//! ```
//! use tapir_core::interpreter::{Machine, ReplaySource};
//!
//! let mut out = Vec::new();
//! let mut machine = Machine::new(std::io::empty(), &mut out);
//! machine.run(&mut ReplaySource::new(b"++++++[>++++++++++<-]>+++++.")).unwrap();
//! drop(machine);
//! assert_eq!(out, b"A");
//! ```

pub mod engine;
pub mod errors;
pub mod machine;
pub mod parser;
pub mod source;
pub mod tree;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use errors::{ExecError, ParseError};
pub use machine::{InputMode, Machine, OutputMode, Settings};
pub use parser::parse;
pub use source::{FileSource, InteractiveSource, ReplaySource, TokenSource};
pub use types::{Command, Direction, Op, Program, Tape, Token};
