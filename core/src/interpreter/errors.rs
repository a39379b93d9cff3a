//! Interpreter error types

use super::types::Direction;
use std::ascii;
use std::io;
use thiserror::Error;

fn escape(byte: &u8) -> ascii::EscapeDefault {
    ascii::escape_default(*byte)
}

/// Failure raised while running a program
///
/// Every variant aborts the current run through all loop nesting levels.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("array index out of bounds: cannot move {direction} from cell {cursor} (tape length {len})")]
    OutOfBounds {
        cursor: usize,
        len: usize,
        direction: Direction,
    },

    #[error("unknown command: '{}' ({byte:#04x})", escape(.byte))]
    UnknownCommand { byte: u8 },

    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// Reading the program itself failed
    #[error("failed to read program: {0}")]
    Source(#[source] io::Error),

    #[error("unmatched '[': program ended inside a loop")]
    UnmatchedLoopStart,

    #[error("unmatched ']'")]
    UnmatchedLoopEnd,
}

/// Failure raised while parsing a whole program up front
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command: '{}' ({byte:#04x}) at offset {offset}", escape(.byte))]
    UnknownCommand { byte: u8, offset: usize },

    #[error("unmatched '[' at offset {offset}")]
    UnmatchedLoopStart { offset: usize },

    #[error("unmatched ']' at offset {offset}")]
    UnmatchedLoopEnd { offset: usize },
}
