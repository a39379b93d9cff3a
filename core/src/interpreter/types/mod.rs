//! Type definitions for the interpreter
//!
//! - Instruction bytes and their classification (Command, Token)
//! - Program tree (Op, Program)
//! - The byte tape and its cursor (Tape)

pub mod ast;
pub mod tape;

pub use ast::{Command, Op, Program, Token, DEFAULT_NOISE_THRESHOLD};
pub use tape::{Direction, Tape, DEFAULT_TAPE_LENGTH};
