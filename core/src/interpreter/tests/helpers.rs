//! Test helpers for interpreter tests
//!
//! Common utilities for running programs on in-memory I/O

use crate::interpreter::{parse, ExecError, Machine, Program, ReplaySource, Tape};
use crate::interpreter::types::DEFAULT_NOISE_THRESHOLD;
use std::io::Cursor;

pub type TestMachine = Machine<Cursor<Vec<u8>>, Vec<u8>>;

/// Build a machine reading `input` and collecting output in memory
pub fn machine_with_input(input: &[u8]) -> TestMachine {
    Machine::new(Cursor::new(input.to_vec()), Vec::new())
}

/// Build a machine with a short tape, for bounds tests
pub fn machine_with_tape_len(len: usize) -> TestMachine {
    machine_with_input(b"").with_tape(Tape::new(len))
}

/// Run `program` through the streaming engine with empty input
pub fn run_stream(program: &[u8]) -> (TestMachine, Result<(), ExecError>) {
    run_stream_with_input(program, b"")
}

pub fn run_stream_with_input(program: &[u8], input: &[u8]) -> (TestMachine, Result<(), ExecError>) {
    let mut machine = machine_with_input(input);
    let result = machine.run(&mut ReplaySource::new(program));
    (machine, result)
}

/// Parse `program`, serialize and deserialize the tree (to test round-trip
/// compatibility), and return it
///
/// Panics if the program doesn't parse.
pub fn parse_program(program: &[u8]) -> Program {
    let parsed = parse(program, DEFAULT_NOISE_THRESHOLD).expect("Parse program failed");
    let json = serde_json::to_string(&parsed).expect("Program serialization failed");
    let restored: Program = serde_json::from_str(&json).expect("Program deserialization failed");
    assert_eq!(parsed, restored);
    restored
}

/// Parse and execute `program` on the tree path with empty input
pub fn run_tree(program: &[u8]) -> (TestMachine, Result<(), ExecError>) {
    let parsed = parse_program(program);
    let mut machine = machine_with_input(b"");
    let result = machine.execute(&parsed);
    (machine, result)
}
