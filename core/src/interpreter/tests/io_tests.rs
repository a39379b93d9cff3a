//! Tests for `,` and `.`

use super::helpers::{run_stream, run_stream_with_input};
use crate::interpreter::{ExecError, InputMode, Machine, OutputMode, ReplaySource, Settings};
use std::io::{self, Cursor, ErrorKind, Write};

fn machine_with_modes(
    input: &[u8],
    input_mode: InputMode,
    output_mode: OutputMode,
) -> Machine<Cursor<Vec<u8>>, Vec<u8>> {
    Machine::new(Cursor::new(input.to_vec()), Vec::new()).with_settings(Settings {
        input: input_mode,
        output: output_mode,
        ..Settings::default()
    })
}

#[test]
fn test_write_after_increments() {
    let (machine, result) = run_stream(b"++++.");

    result.unwrap();
    assert_eq!(machine.output().as_slice(), &[4]);
}

#[test]
fn test_read_then_write_echoes() {
    let (machine, result) = run_stream_with_input(b",.", b"A");

    result.unwrap();
    assert_eq!(machine.output().as_slice(), b"A");
    assert_eq!(machine.tape().cell(0), 65);
}

#[test]
fn test_read_overwrites_cell() {
    let (machine, result) = run_stream_with_input(b"+++++,", b"\x02");

    result.unwrap();
    assert_eq!(machine.tape().cell(0), 2);
}

#[test]
fn test_read_at_end_of_input_fails() {
    let (_, result) = run_stream_with_input(b",,", b"x");

    let Err(ExecError::Input(err)) = result else {
        unreachable!("Expected Input error, got {:?}", result);
    };
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn test_cat_loop() {
    // Echo input until a zero byte
    let (machine, result) = run_stream_with_input(b",[.,]", b"hey\0ignored");

    result.unwrap();
    assert_eq!(machine.output().as_slice(), b"hey");
}

#[test]
fn test_decimal_input() {
    let mut machine = machine_with_modes(b"  65\n\t66 7", InputMode::Decimal, OutputMode::Byte);

    machine.run(&mut ReplaySource::new(b",.>,.>,")).unwrap();

    assert_eq!(machine.output().as_slice(), b"AB");
    assert_eq!(machine.tape().cell(2), 7);
}

#[test]
fn test_decimal_input_out_of_range() {
    let mut machine = machine_with_modes(b"256\n", InputMode::Decimal, OutputMode::Byte);

    let result = machine.run(&mut ReplaySource::new(b","));

    let Err(ExecError::Input(err)) = result else {
        unreachable!("Expected Input error, got {:?}", result);
    };
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_decimal_input_not_a_number() {
    let mut machine = machine_with_modes(b"A\n", InputMode::Decimal, OutputMode::Byte);

    let result = machine.run(&mut ReplaySource::new(b","));

    assert!(matches!(result, Err(ExecError::Input(_))));
}

#[test]
fn test_decimal_input_only_whitespace() {
    let mut machine = machine_with_modes(b" \n ", InputMode::Decimal, OutputMode::Byte);

    let result = machine.run(&mut ReplaySource::new(b","));

    let Err(ExecError::Input(err)) = result else {
        unreachable!("Expected Input error, got {:?}", result);
    };
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn test_char_output_encodes_high_bytes() {
    let mut machine = machine_with_modes(b"", InputMode::Byte, OutputMode::Char);
    machine.tape_mut().set(0xE9);

    machine.run(&mut ReplaySource::new(b".")).unwrap();

    assert_eq!(machine.output().as_slice(), "é".as_bytes());
}

#[test]
fn test_char_output_ascii_unchanged() {
    let mut machine = machine_with_modes(b"", InputMode::Byte, OutputMode::Char);
    machine.tape_mut().set(b'A');

    machine.run(&mut ReplaySource::new(b".")).unwrap();

    assert_eq!(machine.output().as_slice(), b"A");
}

/// Writer that rejects everything
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_propagates() {
    let mut machine = Machine::new(io::empty(), BrokenPipe);

    let result = machine.run(&mut ReplaySource::new(b"+[.]"));

    let Err(ExecError::Output(err)) = result else {
        unreachable!("Expected Output error, got {:?}", result);
    };
    assert_eq!(err.kind(), ErrorKind::BrokenPipe);
}
