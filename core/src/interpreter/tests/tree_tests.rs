//! Tests for the tree executor
//!
//! The tree path must agree with the streaming engine on every program that
//! parses.

use super::helpers::{machine_with_input, parse_program, run_stream, run_tree};
use crate::interpreter::types::DEFAULT_NOISE_THRESHOLD;
use crate::interpreter::{parse, Direction, ExecError};

#[test]
fn test_tree_write_after_increments() {
    let (machine, result) = run_tree(b"++++.");

    result.unwrap();
    assert_eq!(machine.output().as_slice(), &[4]);
}

#[test]
fn test_tree_clear_loop() {
    let program = parse_program(b"[-]");
    let mut machine = machine_with_input(b"");
    machine.tape_mut().set(200);

    machine.execute(&program).unwrap();

    assert_eq!(machine.tape().cell(0), 0);
}

#[test]
fn test_tree_read_write() {
    let program = parse_program(b",.");
    let mut machine = machine_with_input(b"A");

    machine.execute(&program).unwrap();

    assert_eq!(machine.output().as_slice(), b"A");
}

#[test]
fn test_tree_anchor_fixed_at_entry() {
    let (machine, result) = run_tree(b">+++<+[->]");

    result.unwrap();
    assert_eq!(machine.tape().cursor(), 1);
    assert_eq!(machine.tape().cell(1), 3);
}

#[test]
fn test_tree_out_of_bounds() {
    let (_, result) = run_tree(b"+[<]");

    assert!(matches!(
        result,
        Err(ExecError::OutOfBounds { direction: Direction::Left, cursor: 0, .. })
    ));
}

#[test]
fn test_tree_matches_stream() {
    let programs: &[&[u8]] = &[
        b"++[>++[>+<-]<-]",
        b"++[>+++[>++++[>+<-]<-]<-]",
        b"++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.",
        b"+++[>+++++<-]>[>++<-]>.",
        b"-[--->+<]>.",
        b">>+<<+[>[-]<-]>>.",
    ];

    for program in programs {
        let (stream, stream_result) = run_stream(program);
        let (tree, tree_result) = run_tree(program);

        stream_result.unwrap();
        tree_result.unwrap();
        assert_eq!(stream.tape(), tree.tape(), "program {:?}", String::from_utf8_lossy(program));
        assert_eq!(stream.output(), tree.output());
    }
}

#[test]
fn test_tree_scan_loop_keeps_reading_anchor() {
    let (stream, stream_result) = run_stream(b">+>+[<]");
    let (tree, tree_result) = run_tree(b">+>+[<]");

    assert!(matches!(stream_result, Err(ExecError::OutOfBounds { cursor: 0, .. })));
    assert!(matches!(tree_result, Err(ExecError::OutOfBounds { cursor: 0, .. })));
    assert_eq!(stream.tape(), tree.tape());
}

#[test]
fn test_tree_very_deep_nesting() {
    // Far deeper than any call stack would allow
    let depth = 200_000;
    let mut source = vec![b'+'];
    source.extend(std::iter::repeat(b'[').take(depth));
    source.push(b'-');
    source.extend(std::iter::repeat(b']').take(depth));

    let program = parse(&source, DEFAULT_NOISE_THRESHOLD).unwrap();
    assert_eq!(program.loop_count(), depth);

    let mut machine = machine_with_input(b"");
    machine.execute(&program).unwrap();

    assert_eq!(machine.tape().cell(0), 0);
    assert_eq!(machine.tape().cursor(), 0);
}

#[test]
fn test_tree_loop_reentered_each_outer_iteration() {
    // Outer runs 3 times; inner moves 2 units per outer pass
    let (machine, result) = run_tree(b"+++[>++[>+<-]<-]");

    result.unwrap();
    assert_eq!(&machine.tape().cells()[..3], &[0, 0, 6]);
}
