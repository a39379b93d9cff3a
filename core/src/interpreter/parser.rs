//! Whole-program parser
//!
//! Turns program bytes into a [`Program`] tree in one pass. Loops become
//! [`Op::Loop`] nodes owning their bodies, so the tree executor never has to
//! re-scan bytes to find matching brackets.

use super::errors::ParseError;
use super::types::{Op, Program, Token};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse `source`, dropping noise bytes at or below `noise_threshold`
pub fn parse(source: &[u8], noise_threshold: u8) -> ParseResult<Program> {
    // One open sequence per unclosed `[`, with the offset of that `[`
    let mut open: Vec<(usize, Vec<Op>)> = Vec::new();
    let mut current: Vec<Op> = Vec::new();

    for (offset, &byte) in source.iter().enumerate() {
        match Token::classify(byte, noise_threshold) {
            Token::Command(cmd) => current.push(Op::Command(cmd)),

            Token::LoopStart => {
                open.push((offset, std::mem::take(&mut current)));
            }

            Token::LoopEnd => {
                let Some((_, mut parent)) = open.pop() else {
                    return Err(ParseError::UnmatchedLoopEnd { offset });
                };
                parent.push(Op::Loop(std::mem::take(&mut current)));
                current = parent;
            }

            Token::Noise => {}

            Token::Unknown(byte) => return Err(ParseError::UnknownCommand { byte, offset }),
        }
    }

    if let Some((offset, _)) = open.pop() {
        return Err(ParseError::UnmatchedLoopStart { offset });
    }

    Ok(Program::new(current))
}
